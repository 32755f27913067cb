//! Core runtime components.
//!
//! This module contains the building blocks of the executor:
//! - the ready queue shared by spawners and wakers,
//! - tasks and their id-based wakers,
//! - the run loop that polls tasks and detects termination,
//! - the public executor façade and its builder,
//! - cooperative yielding.

mod context;
mod core;
mod queue;

pub(crate) mod builder;
pub(crate) mod executor;
pub(crate) mod task;
pub(crate) mod yield_now;
