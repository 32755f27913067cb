//! Executor façade.
//!
//! This module exposes the user-facing entry points of the runtime:
//! - [`Executor`], which owns the ready queue and drives the run loop,
//! - [`Spawner`], a cloneable handle for spawning from any thread.

pub(crate) mod core;

pub use self::core::{Executor, Spawner};
