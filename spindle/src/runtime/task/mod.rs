//! Task primitives.
//!
//! This module defines how the runtime represents a spawned computation and
//! how that computation is woken:
//! - [`TaskId`], the identity wakers use to find a task again,
//! - the runtime-owned task container with its run-once slot,
//! - the id-based waker,
//! - context-based spawning from inside running tasks.

pub(crate) mod core;
pub(crate) mod spawn;
pub(crate) mod waker;

pub(crate) use self::core::Task;
pub(crate) use waker::TaskWaker;

pub use self::core::TaskId;
