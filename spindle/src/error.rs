//! Error types.
//!
//! The executor itself never fails because of what its tasks do: domain
//! failures belong inside a task's output. The errors here only cover
//! building an executor and spawning without one.

use thiserror::Error;

/// Errors returned when an [`Executor`](crate::Executor) cannot be built
/// from its configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// The idle timeout must be strictly positive, otherwise the run loop
    /// would spin without ever waiting on the ready queue.
    #[error("idle timeout must be greater than zero")]
    ZeroIdleTimeout,

    /// An environment variable held a value that could not be parsed.
    #[error("invalid value {value:?} for environment variable {var}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Errors returned by [`try_spawn`](crate::try_spawn).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    /// No executor is running on the current thread.
    #[error("spawn must be called within the context of a running executor")]
    NoRuntime,
}
