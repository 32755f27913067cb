//! # Spindle
//!
//! **Spindle** is a minimal cooperative task executor. It drives
//! [`Future`](std::future::Future)s to completion on a single thread using
//! nothing but `poll` and [`Waker`](std::task::Waker)s.
//!
//! There is no reactor, no thread pool and no work stealing. Tasks are pushed
//! onto an unbounded FIFO ready queue, polled one at a time by the thread that
//! called [`Executor::run_to_completion`], and re-enqueued whenever something
//! fires their waker. The run ends once the queue is empty and no task is still
//! waiting for a wake.
//!
//! It features:
//!
//! - A **single-consumer ready queue** fed by any number of spawners and wakers
//! - **Id-based wakers** that never own the task they wake
//! - A **thread-backed [`sleep`](time::sleep)** showing how an external event
//!   source delivers wakes
//! - **Ergonomic macros** `#[spindle::main]` and `#[spindle::test]`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spindle::Executor;
//! use spindle::time::sleep;
//! use std::time::Duration;
//!
//! let mut executor = Executor::new();
//!
//! executor.spawn(async {
//!     sleep(Duration::from_secs(1)).await;
//!     println!("slept");
//! });
//!
//! executor.spawn(async {
//!     println!("ready right away");
//! });
//!
//! executor.run_to_completion();
//! ```
//!
//! ## Modules
//!
//! - [`time`] — The `sleep` demonstration primitive
//! - [`error`] — Configuration and spawn errors

mod runtime;

pub mod error;
pub mod time;

pub use runtime::builder::Builder;
pub use runtime::executor::{Executor, Spawner};
pub use runtime::task::TaskId;
pub use runtime::task::spawn::{spawn, try_spawn};
pub use runtime::yield_now::yield_now;

pub use spindle_macros::*;
