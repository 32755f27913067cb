//! Time utilities.
//!
//! This module provides [`sleep`], the demonstration external event source:
//! a future whose wake is delivered by a background timer thread rather than
//! by the executor.

mod sleep;

#[doc(inline)]
pub use sleep::{Sleep, sleep};
