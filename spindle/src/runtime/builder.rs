use crate::error::BuildError;
use crate::runtime::executor::Executor;

use std::env;
use std::time::Duration;

/// Environment variable read by [`Builder::from_env`], in milliseconds.
pub(crate) const IDLE_TIMEOUT_ENV: &str = "SPINDLE_IDLE_TIMEOUT_MS";

/// Default time the run loop waits on an empty queue before re-checking
/// whether it can terminate.
pub(crate) const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(10);

/// Validated executor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) idle_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

/// Builder for configuring and creating an [`Executor`].
///
/// # Examples
///
/// ```rust,ignore
/// let executor = Executor::builder()
///     .idle_timeout(Duration::from_millis(5))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    idle_timeout: Duration,
}

impl Builder {
    /// Creates a new `Builder` with default configuration.
    ///
    /// The idle timeout defaults to 10 milliseconds.
    pub fn new() -> Self {
        Self {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    /// Creates a `Builder` from defaults overridden by the environment.
    ///
    /// `SPINDLE_IDLE_TIMEOUT_MS` sets the idle timeout in milliseconds when
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidEnv`] if the variable is set but is not
    /// a valid unsigned integer.
    pub fn from_env() -> Result<Self, BuildError> {
        let mut builder = Self::new();

        if let Ok(raw) = env::var(IDLE_TIMEOUT_ENV) {
            builder.idle_timeout = parse_millis(IDLE_TIMEOUT_ENV, &raw)?;
        }

        Ok(builder)
    }

    /// Sets how long the run loop waits on an empty ready queue before it
    /// re-checks whether any task is still pending.
    ///
    /// Shorter values make [`run_to_completion`](Executor::run_to_completion)
    /// return sooner after the last task finishes, at the cost of more
    /// wakeups while tasks are waiting on external events.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Builds the executor with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ZeroIdleTimeout`] if the idle timeout is zero.
    pub fn build(self) -> Result<Executor, BuildError> {
        if self.idle_timeout.is_zero() {
            return Err(BuildError::ZeroIdleTimeout);
        }

        Ok(Executor::with_config(Config {
            idle_timeout: self.idle_timeout,
        }))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_millis(var: &'static str, raw: &str) -> Result<Duration, BuildError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| BuildError::InvalidEnv {
            var,
            value: raw.to_owned(),
        })
}
