use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll, Waker};
use std::thread;
use std::time::Duration;

use tracing::{trace, warn};

/// Creates a future that completes after the given duration.
///
/// The first poll starts a detached background thread that sleeps for
/// `duration`, then marks the future ready and fires the task's waker. The
/// executor thread itself never blocks.
///
/// A zero duration completes on the first poll without starting a timer.
///
/// # Examples
///
/// ```rust,ignore
/// use std::time::Duration;
///
/// sleep(Duration::from_millis(10)).await;
/// ```
pub fn sleep(duration: Duration) -> Sleep {
    Sleep::new(duration)
}

/// A future that completes once its duration has elapsed.
///
/// `Sleep` shows the pattern every future that returns `Poll::Pending` has to
/// follow: before returning, it hands a clone of the waker to something
/// independent of the executor (here a timer thread) that will call it once
/// progress is possible.
///
/// The timer is armed once. Later polls before it fires only refresh the
/// stored waker.
pub struct Sleep {
    /// How long to wait once armed.
    duration: Duration,

    /// State shared with the timer thread, present once the timer is armed.
    timer: Option<Arc<TimerState>>,
}

/// State shared between a [`Sleep`] and its timer thread.
struct TimerState {
    /// Set by the timer thread once the duration has elapsed.
    ready: AtomicBool,

    /// Waker of the most recent poll. Taken by the timer thread when it fires.
    waker: Mutex<Option<Waker>>,
}

impl Sleep {
    /// Creates a new `Sleep` future that completes after `duration`.
    ///
    /// The timer is not started until the future is first polled.
    pub(crate) fn new(duration: Duration) -> Self {
        Self {
            duration,
            timer: None,
        }
    }

    /// Starts the timer thread.
    fn arm(&self, timer: Arc<TimerState>) -> io::Result<()> {
        let duration = self.duration;

        thread::Builder::new()
            .name("spindle-sleep".into())
            .spawn(move || {
                thread::sleep(duration);
                timer.fire();
            })
            .map(drop)
    }
}

impl TimerState {
    fn new(waker: Waker) -> Self {
        Self {
            ready: AtomicBool::new(false),
            waker: Mutex::new(Some(waker)),
        }
    }

    /// Marks the timer ready and wakes whichever task polled last.
    fn fire(&self) {
        self.ready.store(true, Ordering::Release);

        let waker = self
            .waker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        trace!("sleep timer fired");

        if let Some(waker) = waker {
            waker.wake();
        }
    }

    /// Returns `true` if the timer already fired, otherwise stores `waker`
    /// for it to fire later.
    ///
    /// The readiness check happens under the waker lock, and `fire` sets the
    /// flag before taking that lock, so a fire racing this call is always
    /// observed by one side or the other.
    fn ready_or_register(&self, waker: &Waker) -> bool {
        let mut slot = self.waker.lock().unwrap_or_else(PoisonError::into_inner);

        if self.ready.load(Ordering::Acquire) {
            return true;
        }

        match slot.as_mut() {
            Some(current) => current.clone_from(waker),
            None => *slot = Some(waker.clone()),
        }

        false
    }
}

impl Future for Sleep {
    type Output = ();

    /// Polls the sleep future.
    ///
    /// If the timer cannot be started the failure is logged and the task
    /// wakes itself, so arming is retried on the next poll.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let Some(timer) = &this.timer {
            return if timer.ready_or_register(cx.waker()) {
                Poll::Ready(())
            } else {
                Poll::Pending
            };
        }

        if this.duration.is_zero() {
            return Poll::Ready(());
        }

        let timer = Arc::new(TimerState::new(cx.waker().clone()));

        match this.arm(timer.clone()) {
            Ok(()) => {
                trace!(duration = ?this.duration, "sleep timer armed");
                this.timer = Some(timer);
            }
            Err(err) => {
                warn!(error = %err, "failed to start sleep timer, retrying");
                cx.waker().wake_by_ref();
            }
        }

        Poll::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::AtomicUsize;
    use std::task::Wake;
    use std::time::Instant;

    struct CountingWaker(AtomicUsize);

    impl Wake for CountingWaker {
        fn wake(self: Arc<Self>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn wait_for_wakes(counter: &CountingWaker, expected: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);

        while counter.0.load(Ordering::SeqCst) < expected {
            assert!(Instant::now() < deadline, "timer never fired");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_zero_duration_is_ready_immediately() {
        let mut sleep = sleep(Duration::ZERO);
        let mut cx = Context::from_waker(Waker::noop());

        assert!(Pin::new(&mut sleep).poll(&mut cx).is_ready());
        assert!(sleep.timer.is_none());
    }

    #[test]
    fn test_timer_fires_waker_once_ready() {
        let counter = Arc::new(CountingWaker(AtomicUsize::new(0)));
        let waker = Waker::from(counter.clone());
        let mut cx = Context::from_waker(&waker);

        let mut sleep = sleep(Duration::from_millis(20));

        assert!(Pin::new(&mut sleep).poll(&mut cx).is_pending());

        wait_for_wakes(&counter, 1);

        assert!(Pin::new(&mut sleep).poll(&mut cx).is_ready());
        assert!(Pin::new(&mut sleep).poll(&mut cx).is_ready());
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_repolling_updates_waker_without_rearming() {
        let first = Arc::new(CountingWaker(AtomicUsize::new(0)));
        let second = Arc::new(CountingWaker(AtomicUsize::new(0)));

        let first_waker = Waker::from(first.clone());
        let second_waker = Waker::from(second.clone());

        let mut sleep = sleep(Duration::from_millis(100));

        let mut cx = Context::from_waker(&first_waker);
        assert!(Pin::new(&mut sleep).poll(&mut cx).is_pending());

        let armed = sleep.timer.as_ref().map(Arc::as_ptr);

        let mut cx = Context::from_waker(&second_waker);
        assert!(Pin::new(&mut sleep).poll(&mut cx).is_pending());

        assert_eq!(sleep.timer.as_ref().map(Arc::as_ptr), armed);

        wait_for_wakes(&second, 1);

        assert_eq!(first.0.load(Ordering::SeqCst), 0);
        assert!(Pin::new(&mut sleep).poll(&mut cx).is_ready());
    }
}
