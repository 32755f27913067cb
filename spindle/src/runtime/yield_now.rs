use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A future that yields back to the executor exactly once.
struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    /// On the first poll the task wakes itself and returns `Poll::Pending`,
    /// which puts it at the back of the ready queue. The second poll
    /// completes.
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.yielded {
            return Poll::Ready(());
        }

        self.yielded = true;
        cx.waker().wake_by_ref();

        Poll::Pending
    }
}

/// Yields execution back to the executor.
///
/// Every task queued ahead of the current one runs before it continues.
///
/// # Examples
///
/// ```rust,ignore
/// async fn task() {
///     // Let other tasks make progress
///     spindle::yield_now().await;
/// }
/// ```
pub async fn yield_now() {
    YieldNow { yielded: false }.await
}
