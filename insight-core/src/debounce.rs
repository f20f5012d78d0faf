//! Quiet-period gate for bursts of user input.

use std::{fmt, sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::warn;

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Invokes its callback with the most recent value once no further
/// [`Debouncer::call`] has arrived for `delay`.
///
/// Each call aborts the previously armed timer. Dropping the debouncer (or
/// calling [`Debouncer::cancel`]) disarms it, so a callback never fires into
/// an owner that has been torn down.
pub struct Debouncer<T> {
    delay: Duration,
    callback: Callback<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.pending.lock().is_some())
            .finish()
    }
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the quiet period with `value` as the payload to deliver.
    ///
    /// Must be called from within a tokio runtime; outside one the call is
    /// dropped with a warning.
    pub fn call(&self, value: T) {
        let Ok(handle) = Handle::try_current() else {
            warn!("debounced call dropped: no tokio runtime");
            return;
        };

        let delay = self.delay;
        let callback = Arc::clone(&self.callback);

        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            callback(value);
        }));
    }

    /// Disarm the timer without firing.
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }

    /// A timer is armed and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(previous) = self.pending.get_mut().take() {
            previous.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value| sink.lock().push(value))
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_with_last_value_after_quiet_period() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(300), callback);

        debouncer.call(1);
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.call(2);
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.call(3);
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(seen.lock().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*seen.lock(), vec![3]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_disarms_timer() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(200), callback);

        debouncer.call(7);
        debouncer.cancel();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(seen.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_prevents_late_fire() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let debouncer = Debouncer::new(Duration::from_millis(50), move |_: ()| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        debouncer.call(());
        drop(debouncer);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn call_outside_runtime_is_ignored() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(10), callback);
        debouncer.call(1);
        assert!(!debouncer.is_pending());
        assert!(seen.lock().is_empty());
    }
}
