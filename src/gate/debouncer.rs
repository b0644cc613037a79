//! Trailing debounce for show entry points.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Collapses bursts of calls into one.
///
/// Each `call` restarts the window; when the window elapses without another
/// call, the callback fires once with the arguments of the last call.
/// Must be used from within a tokio runtime.
pub struct Debouncer<T> {
    window: Duration,
    callback: Callback<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            window,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    /// Schedule the callback, replacing any call still inside the window.
    pub fn call(&self, args: T) {
        let mut pending = self.lock();
        if let Some(previous) = pending.take() {
            if !previous.is_finished() {
                tracing::trace!("debounce: coalescing call into pending window");
            }
            previous.abort();
        }

        let callback = Arc::clone(&self.callback);
        let window = self.window;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            callback(args);
        }));
    }

    /// Drop the pending call. Returns true if one was waiting.
    pub fn cancel(&self) -> bool {
        match self.lock().take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// Whether a call is waiting for its window to elapse.
    pub fn is_pending(&self) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
