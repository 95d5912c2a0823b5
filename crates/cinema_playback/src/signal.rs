//! Level-triggered stop signal.

use std::sync::Arc;
use tokio::sync::watch;

/// Create a connected stop handle and signal.
///
/// Once [`StopHandle::stop`] is called the signal stays raised, so a stop
/// that lands before the run first checks is still seen.
///
/// # Examples
///
/// ```
/// use cinema_playback::stop_signal;
///
/// let (handle, signal) = stop_signal();
/// assert!(!signal.is_stopped());
/// handle.stop();
/// assert!(signal.is_stopped());
/// ```
pub fn stop_signal() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx: Arc::new(tx) }, StopSignal { rx })
}

/// Owner side: requests the stop.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    /// Raise the signal. Calling again is harmless.
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    /// Whether the signal has been raised.
    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Run side: observed by the scheduler.
#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    /// A signal nobody can raise.
    pub fn never() -> Self {
        let (_, signal) = stop_signal();
        signal
    }

    /// Whether the signal has been raised.
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the signal is raised.
    ///
    /// Never resolves if every handle was dropped without stopping.
    pub async fn stopped(&self) {
        let mut rx = self.rx.clone();
        let raised = rx.wait_for(|stopped| *stopped).await.map(|_| ());
        if raised.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
