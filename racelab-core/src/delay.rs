//! Simulated processing delay
//!
//! Every strategy suspends for the requested number of milliseconds between
//! writing and reading its state. The suspension yields the task without
//! holding any lock, so concurrent calls interleave freely during it. The
//! sleep races a shutdown channel: when the server begins shutting down,
//! in-flight delays end early with [`DelayOutcome::Interrupted`], which
//! callers log and recover from locally rather than failing the call.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// How a simulated delay ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayOutcome {
    /// The full delay elapsed
    Completed,
    /// Shutdown fired before the delay elapsed
    Interrupted,
}

/// Sender half of the shutdown channel, held by the server
#[derive(Debug)]
pub struct ShutdownController {
    tx: watch::Sender<bool>,
}

impl ShutdownController {
    /// Signal shutdown to every in-flight delay.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

/// Receiver half of the shutdown channel, cloned into each strategy
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
    // Keeps the channel open for signals that should never fire.
    _hold: Option<Arc<watch::Sender<bool>>>,
}

impl ShutdownSignal {
    /// A signal that never fires, for callers without a server lifecycle
    /// (tests, the in-process harness).
    pub fn none() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            rx,
            _hold: Some(Arc::new(tx)),
        }
    }

    fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }
}

/// Create a connected controller/signal pair.
pub fn shutdown_channel() -> (ShutdownController, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownController { tx }, ShutdownSignal { rx, _hold: None })
}

/// Suspend the calling task for at least `delay_ms` milliseconds.
///
/// Holds no lock while suspended. A zero delay still yields once so that a
/// suspension point exists for every call.
pub async fn simulate_processing(delay_ms: u64, shutdown: &ShutdownSignal) -> DelayOutcome {
    if shutdown.is_triggered() {
        return DelayOutcome::Interrupted;
    }
    if delay_ms == 0 {
        tokio::task::yield_now().await;
        return DelayOutcome::Completed;
    }

    let sleep = tokio::time::sleep(Duration::from_millis(delay_ms));
    tokio::pin!(sleep);
    let mut rx = shutdown.rx.clone();

    loop {
        tokio::select! {
            _ = &mut sleep => return DelayOutcome::Completed,
            changed = rx.changed() => match changed {
                Ok(()) if *rx.borrow() => return DelayOutcome::Interrupted,
                // A send of `false` never happens, but keep waiting if it did.
                Ok(()) => continue,
                // Controller dropped without triggering: finish the sleep.
                Err(_) => {
                    sleep.as_mut().await;
                    return DelayOutcome::Completed;
                }
            },
        }
    }
}
