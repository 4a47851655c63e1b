//! # Clock Task
//!
//! Keeps the on-screen date/time current by re-reading the clock on a fixed
//! period. Readers get the latest value from a `watch` channel, so a reading
//! is always available without waiting for the next tick.

use std::time::Duration;

use quickbill_core::ClockReading;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

/// Handle to the running clock task.
pub struct ClockHandle {
    rx: watch::Receiver<ClockReading>,
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl ClockHandle {
    /// A receiver that always holds the latest reading.
    pub fn subscribe(&self) -> watch::Receiver<ClockReading> {
        self.rx.clone()
    }

    /// The latest reading.
    pub fn reading(&self) -> ClockReading {
        self.rx.borrow().clone()
    }

    /// Stops the task. No readings are taken after this returns.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            debug!(error = %e, "Clock task ended abnormally");
        }
        info!("Clock stopped");
    }
}

/// Starts refreshing the clock every `period`.
///
/// The first reading is taken immediately.
pub fn spawn_clock<F>(period: Duration, source: F) -> ClockHandle
where
    F: Fn() -> ClockReading + Send + 'static,
{
    let (tx, rx) = watch::channel(source());
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the initial reading covers it.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if tx.send(source()).is_err() {
                        debug!("All clock readers dropped");
                        break;
                    }
                }
                _ = shutdown_rx.recv() => {
                    break;
                }
            }
        }
    });

    info!(period_secs = period.as_secs(), "Clock started");
    ClockHandle {
        rx,
        shutdown_tx,
        task,
    }
}
