//! Background sweep of expired OTP records
//!
//! Lazy deletion only happens when someone verifies; codes that are requested
//! and never verified would otherwise stay in the store forever.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::repositories::OtpStore;

/// Handle to the repeating sweep task.
///
/// [`SweepTask::shutdown`] stops the loop after its current pass; dropping
/// the handle aborts the task.
pub struct SweepTask {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl SweepTask {
    /// Spawn a task that calls [`OtpStore::sweep`] every `interval`.
    ///
    /// The first sweep runs one full interval after spawning.
    pub fn spawn<T>(store: Arc<T>, interval: Duration) -> Self
    where
        T: OtpStore + ?Sized + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            info!(
                interval_ms = interval.as_millis() as u64,
                "OTP sweep task started"
            );

            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        info!("OTP sweep task stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        match store.sweep(Utc::now()).await {
                            Ok(removed) => debug!(removed, "OTP sweep pass completed"),
                            Err(e) => error!(error = %e, "OTP sweep pass failed"),
                        }
                    }
                }
            }
        });

        Self {
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Whether the task is still looping
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Stop the loop and wait for the task to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            // The receiver is gone only if the task already ended
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    error!(error = %e, "OTP sweep task ended abnormally");
                }
            }
        }
    }
}

impl Drop for SweepTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
