//! Periodic health re-enable sweep.
//!
//! A background task owned by the coordinator's lifecycle: started
//! explicitly, runs on a fixed period independent of translation traffic,
//! and stops on the shutdown signal.

use crate::Coordinator;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

impl Coordinator {
    /// Start the periodic re-enable sweep.
    ///
    /// Returns a [`JoinHandle`]. The task stops when `shutdown` receives
    /// or the handle is aborted. The first sweep runs one full period
    /// after start, not immediately.
    pub fn start_sweeper(&self, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        let coordinator = self.clone();
        let period = coordinator.sweep_period();
        tokio::spawn(async move {
            tracing::info!("health sweeper started with period {period:?}");
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let reenabled = coordinator.sweep();
                        if reenabled > 0 {
                            tracing::info!("sweep re-enabled {reenabled} provider(s)");
                        }
                    }
                    _ = shutdown.recv() => {
                        tracing::info!("health sweeper shutting down");
                        return;
                    }
                }
            }
        })
    }
}
