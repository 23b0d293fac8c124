//! Periodic cache refresh.

use super::*;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Background task that keeps hot cache entries warm.
///
/// Each tick snapshots the store's current keys and re-fetches them through
/// the aggregator. Per-key failures are logged and leave the entry
/// untouched; the loop itself never terminates early. Keys added after a
/// snapshot wait for the next tick, and the refresher never creates keys.
pub struct PeriodicRefresher {
    running: Option<RefreshTask>,
}

struct RefreshTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl PeriodicRefresher {
    pub fn new() -> Self {
        Self { running: None }
    }

    /// Whether the refresh task is currently running.
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start the refresh loop. Calling while already running is a no-op.
    pub fn start(
        &mut self,
        aggregator: Arc<Aggregator>,
        interval: std::time::Duration,
    ) {
        if self.running.is_some() {
            return;
        }
        tracing::info!(
            "Periodic refresh started, interval {}s.",
            interval.as_secs()
        );
        let cancel = CancellationToken::new();
        let handle =
            tokio::task::spawn(run_refresh(aggregator, interval, cancel.clone()));
        self.running = Some(RefreshTask { cancel, handle });
    }

    /// Stop the refresh loop. Safe to call from any teardown path; calling
    /// while not running is a no-op. A tick already in progress finishes.
    pub fn stop(&mut self) {
        if let Some(task) = self.running.take() {
            task.cancel.cancel();
            drop(task.handle);
            tracing::info!("Periodic refresh stopped.");
        }
    }
}

impl Default for PeriodicRefresher {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_refresh(
    aggregator: Arc<Aggregator>,
    interval: std::time::Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first interval tick completes immediately; consume it so the first
    // refresh runs one full interval after start.
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = ticker.tick() => refresh_all(&aggregator).await,
            _ = cancel.cancelled() => break,
        };
    }
}

/// One refresh pass over the current key snapshot.
pub async fn refresh_all(aggregator: &Aggregator) {
    let keys = aggregator.cache().lock().await.keys();
    if keys.is_empty() {
        tracing::trace!("Nothing cached; skipping refresh.");
        return;
    }
    tracing::info!("Refreshing {} cached key(s).", keys.len());
    for key in keys {
        match aggregator.refresh_key(&key).await {
            Ok(count) => {
                tracing::debug!("Refreshed \"{}\": {} article(s).", key, count)
            }
            Err(e) => tracing::warn!("Refresh failed for \"{}\": {}.", key, e),
        }
    }
}
