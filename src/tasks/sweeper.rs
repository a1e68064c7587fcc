//! TTL Sweeper Task
//!
//! Background task that periodically removes expired entries from every
//! registered cache, keeping the Live-Key Index bounded. Lazy expiry checks
//! on read make this a liveness concern only, never a correctness one.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheRegistry;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. Each sweep re-reads every entry's current expiry under the
/// store lock, so an entry overwritten with a fresh TTL since the previous
/// sweep is left alone.
///
/// Returns a JoinHandle which can be used to abort the task during graceful
/// shutdown.
pub fn spawn_sweeper_task(
    registry: Arc<CacheRegistry>,
    sweep_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL sweeper task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            let removed = registry.sweep_expired().await;

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
