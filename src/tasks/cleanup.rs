//! Name Cache Cleanup Task
//!
//! Background task that periodically removes expired creator display names.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::UserNameCache;

/// Spawns a background task that periodically prunes expired creator names.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between prune runs.
///
/// # Arguments
/// * `names` - Shared creator name cache
/// * `cleanup_interval_secs` - Interval in seconds between prune runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(names: Arc<UserNameCache>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting name cache cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = names.prune_expired();
            if removed > 0 {
                info!("Name cache cleanup: removed {} expired names", removed);
            } else {
                debug!("Name cache cleanup: no expired names found");
            }
        }
    })
}
