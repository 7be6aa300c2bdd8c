//! Ended-run cleanup background task

use std::{sync::Arc, time::Duration};
use chrono::Utc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Background task that periodically drops runs that have ended
pub async fn cleanup_task(state: Arc<AppState>, every: Duration) {
    info!("Starting cleanup task, running every {}s", every.as_secs());

    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let now = Utc::now();
        match state.purge_ended_runs(now) {
            Ok(0) => debug!("No ended runs to delete"),
            Ok(removed) => info!("Deleted {} obsolete runs, ended before {}", removed, now),
            Err(e) => warn!("Failed to purge ended runs: {}", e),
        }
    }
}
