//! Periodic eviction of idle sessions.
//!
//! Dropping a session drops its in-memory video, so this bounds memory held
//! by operators who never come back.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::session::SessionStore;

/// Run the eviction loop until `cancel` is triggered.
pub async fn run(sessions: Arc<SessionStore>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Session eviction job started"
    );

    let mut interval = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session eviction job stopping");
                break;
            }
            _ = interval.tick() => {
                let evicted = sessions.evict_idle().await;
                if evicted > 0 {
                    tracing::info!(evicted, "Session eviction: dropped idle sessions");
                } else {
                    tracing::debug!("Session eviction: nothing to drop");
                }
            }
        }
    }
}
