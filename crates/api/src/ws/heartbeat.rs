use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ws::manager::WsManager;

/// Interval between heartbeat pings.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Ping every connected client on [`HEARTBEAT_INTERVAL`] until `cancel`
/// fires. Dead peers surface as send errors in their socket task.
pub fn start_heartbeat(ws_manager: Arc<WsManager>, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let count = ws_manager.connection_count().await;
                    if count > 0 {
                        tracing::debug!(count, "WebSocket heartbeat ping");
                        ws_manager.ping_all().await;
                    }
                }
            }
        }
        tracing::debug!("WebSocket heartbeat stopped");
    })
}
