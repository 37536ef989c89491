//! Live-push capability.
//!
//! Implemented by the WebSocket connection registry in the API crate. The
//! event pipeline only ever pushes best-effort: callers log a [`PushError`]
//! and carry on.

use async_trait::async_trait;
use hrdc_core::types::DbId;

/// Error raised when a live push cannot be delivered at all.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The payload could not be serialized into a frame.
    #[error("Failed to encode push payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// The push channel is gone (e.g. during shutdown).
    #[error("Live push unavailable: {0}")]
    Unavailable(String),
}

/// Pushes named events to connected clients.
///
/// Both methods return the number of connections the event was handed to;
/// zero is not an error.
#[async_trait]
pub trait LivePush: Send + Sync {
    async fn publish_to_user(
        &self,
        user_id: DbId,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<usize, PushError>;

    async fn publish_to_group(
        &self,
        group: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<usize, PushError>;
}
