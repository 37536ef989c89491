use std::collections::HashMap;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::ws::Message;
use hrdc_core::types::{DbId, Timestamp};
use hrdc_events::{LivePush, PushError};
use serde::Serialize;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// Authenticated user ID.
    pub user_id: DbId,
    /// Role claim; also the push group the connection belongs to.
    pub role: String,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Wire frame for pushed events.
#[derive(Serialize)]
struct PushFrame<'a> {
    event: &'a str,
    data: serde_json::Value,
}

/// Manages all active WebSocket connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new authenticated connection.
    ///
    /// The connection joins the push group named by `role`. Returns the
    /// receiver half of the message channel so the caller can forward
    /// messages to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        user_id: DbId,
        role: &str,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            role: role.to_string(),
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID. This also leaves its group.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Find all connection IDs associated with a given user.
    pub async fn get_by_user(&self, user_id: DbId) -> Vec<String> {
        self.connections
            .read()
            .await
            .iter()
            .filter(|(_, conn)| conn.user_id == user_id)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Number of connections currently in a group.
    pub async fn group_size(&self, group: &str) -> usize {
        self.connections
            .read()
            .await
            .values()
            .filter(|conn| conn.role == group)
            .count()
    }

    /// Send a message to all connections belonging to a specific user.
    ///
    /// Returns the number of connections the message was handed to.
    /// Connections whose channels are closed are skipped; they are cleaned up
    /// when their receive loop ends.
    pub async fn send_to_user(&self, user_id: DbId, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values() {
            if conn.user_id == user_id && conn.sender.send(message.clone()).is_ok() {
                count += 1;
            }
        }
        count
    }

    /// Send a message to every connection in a group.
    pub async fn send_to_group(&self, group: &str, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values() {
            if conn.role == group && conn.sender.send(message.clone()).is_ok() {
                count += 1;
            }
        }
        count
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected client.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_frame(event: &str, payload: serde_json::Value) -> Result<Message, PushError> {
    let text = serde_json::to_string(&PushFrame {
        event,
        data: payload,
    })?;
    Ok(Message::Text(text.into()))
}

#[async_trait]
impl LivePush for WsManager {
    async fn publish_to_user(
        &self,
        user_id: DbId,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<usize, PushError> {
        let message = encode_frame(event, payload)?;
        let delivered = self.send_to_user(user_id, message).await;
        tracing::debug!(user_id, event, delivered, "Pushed event to user");
        Ok(delivered)
    }

    async fn publish_to_group(
        &self,
        group: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<usize, PushError> {
        let message = encode_frame(event, payload)?;
        let delivered = self.send_to_group(group, message).await;
        tracing::debug!(group, event, delivered, "Pushed event to group");
        Ok(delivered)
    }
}
