use std::sync::Arc;

use hrdc_events::{LivePush, NotificationQueue, NotificationWriter, PgStore};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hrdc_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager; also the live-push sink.
    pub ws_manager: Arc<WsManager>,
    /// Training email jobs waiting for the dispatcher.
    pub email_queue: Arc<NotificationQueue>,
    /// In-app notification writer.
    pub notifier: NotificationWriter,
}

impl AppState {
    /// Wire the notification writer onto the pool and the WebSocket registry.
    pub fn new(
        pool: hrdc_db::DbPool,
        config: ServerConfig,
        ws_manager: Arc<WsManager>,
        email_queue: Arc<NotificationQueue>,
    ) -> Self {
        let push: Arc<dyn LivePush> = ws_manager.clone();
        let notifier = NotificationWriter::new(Arc::new(PgStore::new(pool.clone())), push);

        Self {
            pool,
            config: Arc::new(config),
            ws_manager,
            email_queue,
            notifier,
        }
    }
}
