//! In-app notification writer.
//!
//! [`NotificationWriter`] is the single place notifications are created and
//! read-tracked. Every write goes to the store first; the live push that
//! follows is best-effort and never fails the caller.

use std::sync::Arc;

use hrdc_core::error::CoreError;
use hrdc_core::notification::{
    NotificationTarget, EVENT_NOTIFICATION, EVENT_NOTIFICATION_ALL_READ, EVENT_NOTIFICATION_READ,
};
use hrdc_core::types::DbId;
use hrdc_db::models::notification::Notification;
use serde_json::json;

use crate::live::LivePush;
use crate::store::NotificationStore;

/// Error type for notification writes and reads.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The request was malformed (e.g. no target, or two).
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The store rejected or failed the operation.
    #[error("Notification store error: {0}")]
    Store(#[from] sqlx::Error),
}

/// Persists notifications and pushes them to connected clients.
#[derive(Clone)]
pub struct NotificationWriter {
    store: Arc<dyn NotificationStore>,
    push: Arc<dyn LivePush>,
}

impl NotificationWriter {
    pub fn new(store: Arc<dyn NotificationStore>, push: Arc<dyn LivePush>) -> Self {
        Self { store, push }
    }

    /// Persist an unread notification, then push it live.
    ///
    /// User targets are pushed to that user's connections; role targets to
    /// the role's group.
    pub async fn create(
        &self,
        target: &NotificationTarget,
        title: &str,
        message: &str,
    ) -> Result<Notification, NotifyError> {
        let notification = self.store.insert(target, title, message).await?;

        tracing::debug!(
            notification_id = notification.id,
            target = ?target,
            "Notification stored"
        );

        match serde_json::to_value(&notification) {
            Ok(payload) => {
                let pushed = match target {
                    NotificationTarget::User(user_id) => {
                        self.push
                            .publish_to_user(*user_id, EVENT_NOTIFICATION, payload)
                            .await
                    }
                    NotificationTarget::Role(role) => {
                        self.push
                            .publish_to_group(role, EVENT_NOTIFICATION, payload)
                            .await
                    }
                };
                if let Err(e) = pushed {
                    tracing::warn!(
                        notification_id = notification.id,
                        error = %e,
                        "Live push of notification failed"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    notification_id = notification.id,
                    error = %e,
                    "Failed to encode notification for live push"
                );
            }
        }

        Ok(notification)
    }

    /// Loose entry point: exactly one of `user_id` / `role` must be given.
    ///
    /// Returns the new notification's id.
    pub async fn notify(
        &self,
        user_id: Option<DbId>,
        role: Option<&str>,
        title: &str,
        message: &str,
    ) -> Result<DbId, NotifyError> {
        let target = NotificationTarget::from_parts(user_id, role)?;
        let notification = self.create(&target, title, message).await?;
        Ok(notification.id)
    }

    /// Notifications visible to `(user_id, role)`, newest first.
    pub async fn list_for(
        &self,
        user_id: DbId,
        role: &str,
    ) -> Result<Vec<Notification>, NotifyError> {
        Ok(self.store.list_for(user_id, role).await?)
    }

    pub async fn unread_count(&self, user_id: DbId, role: &str) -> Result<i64, NotifyError> {
        Ok(self.store.unread_count(user_id, role).await?)
    }

    /// Mark one notification read. Calling it again is a no-op.
    ///
    /// Returns `None` when the id is unknown.
    pub async fn mark_read(&self, id: DbId) -> Result<Option<Notification>, NotifyError> {
        let Some(notification) = self.store.mark_read(id).await? else {
            return Ok(None);
        };

        if let Some(user_id) = notification.user_id {
            self.push_to_user(user_id, EVENT_NOTIFICATION_READ, json!({ "id": id }))
                .await;
        }

        Ok(Some(notification))
    }

    /// Like [`mark_read`](Self::mark_read), but treats rows the caller cannot
    /// see as unknown.
    pub async fn mark_read_for(
        &self,
        id: DbId,
        user_id: DbId,
        role: &str,
    ) -> Result<Option<Notification>, NotifyError> {
        match self.store.find(id).await? {
            Some(n) if n.is_visible_to(user_id, role) => self.mark_read(id).await,
            _ => Ok(None),
        }
    }

    /// Mark everything visible to `(user_id, role)` as read.
    ///
    /// Returns the number of notifications that changed.
    pub async fn mark_all_read(&self, user_id: DbId, role: &str) -> Result<u64, NotifyError> {
        let count = self.store.mark_all_read(user_id, role).await?;
        self.push_to_user(user_id, EVENT_NOTIFICATION_ALL_READ, json!({ "count": count }))
            .await;
        Ok(count)
    }

    async fn push_to_user(&self, user_id: DbId, event: &str, payload: serde_json::Value) {
        if let Err(e) = self.push.publish_to_user(user_id, event, payload).await {
            tracing::warn!(user_id, event, error = %e, "Live push failed");
        }
    }
}
