//! Notification entity model and DTOs.

use hrdc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `notifications` table.
///
/// Exactly one of `user_id` / `role` is set (enforced by a CHECK constraint).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub role: Option<String>,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Notification {
    /// Whether a caller with `(user_id, role)` may see this row.
    pub fn is_visible_to(&self, user_id: DbId, role: &str) -> bool {
        match self.user_id {
            Some(owner) => owner == user_id,
            None => self.role.as_deref() == Some(role),
        }
    }
}

/// DTO for an administrator sending a notification by hand.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotification {
    pub user_id: Option<DbId>,
    pub role: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub message: String,
}
