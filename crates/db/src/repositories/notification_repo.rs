//! Repository for the `notifications` table.
//!
//! Visibility rule used by every reader: a user sees rows addressed to them
//! plus role broadcasts (`user_id IS NULL`) for their role.

use hrdc_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::Notification;

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, user_id, role, title, message, is_read, read_at, created_at";

/// Visibility predicate; binds `$1` = user id, `$2` = role.
const VISIBLE_TO: &str = "deleted_at IS NULL \
     AND (user_id = $1 OR (user_id IS NULL AND role = $2))";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert an unread notification. Exactly one of `user_id` / `role` must
    /// be set; the CHECK constraint rejects anything else.
    pub async fn create(
        pool: &PgPool,
        user_id: Option<DbId>,
        role: Option<&str>,
        title: &str,
        message: &str,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, role, title, message) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(role)
            .bind(title)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    /// Find an active notification by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM notifications WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All notifications visible to `(user_id, role)`, newest first.
    pub async fn list_visible(
        pool: &PgPool,
        user_id: DbId,
        role: &str,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications WHERE {VISIBLE_TO} \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    /// Number of unread notifications visible to `(user_id, role)`.
    pub async fn unread_count(pool: &PgPool, user_id: DbId, role: &str) -> Result<i64, sqlx::Error> {
        let query =
            format!("SELECT COUNT(*) FROM notifications WHERE {VISIBLE_TO} AND is_read = false");
        let count: Option<i64> = sqlx::query_scalar(&query)
            .bind(user_id)
            .bind(role)
            .fetch_one(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    /// Mark a notification as read and return it.
    ///
    /// Idempotent: an already-read row is returned unchanged (its `read_at`
    /// keeps the first read time). Returns `None` for unknown IDs.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "UPDATE notifications \
             SET is_read = true, read_at = COALESCE(read_at, NOW()) \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark every unread notification visible to `(user_id, role)` as read.
    ///
    /// Returns the number of rows flipped.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId, role: &str) -> Result<u64, sqlx::Error> {
        let query = format!(
            "UPDATE notifications SET is_read = true, read_at = NOW() \
             WHERE {VISIBLE_TO} AND is_read = false"
        );
        let result = sqlx::query(&query)
            .bind(user_id)
            .bind(role)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
