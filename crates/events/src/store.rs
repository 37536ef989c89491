//! Persistence ports used by the event pipeline, and their Postgres adapter.
//!
//! The dispatcher, notifier and reminder scanner talk to these traits rather
//! than to repositories directly so they can run against in-memory fakes.

use async_trait::async_trait;
use chrono::NaiveDate;
use hrdc_core::notification::NotificationTarget;
use hrdc_core::types::DbId;
use hrdc_db::models::employee::EmployeeAccount;
use hrdc_db::models::notification::Notification;
use hrdc_db::models::registration::RegistrationDetail;
use hrdc_db::models::training::Training;
use hrdc_db::repositories::{EmployeeRepo, NotificationRepo, RegistrationRepo, TrainingRepo};
use hrdc_db::DbPool;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Read access to trainings, candidates and registrations.
#[async_trait]
pub trait TrainingDirectory: Send + Sync {
    /// An active training by id.
    async fn find_training(&self, id: DbId) -> Result<Option<Training>, sqlx::Error>;

    /// Active employees with an active account.
    async fn active_candidates(&self) -> Result<Vec<EmployeeAccount>, sqlx::Error>;

    /// Active, non-cancelled trainings whose start date is `date`.
    async fn trainings_starting_on(&self, date: NaiveDate) -> Result<Vec<Training>, sqlx::Error>;

    /// Approved, active registrations for a training.
    async fn confirmed_registrants(
        &self,
        training_id: DbId,
    ) -> Result<Vec<RegistrationDetail>, sqlx::Error>;
}

/// Storage for in-app notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert(
        &self,
        target: &NotificationTarget,
        title: &str,
        message: &str,
    ) -> Result<Notification, sqlx::Error>;

    async fn find(&self, id: DbId) -> Result<Option<Notification>, sqlx::Error>;

    /// Visible rows, newest first.
    async fn list_for(&self, user_id: DbId, role: &str) -> Result<Vec<Notification>, sqlx::Error>;

    async fn unread_count(&self, user_id: DbId, role: &str) -> Result<i64, sqlx::Error>;

    /// Idempotent; `None` for unknown ids.
    async fn mark_read(&self, id: DbId) -> Result<Option<Notification>, sqlx::Error>;

    /// Returns the number of rows flipped to read.
    async fn mark_all_read(&self, user_id: DbId, role: &str) -> Result<u64, sqlx::Error>;
}

// ---------------------------------------------------------------------------
// PgStore
// ---------------------------------------------------------------------------

/// Postgres-backed implementation of both ports.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrainingDirectory for PgStore {
    async fn find_training(&self, id: DbId) -> Result<Option<Training>, sqlx::Error> {
        TrainingRepo::find_by_id(&self.pool, id).await
    }

    async fn active_candidates(&self) -> Result<Vec<EmployeeAccount>, sqlx::Error> {
        EmployeeRepo::list_active_accounts(&self.pool).await
    }

    async fn trainings_starting_on(&self, date: NaiveDate) -> Result<Vec<Training>, sqlx::Error> {
        TrainingRepo::list_starting_on(&self.pool, date).await
    }

    async fn confirmed_registrants(
        &self,
        training_id: DbId,
    ) -> Result<Vec<RegistrationDetail>, sqlx::Error> {
        RegistrationRepo::list_confirmed(&self.pool, training_id).await
    }
}

#[async_trait]
impl NotificationStore for PgStore {
    async fn insert(
        &self,
        target: &NotificationTarget,
        title: &str,
        message: &str,
    ) -> Result<Notification, sqlx::Error> {
        NotificationRepo::create(&self.pool, target.user_id(), target.role(), title, message).await
    }

    async fn find(&self, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        NotificationRepo::find_by_id(&self.pool, id).await
    }

    async fn list_for(&self, user_id: DbId, role: &str) -> Result<Vec<Notification>, sqlx::Error> {
        NotificationRepo::list_visible(&self.pool, user_id, role).await
    }

    async fn unread_count(&self, user_id: DbId, role: &str) -> Result<i64, sqlx::Error> {
        NotificationRepo::unread_count(&self.pool, user_id, role).await
    }

    async fn mark_read(&self, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        NotificationRepo::mark_read(&self.pool, id).await
    }

    async fn mark_all_read(&self, user_id: DbId, role: &str) -> Result<u64, sqlx::Error> {
        NotificationRepo::mark_all_read(&self.pool, user_id, role).await
    }
}
