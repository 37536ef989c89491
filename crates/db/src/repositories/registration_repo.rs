//! Repository for the `training_registrations` table.

use hrdc_core::types::DbId;
use sqlx::PgPool;

use crate::models::registration::{Registration, RegistrationDetail};
use crate::models::status::ConfirmationStatus;

/// Column list for `training_registrations` queries.
const COLUMNS: &str = "id, training_id, employee_id, applied, confirmation_id, decided_at, \
     created_at, updated_at";

/// Joined select for [`RegistrationDetail`], restricted to active rows.
const DETAIL_SELECT: &str = "SELECT r.id, r.training_id, t.title AS training_title, \
     t.start_date, t.end_date, r.employee_id, e.name AS employee_name, e.user_id, u.email, \
     r.confirmation_id, r.decided_at, r.created_at \
     FROM training_registrations r \
     JOIN trainings t ON t.id = r.training_id \
     JOIN employees e ON e.id = r.employee_id \
     JOIN users u ON u.id = e.user_id \
     WHERE r.deleted_at IS NULL AND e.deleted_at IS NULL";

/// Provides CRUD operations for registrations.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Register an employee for a training as a pending application.
    ///
    /// A second active registration for the same pair violates
    /// `uq_registrations_training_employee`.
    pub async fn create(
        pool: &PgPool,
        training_id: DbId,
        employee_id: DbId,
    ) -> Result<Registration, sqlx::Error> {
        let query = format!(
            "INSERT INTO training_registrations (training_id, employee_id, applied, confirmation_id)
             VALUES ($1, $2, true, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(training_id)
            .bind(employee_id)
            .bind(ConfirmationStatus::Pending.id())
            .fetch_one(pool)
            .await
    }

    /// Register an employee only while the training has a free seat.
    ///
    /// The training row is locked for the count and insert, so concurrent
    /// applicants cannot take more seats than `capacity`. Returns `None`
    /// when the training is full or no longer active.
    pub async fn create_within_capacity(
        pool: &PgPool,
        training_id: DbId,
        employee_id: DbId,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let capacity: Option<i32> = sqlx::query_scalar(
            "SELECT capacity FROM trainings WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(training_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(capacity) = capacity else {
            return Ok(None);
        };

        let taken: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM training_registrations \
             WHERE training_id = $1 AND deleted_at IS NULL AND confirmation_id <> $2",
        )
        .bind(training_id)
        .bind(ConfirmationStatus::Rejected.id())
        .fetch_one(&mut *tx)
        .await?;
        if taken >= i64::from(capacity) {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO training_registrations (training_id, employee_id, applied, confirmation_id)
             VALUES ($1, $2, true, $3)
             RETURNING {COLUMNS}"
        );
        let registration = sqlx::query_as::<_, Registration>(&query)
            .bind(training_id)
            .bind(employee_id)
            .bind(ConfirmationStatus::Pending.id())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(registration))
    }

    /// Find an active registration by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM training_registrations WHERE id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active registration with its joined training and employee.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RegistrationDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} AND r.id = $1");
        sqlx::query_as::<_, RegistrationDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Number of active registrations that still hold a seat (not rejected).
    pub async fn count_active(pool: &PgPool, training_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM training_registrations \
             WHERE training_id = $1 AND deleted_at IS NULL AND confirmation_id <> $2",
        )
        .bind(training_id)
        .bind(ConfirmationStatus::Rejected.id())
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// All active registrations for a training, oldest first.
    pub async fn list_for_training(
        pool: &PgPool,
        training_id: DbId,
    ) -> Result<Vec<RegistrationDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} AND r.training_id = $1 ORDER BY r.created_at, r.id");
        sqlx::query_as::<_, RegistrationDetail>(&query)
            .bind(training_id)
            .fetch_all(pool)
            .await
    }

    /// All active registrations for an employee, newest training first.
    pub async fn list_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<RegistrationDetail>, sqlx::Error> {
        let query =
            format!("{DETAIL_SELECT} AND r.employee_id = $1 ORDER BY t.start_date DESC, r.id");
        sqlx::query_as::<_, RegistrationDetail>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    /// Approved, active registrations for a training whose account is active.
    pub async fn list_confirmed(
        pool: &PgPool,
        training_id: DbId,
    ) -> Result<Vec<RegistrationDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT} AND r.training_id = $1 AND r.confirmation_id = $2 \
             AND u.deleted_at IS NULL AND u.is_active = true \
             ORDER BY r.id"
        );
        sqlx::query_as::<_, RegistrationDetail>(&query)
            .bind(training_id)
            .bind(ConfirmationStatus::Approved.id())
            .fetch_all(pool)
            .await
    }

    /// Record an administrator's decision. Returns `None` if the row is gone.
    pub async fn set_confirmation(
        pool: &PgPool,
        id: DbId,
        status: ConfirmationStatus,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!(
            "UPDATE training_registrations
             SET confirmation_id = $2, decided_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .bind(status.id())
            .fetch_optional(pool)
            .await
    }

    /// Soft-cancel a registration. Returns `true` if a row was cancelled.
    pub async fn soft_cancel(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE training_registrations SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
