//! Repository for the `trainings` table.

use chrono::NaiveDate;
use hrdc_core::types::DbId;
use sqlx::PgPool;

use crate::models::status::TrainingStatus;
use crate::models::training::{CreateTraining, Training, UpdateTraining};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, trainer, venue, mode, start_date, end_date, \
     start_time, end_time, valid_till, capacity, eligibility, status_id, created_at, updated_at";

/// Default delivery mode when a create DTO leaves it unset.
const DEFAULT_MODE: &str = "offline";

/// Provides CRUD operations for trainings.
pub struct TrainingRepo;

impl TrainingRepo {
    /// Insert a new training in the `Scheduled` state, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTraining) -> Result<Training, sqlx::Error> {
        let query = format!(
            "INSERT INTO trainings (title, description, trainer, venue, mode, start_date, \
                end_date, start_time, end_time, valid_till, capacity, eligibility, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Training>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.trainer)
            .bind(&input.venue)
            .bind(input.mode.as_deref().unwrap_or(DEFAULT_MODE))
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.valid_till)
            .bind(input.capacity)
            .bind(&input.eligibility)
            .bind(TrainingStatus::Scheduled.id())
            .fetch_one(pool)
            .await
    }

    /// Find a training by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Training>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM trainings WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Training>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all active trainings, soonest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Training>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trainings WHERE deleted_at IS NULL \
             ORDER BY start_date, id"
        );
        sqlx::query_as::<_, Training>(&query).fetch_all(pool).await
    }

    /// Active, non-cancelled trainings whose start date is exactly `date`.
    pub async fn list_starting_on(
        pool: &PgPool,
        date: NaiveDate,
    ) -> Result<Vec<Training>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trainings \
             WHERE start_date = $1 AND status_id <> $2 AND deleted_at IS NULL \
             ORDER BY id"
        );
        sqlx::query_as::<_, Training>(&query)
            .bind(date)
            .bind(TrainingStatus::Cancelled.id())
            .fetch_all(pool)
            .await
    }

    /// Update a training. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTraining,
    ) -> Result<Option<Training>, sqlx::Error> {
        let query = format!(
            "UPDATE trainings SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                trainer = COALESCE($4, trainer),
                venue = COALESCE($5, venue),
                mode = COALESCE($6, mode),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date),
                start_time = COALESCE($9, start_time),
                end_time = COALESCE($10, end_time),
                valid_till = COALESCE($11, valid_till),
                capacity = COALESCE($12, capacity),
                eligibility = COALESCE($13, eligibility),
                status_id = COALESCE($14, status_id),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Training>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.trainer)
            .bind(&input.venue)
            .bind(&input.mode)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.valid_till)
            .bind(input.capacity)
            .bind(&input.eligibility)
            .bind(input.status_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a training by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE trainings SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
