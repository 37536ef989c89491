//! Repository for the `attendance` table.

use chrono::NaiveDate;
use hrdc_core::types::DbId;
use sqlx::PgPool;

use crate::models::attendance::{Attendance, AttendanceEntry};

/// Column list for `attendance` queries.
const COLUMNS: &str = "a.id, a.registration_id, a.attended_on, a.is_present, a.created_at";

/// Provides insert/read operations for attendance. Rows are never updated.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Whether any attendance has been recorded for the training.
    pub async fn exists_for_training(pool: &PgPool, training_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM attendance a \
             JOIN training_registrations r ON r.id = a.registration_id \
             WHERE r.training_id = $1)",
        )
        .bind(training_id)
        .fetch_one(pool)
        .await
    }

    /// Insert a whole attendance sheet in one transaction.
    ///
    /// A duplicate (registration, date) pair violates
    /// `uq_attendance_registration_date` and rolls the whole sheet back.
    pub async fn insert_sheet(
        pool: &PgPool,
        attended_on: NaiveDate,
        entries: &[AttendanceEntry],
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut rows = Vec::with_capacity(entries.len());

        for entry in entries {
            let row = sqlx::query_as::<_, Attendance>(
                "INSERT INTO attendance AS a (registration_id, attended_on, is_present) \
                 VALUES ($1, $2, $3) \
                 RETURNING a.id, a.registration_id, a.attended_on, a.is_present, a.created_at",
            )
            .bind(entry.registration_id)
            .bind(attended_on)
            .bind(entry.is_present)
            .fetch_one(&mut *tx)
            .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(rows)
    }

    /// Attendance for a training, by date then registration.
    pub async fn list_for_training(
        pool: &PgPool,
        training_id: DbId,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance a \
             JOIN training_registrations r ON r.id = a.registration_id \
             WHERE r.training_id = $1 \
             ORDER BY a.attended_on, a.registration_id"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(training_id)
            .fetch_all(pool)
            .await
    }
}
