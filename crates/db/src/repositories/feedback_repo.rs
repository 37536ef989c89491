//! Repository for the `feedback` table.

use hrdc_core::types::DbId;
use sqlx::PgPool;

use crate::models::feedback::{CreateFeedback, Feedback};

/// Column list for `feedback` queries.
const COLUMNS: &str = "f.id, f.registration_id, f.rating, f.comments, f.created_at";

/// Provides insert/read operations for feedback.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Store feedback for a registration. A second submission violates
    /// `uq_feedback_registration`.
    pub async fn create(
        pool: &PgPool,
        registration_id: DbId,
        input: &CreateFeedback,
    ) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback AS f (registration_id, rating, comments)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(registration_id)
            .bind(input.rating)
            .bind(&input.comments)
            .fetch_one(pool)
            .await
    }

    /// All feedback left on a training, newest first.
    pub async fn list_for_training(
        pool: &PgPool,
        training_id: DbId,
    ) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feedback f \
             JOIN training_registrations r ON r.id = f.registration_id \
             WHERE r.training_id = $1 \
             ORDER BY f.created_at DESC, f.id DESC"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(training_id)
            .fetch_all(pool)
            .await
    }
}
