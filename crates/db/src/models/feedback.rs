//! Training feedback model and DTOs.

use hrdc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `feedback` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub registration_id: DbId,
    pub rating: i16,
    pub comments: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for submitting feedback on a registration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFeedback {
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    #[validate(length(max = 4000))]
    pub comments: Option<String>,
}
