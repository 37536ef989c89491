//! Training program entity model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use hrdc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::status::StatusId;

/// A row from the `trainings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Training {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub trainer: String,
    pub venue: String,
    pub mode: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub valid_till: Option<NaiveDate>,
    pub capacity: i32,
    pub eligibility: Option<String>,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new training.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTraining {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub trainer: String,
    #[serde(default)]
    pub venue: String,
    /// Defaults to `offline` if omitted.
    pub mode: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub valid_till: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub capacity: i32,
    pub eligibility: Option<String>,
}

/// DTO for updating an existing training. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTraining {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub trainer: Option<String>,
    pub venue: Option<String>,
    pub mode: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub valid_till: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub eligibility: Option<String>,
    pub status_id: Option<StatusId>,
}
