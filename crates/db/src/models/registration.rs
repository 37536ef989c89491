//! Training registration model.

use chrono::NaiveDate;
use hrdc_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A row from the `training_registrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub training_id: DbId,
    pub employee_id: DbId,
    pub applied: bool,
    pub confirmation_id: StatusId,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A registration joined with its employee, account and training.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegistrationDetail {
    pub id: DbId,
    pub training_id: DbId,
    pub training_title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub employee_id: DbId,
    pub employee_name: String,
    pub user_id: DbId,
    pub email: String,
    pub confirmation_id: StatusId,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
