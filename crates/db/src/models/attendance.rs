//! Attendance model and DTOs.

use chrono::NaiveDate;
use hrdc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `attendance` table. Immutable once written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub registration_id: DbId,
    pub attended_on: NaiveDate,
    pub is_present: bool,
    pub created_at: Timestamp,
}

/// One registrant's presence in an attendance submission.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceEntry {
    pub registration_id: DbId,
    pub is_present: bool,
}

/// DTO for submitting a training's attendance sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAttendance {
    /// Defaults to the training's end date.
    pub attended_on: Option<NaiveDate>,
    pub entries: Vec<AttendanceEntry>,
}
