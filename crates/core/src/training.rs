//! Training scheduling rules and notification trigger kinds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Days ahead of a training's start date on which reminders go out.
pub const DEFAULT_REMINDER_OFFSETS: &[i64] = &[3, 1];

/// Why a training email job was queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Created,
    Updated,
    Reminder,
}

impl TriggerType {
    /// Stable lowercase name used in logs and payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Reminder => "reminder",
        }
    }
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a training's date window and capacity.
///
/// - `end_date` must not precede `start_date`.
/// - `valid_till`, when set, must not precede `end_date`.
/// - `capacity` must be positive.
pub fn validate_schedule(
    start_date: NaiveDate,
    end_date: NaiveDate,
    valid_till: Option<NaiveDate>,
    capacity: i32,
) -> Result<(), CoreError> {
    if end_date < start_date {
        return Err(CoreError::Validation(
            "end_date must be on or after start_date".into(),
        ));
    }
    if valid_till.is_some_and(|v| v < end_date) {
        return Err(CoreError::Validation(
            "valid_till must be on or after end_date".into(),
        ));
    }
    if capacity <= 0 {
        return Err(CoreError::Validation("capacity must be positive".into()));
    }
    Ok(())
}

/// Human wording for "in N days" used in reminder messages.
pub fn days_phrase(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// In-app reminder body for a training starting `days` from today.
pub fn reminder_message(training_title: &str, start_date: NaiveDate, days: i64) -> String {
    format!(
        "Reminder: the training '{training_title}' starts in {} on {}.",
        days_phrase(days),
        start_date.format("%d %b %Y")
    )
}
