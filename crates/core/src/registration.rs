//! Registration workflow rules (apply, cancel, decide, attend, review).

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::CoreError;

/// Lowest accepted feedback rating.
pub const MIN_RATING: i16 = 1;

/// Highest accepted feedback rating.
pub const MAX_RATING: i16 = 5;

/// An administrator's verdict on a pending registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Title used for the notification sent to the registrant.
    pub fn notification_title(self) -> &'static str {
        match self {
            Self::Approve => "Registration Approved",
            Self::Reject => "Registration Rejected",
        }
    }

    /// Notification body for the registrant.
    pub fn notification_message(self, training_title: &str) -> String {
        match self {
            Self::Approve => {
                format!("Your registration for '{training_title}' has been approved.")
            }
            Self::Reject => {
                format!("Your registration for '{training_title}' has been rejected.")
            }
        }
    }
}

/// Employees may register only before the training starts and while seats remain.
pub fn check_registration_open(
    start_date: NaiveDate,
    today: NaiveDate,
    active_registrations: i64,
    capacity: i32,
) -> Result<(), CoreError> {
    if today >= start_date {
        return Err(CoreError::Conflict(
            "Registration is closed: the training has already started".into(),
        ));
    }
    if active_registrations >= i64::from(capacity) {
        return Err(CoreError::Conflict("The training is full".into()));
    }
    Ok(())
}

/// A registration can be cancelled by its employee only before the start date.
pub fn check_cancellation_allowed(start_date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if today >= start_date {
        return Err(CoreError::Conflict(
            "A registration cannot be cancelled once the training has started".into(),
        ));
    }
    Ok(())
}

/// Attendance is recorded once the training has ended.
pub fn check_attendance_open(end_date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if today < end_date {
        return Err(CoreError::Conflict(
            "Attendance can only be submitted after the training ends".into(),
        ));
    }
    Ok(())
}

/// Validate a feedback rating.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}
