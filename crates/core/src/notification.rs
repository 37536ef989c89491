//! Notification addressing and live-push event names.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Live-push event for a newly created notification.
pub const EVENT_NOTIFICATION: &str = "notification";

/// Live-push event sent after a single notification is marked read.
pub const EVENT_NOTIFICATION_READ: &str = "notification.read";

/// Live-push event sent after all of a user's notifications are marked read.
pub const EVENT_NOTIFICATION_ALL_READ: &str = "notification.all_read";

/// Who a notification is addressed to: one user, or everyone holding a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NotificationTarget {
    User(DbId),
    Role(String),
}

impl NotificationTarget {
    /// Build a target from the loose `(user_id, role)` pair callers pass.
    ///
    /// Exactly one of the two must be set; a blank role counts as unset.
    pub fn from_parts(user_id: Option<DbId>, role: Option<&str>) -> Result<Self, CoreError> {
        let role = role.map(str::trim).filter(|r| !r.is_empty());
        match (user_id, role) {
            (Some(id), None) => Ok(Self::User(id)),
            (None, Some(r)) => Ok(Self::Role(r.to_string())),
            (Some(_), Some(_)) => Err(CoreError::Validation(
                "A notification targets either a user or a role, not both".into(),
            )),
            (None, None) => Err(CoreError::Validation(
                "A notification needs a user or a role target".into(),
            )),
        }
    }

    /// The user id, for user-targeted notifications.
    pub fn user_id(&self) -> Option<DbId> {
        match self {
            Self::User(id) => Some(*id),
            Self::Role(_) => None,
        }
    }

    /// The role name, for role broadcasts.
    pub fn role(&self) -> Option<&str> {
        match self {
            Self::User(_) => None,
            Self::Role(r) => Some(r.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_only_target() {
        assert_eq!(
            NotificationTarget::from_parts(Some(5), None).unwrap(),
            NotificationTarget::User(5)
        );
    }

    #[test]
    fn role_only_target_is_trimmed() {
        let target = NotificationTarget::from_parts(None, Some(" Employee ")).unwrap();
        assert_eq!(target.role(), Some("Employee"));
        assert_eq!(target.user_id(), None);
    }

    #[test]
    fn both_targets_rejected() {
        assert!(NotificationTarget::from_parts(Some(1), Some("Admin")).is_err());
    }

    #[test]
    fn neither_target_rejected() {
        assert!(NotificationTarget::from_parts(None, None).is_err());
        assert!(NotificationTarget::from_parts(None, Some("  ")).is_err());
    }

    #[test]
    fn blank_role_with_user_is_a_user_target() {
        assert_eq!(
            NotificationTarget::from_parts(Some(9), Some("")).unwrap(),
            NotificationTarget::User(9)
        );
    }
}
