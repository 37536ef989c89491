//! Well-known role name constants.
//!
//! These must match the values accepted by the `users.role` CHECK constraint
//! and are also the live-push group names a WebSocket connection joins.

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_EMPLOYEE: &str = "Employee";

/// All roles an account may hold.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EMPLOYEE];

/// Whether `role` is one of [`VALID_ROLES`].
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_valid() {
        assert!(is_valid_role(ROLE_ADMIN));
        assert!(is_valid_role(ROLE_EMPLOYEE));
    }

    #[test]
    fn role_names_are_case_sensitive() {
        assert!(!is_valid_role("admin"));
        assert!(!is_valid_role(""));
    }
}
