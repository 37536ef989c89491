//! Employee entity model and DTOs.

use hrdc_core::eligibility::EmployeeProfile;
use hrdc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub employee_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An active employee joined with its linked account.
///
/// This is the shape used wherever an employee has to be reached: email
/// dispatch resolves recipients from it and the admin listing returns it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmployeeAccount {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub employee_type: String,
    pub email: String,
    pub role: String,
}

impl EmployeeAccount {
    /// Attributes the eligibility matcher looks at.
    pub fn profile(&self) -> EmployeeProfile<'_> {
        EmployeeProfile {
            employee_type: &self.employee_type,
            department: &self.department,
            designation: &self.designation,
        }
    }
}

/// DTO for creating an employee together with its account.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmployee {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// Defaults to `Employee` if omitted.
    pub role: Option<String>,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub employee_type: String,
}

/// DTO for updating an employee. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub employee_type: Option<String>,
}
