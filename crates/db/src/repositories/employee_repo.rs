//! Repository for the `employees` table and its linked `users` row.

use hrdc_core::roles::ROLE_EMPLOYEE;
use hrdc_core::types::DbId;
use sqlx::PgPool;

use crate::models::employee::{CreateEmployee, Employee, EmployeeAccount, UpdateEmployee};

/// Column list for `employees` queries.
const COLUMNS: &str =
    "id, user_id, name, department, designation, employee_type, created_at, updated_at";

/// Joined select for [`EmployeeAccount`], restricted to active rows.
const ACCOUNT_SELECT: &str = "SELECT e.id, e.user_id, e.name, e.department, e.designation, \
     e.employee_type, u.email, u.role \
     FROM employees e JOIN users u ON u.id = e.user_id \
     WHERE e.deleted_at IS NULL AND u.deleted_at IS NULL AND u.is_active = true";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Create the user account and the employee in one transaction.
    ///
    /// `role` defaults to `Employee` when the DTO leaves it unset.
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id: DbId = sqlx::query_scalar(
            "INSERT INTO users (email, role) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.email)
        .bind(input.role.as_deref().unwrap_or(ROLE_EMPLOYEE))
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO employees (user_id, name, department, designation, employee_type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let employee = sqlx::query_as::<_, Employee>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.department)
            .bind(&input.designation)
            .bind(&input.employee_type)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(employee)
    }

    /// Find an employee by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM employees WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find one active employee together with its account.
    pub async fn find_account(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EmployeeAccount>, sqlx::Error> {
        let query = format!("{ACCOUNT_SELECT} AND e.id = $1");
        sqlx::query_as::<_, EmployeeAccount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the active employee (with account) for a user id.
    pub async fn find_account_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<EmployeeAccount>, sqlx::Error> {
        let query = format!("{ACCOUNT_SELECT} AND e.user_id = $1");
        sqlx::query_as::<_, EmployeeAccount>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// All active employees whose account is also active, ordered by name.
    ///
    /// This is the candidate set for training emails; eligibility filtering
    /// happens in the caller.
    pub async fn list_active_accounts(pool: &PgPool) -> Result<Vec<EmployeeAccount>, sqlx::Error> {
        let query = format!("{ACCOUNT_SELECT} ORDER BY e.name, e.id");
        sqlx::query_as::<_, EmployeeAccount>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an employee. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                name = COALESCE($2, name),
                department = COALESCE($3, department),
                designation = COALESCE($4, designation),
                employee_type = COALESCE($5, employee_type),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.department)
            .bind(&input.designation)
            .bind(&input.employee_type)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an employee and deactivate its account.
    ///
    /// Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id: Option<DbId> = sqlx::query_scalar(
            "UPDATE employees SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING user_id",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user_id) = user_id else {
            return Ok(false);
        };

        sqlx::query("UPDATE users SET is_active = false, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
