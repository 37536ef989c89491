//! Handlers for the `/employees` resource. Admin only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hrdc_core::error::CoreError;
use hrdc_core::roles::is_valid_role;
use hrdc_core::types::DbId;
use hrdc_db::models::employee::{CreateEmployee, UpdateEmployee};
use hrdc_db::repositories::EmployeeRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Employee",
        id,
    })
}

/// GET /api/v1/employees
pub async fn list_employees(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let employees = EmployeeRepo::list_active_accounts(&state.pool).await?;
    Ok(Json(DataResponse { data: employees }))
}

/// POST /api/v1/employees
///
/// Creates the employee and its login account together.
pub async fn create_employee(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateEmployee>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(role) = input.role.as_deref() {
        if !is_valid_role(role) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown role '{role}'"
            ))));
        }
    }

    let employee = EmployeeRepo::create(&state.pool, &input).await?;
    tracing::info!(employee_id = employee.id, user_id = employee.user_id, "Employee created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: employee })))
}

/// GET /api/v1/employees/{id}
pub async fn get_employee(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let employee = EmployeeRepo::find_account(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: employee }))
}

/// PUT /api/v1/employees/{id}
pub async fn update_employee(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEmployee>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let employee = EmployeeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: employee }))
}

/// DELETE /api/v1/employees/{id}
///
/// Soft-deletes the employee and deactivates the account.
pub async fn delete_employee(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !EmployeeRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(employee_id = id, "Employee deleted");
    Ok(StatusCode::NO_CONTENT)
}
