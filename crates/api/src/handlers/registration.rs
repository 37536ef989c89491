//! Handlers for training registrations: apply, cancel, decide, list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hrdc_core::eligibility;
use hrdc_core::error::CoreError;
use hrdc_core::notification::NotificationTarget;
use hrdc_core::registration::{check_cancellation_allowed, check_registration_open, Decision};
use hrdc_core::roles::ROLE_ADMIN;
use hrdc_core::types::DbId;
use hrdc_db::models::employee::EmployeeAccount;
use hrdc_db::models::registration::RegistrationDetail;
use hrdc_db::models::status::{ConfirmationStatus, TrainingStatus};
use hrdc_db::repositories::{EmployeeRepo, RegistrationRepo};
use hrdc_db::DbPool;
use serde::Deserialize;

use super::today;
use super::training::find_training;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireEmployee};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /registrations/{id}/decision`.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decision: Decision,
}

/// The employee profile behind the caller's account.
pub(crate) async fn current_employee(pool: &DbPool, user: &AuthUser) -> AppResult<EmployeeAccount> {
    EmployeeRepo::find_account_by_user_id(pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::Forbidden(
            "No active employee profile for this account".into(),
        )))
}

/// Load an active registration with its joins or fail with 404.
pub(crate) async fn find_registration(pool: &DbPool, id: DbId) -> AppResult<RegistrationDetail> {
    RegistrationRepo::find_detail(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id,
        }))
}

/// Load a registration the caller owns. Someone else's registration reads
/// as not found.
pub(crate) async fn find_own_registration(
    pool: &DbPool,
    user: &AuthUser,
    id: DbId,
) -> AppResult<RegistrationDetail> {
    let registration = find_registration(pool, id).await?;
    if registration.user_id != user.user_id {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id,
        }));
    }
    Ok(registration)
}

/// GET /api/v1/trainings/{id}/registrations
pub async fn list_for_training(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(training_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_training(&state.pool, training_id).await?;
    let registrations = RegistrationRepo::list_for_training(&state.pool, training_id).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

/// GET /api/v1/registrations/mine
pub async fn list_mine(
    RequireEmployee(user): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let employee = current_employee(&state.pool, &user).await?;
    let registrations = RegistrationRepo::list_for_employee(&state.pool, employee.id).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

/// POST /api/v1/trainings/{id}/register
///
/// The caller must match the training's eligibility tag, the training must
/// be scheduled and not yet started, and a seat must be free.
pub async fn register(
    RequireEmployee(user): RequireEmployee,
    State(state): State<AppState>,
    Path(training_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let employee = current_employee(&state.pool, &user).await?;
    let training = find_training(&state.pool, training_id).await?;

    if TrainingStatus::from_id(training.status_id) != Some(TrainingStatus::Scheduled) {
        return Err(AppError::Core(CoreError::Conflict(
            "The training is not open for registration".into(),
        )));
    }
    if !eligibility::matches(training.eligibility.as_deref(), &employee.profile()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not eligible for this training".into(),
        )));
    }

    let taken = RegistrationRepo::count_active(&state.pool, training.id).await?;
    check_registration_open(training.start_date, today(), taken, training.capacity)?;

    let registration =
        RegistrationRepo::create_within_capacity(&state.pool, training.id, employee.id)
            .await?
            .ok_or(AppError::Core(CoreError::Conflict("The training is full".into())))?;
    tracing::info!(
        registration_id = registration.id,
        training_id = training.id,
        employee_id = employee.id,
        "Employee registered for training",
    );

    let message = format!("{} registered for '{}'.", employee.name, training.title);
    if let Err(e) = state
        .notifier
        .create(
            &NotificationTarget::Role(ROLE_ADMIN.to_string()),
            "New Registration",
            &message,
        )
        .await
    {
        tracing::warn!(
            registration_id = registration.id,
            error = %e,
            "Failed to notify admins of registration",
        );
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: registration })))
}

/// DELETE /api/v1/registrations/{id}
///
/// The owning employee may cancel until the training starts.
pub async fn cancel(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let registration = find_own_registration(&state.pool, &auth, id).await?;
    check_cancellation_allowed(registration.start_date, today())?;

    RegistrationRepo::soft_cancel(&state.pool, id).await?;
    tracing::info!(registration_id = id, user_id = auth.user_id, "Registration cancelled");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/registrations/{id}/decision
///
/// Approve or reject, then tell the registrant.
pub async fn decide(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<impl IntoResponse> {
    let detail = find_registration(&state.pool, id).await?;

    let status = match input.decision {
        Decision::Approve => ConfirmationStatus::Approved,
        Decision::Reject => ConfirmationStatus::Rejected,
    };
    let registration = RegistrationRepo::set_confirmation(&state.pool, id, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id,
        }))?;

    tracing::info!(
        registration_id = id,
        admin_id = admin.user_id,
        decision = ?input.decision,
        "Registration decided",
    );

    if let Err(e) = state
        .notifier
        .notify(
            Some(detail.user_id),
            None,
            input.decision.notification_title(),
            &input.decision.notification_message(&detail.training_title),
        )
        .await
    {
        tracing::warn!(registration_id = id, error = %e, "Failed to notify registrant of decision");
    }

    Ok(Json(DataResponse { data: registration }))
}
