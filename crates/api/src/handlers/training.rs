//! Handlers for the `/trainings` resource.
//!
//! Creating or updating a training queues an email job for eligible
//! employees; the request returns before any email is sent.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hrdc_core::error::CoreError;
use hrdc_core::notification::NotificationTarget;
use hrdc_core::roles::ROLE_EMPLOYEE;
use hrdc_core::training::{validate_schedule, TriggerType};
use hrdc_core::types::DbId;
use hrdc_db::models::training::{CreateTraining, Training, UpdateTraining};
use hrdc_db::repositories::{RegistrationRepo, TrainingRepo};
use hrdc_db::DbPool;
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Load an active training or fail with 404.
pub(crate) async fn find_training(pool: &DbPool, id: DbId) -> AppResult<Training> {
    TrainingRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Training",
            id,
        }))
}

/// GET /api/v1/trainings
pub async fn list_trainings(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let trainings = TrainingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: trainings }))
}

/// POST /api/v1/trainings
///
/// Queues the `created` email job, then announces the training to the
/// `Employee` group. The announcement is best-effort once the row exists.
pub async fn create_training(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTraining>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_schedule(
        input.start_date,
        input.end_date,
        input.valid_till,
        input.capacity,
    )?;

    let training = TrainingRepo::create(&state.pool, &input).await?;
    tracing::info!(training_id = training.id, admin_id = admin.user_id, "Training created");

    state.email_queue.enqueue(training.id, TriggerType::Created);

    let message = format!(
        "A new training '{}' has been scheduled for {}.",
        training.title,
        training.start_date.format("%d %b %Y")
    );
    if let Err(e) = state
        .notifier
        .create(
            &NotificationTarget::Role(ROLE_EMPLOYEE.to_string()),
            "New Training Available",
            &message,
        )
        .await
    {
        tracing::warn!(
            training_id = training.id,
            error = %e,
            "Failed to announce new training",
        );
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: training })))
}

/// GET /api/v1/trainings/{id}
pub async fn get_training(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let training = find_training(&state.pool, id).await?;
    Ok(Json(DataResponse { data: training }))
}

/// PUT /api/v1/trainings/{id}
///
/// The merged schedule is re-validated before writing. Queues the
/// `updated` email job.
pub async fn update_training(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTraining>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let existing = find_training(&state.pool, id).await?;

    validate_schedule(
        input.start_date.unwrap_or(existing.start_date),
        input.end_date.unwrap_or(existing.end_date),
        input.valid_till.or(existing.valid_till),
        input.capacity.unwrap_or(existing.capacity),
    )?;

    let training = TrainingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Training",
            id,
        }))?;

    state.email_queue.enqueue(training.id, TriggerType::Updated);

    Ok(Json(DataResponse { data: training }))
}

/// DELETE /api/v1/trainings/{id}
pub async fn delete_training(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !TrainingRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Training",
            id,
        }));
    }
    tracing::info!(training_id = id, "Training deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/trainings/{id}/remind
///
/// Queue a reminder email to every eligible employee.
pub async fn send_reminder(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let training = find_training(&state.pool, id).await?;
    state.email_queue.enqueue(training.id, TriggerType::Reminder);

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: json!({ "queued": true, "pending_jobs": state.email_queue.len() }),
        }),
    ))
}

/// POST /api/v1/trainings/{id}/feedback-request
///
/// Ask every confirmed registrant to leave feedback. Returns how many were
/// notified.
pub async fn request_feedback(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let training = find_training(&state.pool, id).await?;
    let registrants = RegistrationRepo::list_confirmed(&state.pool, training.id).await?;

    let message = format!(
        "Please share your feedback on the training '{}'.",
        training.title
    );
    let mut notified = 0;
    for registrant in &registrants {
        match state
            .notifier
            .notify(Some(registrant.user_id), None, "Feedback Requested", &message)
            .await
        {
            Ok(_) => notified += 1,
            Err(e) => {
                tracing::warn!(
                    training_id = training.id,
                    user_id = registrant.user_id,
                    error = %e,
                    "Failed to send feedback request",
                );
            }
        }
    }

    Ok(Json(DataResponse {
        data: json!({ "notified": notified }),
    }))
}
