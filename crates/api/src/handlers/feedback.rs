//! Post-training feedback.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hrdc_core::error::CoreError;
use hrdc_core::registration::validate_rating;
use hrdc_core::types::DbId;
use hrdc_db::models::feedback::CreateFeedback;
use hrdc_db::models::status::ConfirmationStatus;
use hrdc_db::repositories::FeedbackRepo;
use validator::Validate;

use super::registration::find_own_registration;
use super::training::find_training;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/registrations/{id}/feedback
///
/// One submission per approved registration; a second attempt is a 409.
pub async fn submit_feedback(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(registration_id): Path<DbId>,
    Json(input): Json<CreateFeedback>,
) -> AppResult<impl IntoResponse> {
    validate_rating(input.rating)?;
    input.validate()?;

    let registration = find_own_registration(&state.pool, &auth, registration_id).await?;
    if ConfirmationStatus::from_id(registration.confirmation_id)
        != Some(ConfirmationStatus::Approved)
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Feedback is accepted only for approved registrations".into(),
        )));
    }

    let feedback = FeedbackRepo::create(&state.pool, registration.id, &input).await?;
    tracing::info!(
        registration_id = registration.id,
        rating = feedback.rating,
        "Feedback submitted",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: feedback })))
}

/// GET /api/v1/trainings/{id}/feedback
pub async fn list_feedback(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(training_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_training(&state.pool, training_id).await?;
    let rows = FeedbackRepo::list_for_training(&state.pool, training_id).await?;
    Ok(Json(DataResponse { data: rows }))
}
