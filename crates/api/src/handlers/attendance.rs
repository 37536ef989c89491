//! Handlers for training attendance sheets.

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hrdc_core::error::CoreError;
use hrdc_core::registration::check_attendance_open;
use hrdc_core::types::DbId;
use hrdc_db::models::attendance::SubmitAttendance;
use hrdc_db::repositories::{AttendanceRepo, RegistrationRepo};

use super::today;
use super::training::find_training;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/trainings/{id}/attendance
pub async fn list_attendance(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(training_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_training(&state.pool, training_id).await?;
    let rows = AttendanceRepo::list_for_training(&state.pool, training_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/trainings/{id}/attendance
///
/// Accepted once per training, after it has ended. Every entry must name a
/// registration of this training.
pub async fn submit_attendance(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(training_id): Path<DbId>,
    Json(input): Json<SubmitAttendance>,
) -> AppResult<impl IntoResponse> {
    let training = find_training(&state.pool, training_id).await?;
    check_attendance_open(training.end_date, today())?;

    if input.entries.is_empty() {
        return Err(AppError::BadRequest(
            "Attendance must include at least one entry".into(),
        ));
    }
    if AttendanceRepo::exists_for_training(&state.pool, training.id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Attendance has already been submitted for this training".into(),
        )));
    }

    let registered: HashSet<DbId> = RegistrationRepo::list_for_training(&state.pool, training.id)
        .await?
        .into_iter()
        .map(|r| r.id)
        .collect();
    let mut seen = HashSet::new();
    for entry in &input.entries {
        if !registered.contains(&entry.registration_id) {
            return Err(AppError::BadRequest(format!(
                "Registration {} does not belong to this training",
                entry.registration_id
            )));
        }
        if !seen.insert(entry.registration_id) {
            return Err(AppError::BadRequest(format!(
                "Registration {} appears more than once",
                entry.registration_id
            )));
        }
    }

    let attended_on = input.attended_on.unwrap_or(training.end_date);
    let rows = AttendanceRepo::insert_sheet(&state.pool, attended_on, &input.entries).await?;
    tracing::info!(
        training_id = training.id,
        admin_id = admin.user_id,
        entries = rows.len(),
        "Attendance submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: rows })))
}
