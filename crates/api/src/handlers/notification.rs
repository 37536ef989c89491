//! Handlers for the `/notifications` resource.
//!
//! Reads and read-tracking are scoped to the caller: a user sees rows
//! addressed to them plus broadcasts to their role.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hrdc_core::error::CoreError;
use hrdc_core::types::DbId;
use hrdc_db::models::notification::CreateNotification;
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/notifications
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let notifications = state.notifier.list_for(auth.user_id, &auth.role).await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = state.notifier.unread_count(auth.user_id, &auth.role).await?;
    Ok(Json(DataResponse {
        data: json!({ "count": count }),
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Idempotent. 404 if the notification does not exist or is not visible to
/// the caller.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let notification = state
        .notifier
        .mark_read_for(notification_id, auth.user_id, &auth.role)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }))?;

    Ok(Json(DataResponse { data: notification }))
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = state
        .notifier
        .mark_all_read(auth.user_id, &auth.role)
        .await?;

    Ok(Json(DataResponse {
        data: json!({ "marked_read": count }),
    }))
}

/// POST /api/v1/notifications
///
/// Send a notification to one user or to everyone with a role.
pub async fn create_notification(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let id = state
        .notifier
        .notify(input.user_id, input.role.as_deref(), &input.title, &input.message)
        .await?;

    tracing::info!(notification_id = id, admin_id = admin.user_id, "Notification sent by admin");

    Ok((StatusCode::CREATED, Json(DataResponse { data: json!({ "id": id }) })))
}
