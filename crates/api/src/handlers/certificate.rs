//! Certificate generation for approved registrations.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use hrdc_core::error::CoreError;
use hrdc_core::types::DbId;
use hrdc_db::models::certificate::GenerateCertificate;
use hrdc_db::models::status::ConfirmationStatus;
use hrdc_db::repositories::CertificateRepo;

use super::registration::{find_own_registration, find_registration};
use super::today;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/registrations/{id}/certificate
///
/// Generating again refreshes the issue date and file path.
pub async fn generate_certificate(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(registration_id): Path<DbId>,
    Json(input): Json<GenerateCertificate>,
) -> AppResult<impl IntoResponse> {
    let registration = find_registration(&state.pool, registration_id).await?;
    if ConfirmationStatus::from_id(registration.confirmation_id)
        != Some(ConfirmationStatus::Approved)
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Certificates are issued only for approved registrations".into(),
        )));
    }

    let issued_on = input.issued_on.unwrap_or_else(today);
    let certificate = CertificateRepo::upsert_generated(
        &state.pool,
        registration.id,
        issued_on,
        input.file_path.as_deref(),
    )
    .await?;
    tracing::info!(
        registration_id = registration.id,
        admin_id = admin.user_id,
        "Certificate generated",
    );

    let message = format!(
        "Your certificate for '{}' is ready.",
        registration.training_title
    );
    if let Err(e) = state
        .notifier
        .notify(
            Some(registration.user_id),
            None,
            "Certificate Available",
            &message,
        )
        .await
    {
        tracing::warn!(
            registration_id = registration.id,
            error = %e,
            "Failed to notify registrant of certificate",
        );
    }

    Ok(Json(DataResponse { data: certificate }))
}

/// GET /api/v1/registrations/{id}/certificate
///
/// Visible to the registrant and to administrators.
pub async fn get_certificate(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(registration_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let registration = if auth.is_admin() {
        find_registration(&state.pool, registration_id).await?
    } else {
        find_own_registration(&state.pool, &auth, registration_id).await?
    };

    let certificate = CertificateRepo::find_by_registration(&state.pool, registration.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Certificate",
            id: registration.id,
        }))?;
    Ok(Json(DataResponse { data: certificate }))
}
