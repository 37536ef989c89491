//! Route definitions for the `/registrations` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{certificate, feedback, registration};
use crate::state::AppState;

/// Routes mounted at `/registrations`.
///
/// ```text
/// GET    /mine              -> list_mine
/// DELETE /{id}              -> cancel
/// POST   /{id}/decision     -> decide
/// GET    /{id}/certificate  -> certificate::get_certificate
/// POST   /{id}/certificate  -> certificate::generate_certificate
/// POST   /{id}/feedback     -> feedback::submit_feedback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mine", get(registration::list_mine))
        .route("/{id}", delete(registration::cancel))
        .route("/{id}/decision", post(registration::decide))
        .route(
            "/{id}/certificate",
            get(certificate::get_certificate).post(certificate::generate_certificate),
        )
        .route("/{id}/feedback", post(feedback::submit_feedback))
}
