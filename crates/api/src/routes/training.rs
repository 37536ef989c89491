//! Route definitions for the `/trainings` resource and its sub-resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{attendance, feedback, registration, training};
use crate::state::AppState;

/// Routes mounted at `/trainings`.
///
/// ```text
/// GET    /                         -> list_trainings
/// POST   /                         -> create_training
/// GET    /{id}                     -> get_training
/// PUT    /{id}                     -> update_training
/// DELETE /{id}                     -> delete_training
/// POST   /{id}/remind              -> send_reminder
/// POST   /{id}/feedback-request    -> request_feedback
/// POST   /{id}/register            -> registration::register
/// GET    /{id}/registrations       -> registration::list_for_training
/// GET    /{id}/attendance          -> attendance::list_attendance
/// POST   /{id}/attendance          -> attendance::submit_attendance
/// GET    /{id}/feedback            -> feedback::list_feedback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(training::list_trainings).post(training::create_training),
        )
        .route(
            "/{id}",
            get(training::get_training)
                .put(training::update_training)
                .delete(training::delete_training),
        )
        .route("/{id}/remind", post(training::send_reminder))
        .route("/{id}/feedback-request", post(training::request_feedback))
        // Registration workflow
        .route("/{id}/register", post(registration::register))
        .route("/{id}/registrations", get(registration::list_for_training))
        // Post-training records
        .route(
            "/{id}/attendance",
            get(attendance::list_attendance).post(attendance::submit_attendance),
        )
        .route("/{id}/feedback", get(feedback::list_feedback))
}
