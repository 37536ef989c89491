pub mod employee;
pub mod health;
pub mod notification;
pub mod registration;
pub mod training;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                   WebSocket (token in query string)
///
/// /notifications                        list, create (create is admin only)
/// /notifications/unread-count           unread badge count
/// /notifications/read-all               mark everything visible as read
/// /notifications/{id}/read              mark one as read
///
/// /employees                            list, create (admin only)
/// /employees/{id}                       get, update, delete (admin only)
///
/// /trainings                            list, create
/// /trainings/{id}                       get, update, delete
/// /trainings/{id}/remind                queue reminder emails
/// /trainings/{id}/feedback-request      ask confirmed registrants for feedback
/// /trainings/{id}/register              apply (employee)
/// /trainings/{id}/registrations         list registrations (admin)
/// /trainings/{id}/attendance            submit, list (admin)
/// /trainings/{id}/feedback              list feedback (admin)
///
/// /registrations/mine                   caller's registrations
/// /registrations/{id}                   cancel (owner)
/// /registrations/{id}/decision          approve or reject (admin)
/// /registrations/{id}/certificate       generate (admin), get
/// /registrations/{id}/feedback          submit (owner)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/notifications", notification::router())
        .nest("/employees", employee::router())
        .nest("/trainings", training::router())
        .nest("/registrations", registration::router())
}
