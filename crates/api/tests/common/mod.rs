#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use chrono::{Duration, NaiveDate, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use hrdc_api::auth::jwt::{generate_access_token, JwtConfig};
use hrdc_api::config::ServerConfig;
use hrdc_api::router::build_app_router;
use hrdc_api::state::AppState;
use hrdc_api::ws::WsManager;
use hrdc_core::types::DbId;
use hrdc_events::NotificationQueue;

const TEST_SECRET: &str = "test-secret-for-integration-tests";

/// A `ServerConfig` with local defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the production router over `pool`. The returned state shares the
/// email queue and WebSocket registry with the router.
pub fn build_test_app(pool: PgPool) -> (Router, AppState) {
    let config = test_config();
    let state = AppState::new(
        pool,
        config.clone(),
        Arc::new(WsManager::new()),
        Arc::new(NotificationQueue::new()),
    );
    (build_app_router(state.clone(), &config), state)
}

/// Sign a bearer token for `user_id` with `role`.
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).unwrap()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

/// Insert a bare account (no employee profile) and return its user id.
pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO users (email, role) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(role)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Insert the administrator account and return its user id.
pub async fn seed_admin(pool: &PgPool) -> DbId {
    seed_user(pool, "admin@example.com", "Admin").await
}

/// An employee as created through the API: `(employee_id, user_id)`.
pub async fn seed_employee(
    app: &Router,
    admin_token: &str,
    name: &str,
    email: &str,
    department: &str,
    designation: &str,
) -> (DbId, DbId) {
    let response = send(
        app,
        Method::POST,
        "/api/v1/employees",
        Some(admin_token),
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "department": department,
            "designation": designation,
            "employee_type": "Permanent",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["data"]["id"].as_i64().unwrap(),
        json["data"]["user_id"].as_i64().unwrap(),
    )
}

/// A training with a given schedule and capacity, created through the API.
pub async fn seed_training(
    app: &Router,
    admin_token: &str,
    title: &str,
    start: NaiveDate,
    end: NaiveDate,
    capacity: i32,
    eligibility: &str,
) -> DbId {
    let response = send(
        app,
        Method::POST,
        "/api/v1/trainings",
        Some(admin_token),
        Some(serde_json::json!({
            "title": title,
            "trainer": "Jane Doe",
            "venue": "Room 4",
            "start_date": start,
            "end_date": end,
            "capacity": capacity,
            "eligibility": eligibility,
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Make every later insert into `notifications` fail.
pub async fn fail_notification_inserts(pool: &PgPool) {
    sqlx::query(
        "CREATE FUNCTION reject_notification() RETURNS trigger LANGUAGE plpgsql AS $$ \
         BEGIN RAISE EXCEPTION 'notifications unavailable'; END $$",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER reject_notification BEFORE INSERT ON notifications \
         FOR EACH ROW EXECUTE FUNCTION reject_notification()",
    )
    .execute(pool)
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send one request through the router.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn post_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
