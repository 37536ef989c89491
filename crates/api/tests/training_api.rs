//! HTTP-level tests for the `/trainings` resource: CRUD, email job
//! queueing and announcement notifications.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, days_from_today, delete_auth, get_auth, post_auth, post_json_auth, put_json_auth,
    seed_admin, seed_training, token_for,
};
use hrdc_core::roles::{ROLE_ADMIN, ROLE_EMPLOYEE};
use hrdc_core::training::TriggerType;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_training_queues_email_and_announces(pool: PgPool) {
    let (app, state) = common::build_test_app(pool.clone());
    let admin = token_for(seed_admin(&pool).await, ROLE_ADMIN);
    let mut employee_socket = state.ws_manager.add("e".to_string(), 900, ROLE_EMPLOYEE).await;

    let start = days_from_today(14);
    let id = seed_training(&app, &admin, "Rust Basics", start, start, 20, "technical").await;

    assert_eq!(state.email_queue.len(), 1);
    let job = state.email_queue.dequeue().unwrap();
    assert_eq!(job.training_id, id);
    assert_eq!(job.trigger, TriggerType::Created);

    // The Employee group got the announcement, live and stored.
    assert!(employee_socket.try_recv().is_ok());
    let employee = token_for(900, ROLE_EMPLOYEE);
    let list = body_json(get_auth(&app, "/api/v1/notifications", &employee).await).await;
    assert_eq!(list["data"][0]["title"], "New Training Available");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_training_queues_email_when_announcement_fails(pool: PgPool) {
    let (app, state) = common::build_test_app(pool.clone());
    let admin = token_for(seed_admin(&pool).await, ROLE_ADMIN);
    common::fail_notification_inserts(&pool).await;

    let start = days_from_today(14);
    let id = seed_training(&app, &admin, "Rust Basics", start, start, 20, "all").await;

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trainings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
    let job = state.email_queue.dequeue().unwrap();
    assert_eq!(job.training_id, id);
    assert_eq!(job.trigger, TriggerType::Created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_training_rejects_bad_schedule(pool: PgPool) {
    let (app, state) = common::build_test_app(pool.clone());
    let admin = token_for(seed_admin(&pool).await, ROLE_ADMIN);

    let response = post_json_auth(
        &app,
        "/api/v1/trainings",
        &admin,
        json!({
            "title": "Backwards",
            "trainer": "Jane Doe",
            "start_date": days_from_today(10),
            "end_date": days_from_today(9),
            "capacity": 10,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        &app,
        "/api/v1/trainings",
        &admin,
        json!({
            "title": "Empty",
            "trainer": "Jane Doe",
            "start_date": days_from_today(10),
            "end_date": days_from_today(10),
            "capacity": 0,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.email_queue.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn employees_cannot_manage_trainings(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let employee = token_for(5, ROLE_EMPLOYEE);

    let response = post_json_auth(
        &app,
        "/api/v1/trainings",
        &employee,
        json!({
            "title": "Sneaky",
            "trainer": "Nobody",
            "start_date": days_from_today(3),
            "end_date": days_from_today(3),
            "capacity": 5,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(&app, "/api/v1/trainings", &employee).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_remind_and_delete(pool: PgPool) {
    let (app, state) = common::build_test_app(pool.clone());
    let admin = token_for(seed_admin(&pool).await, ROLE_ADMIN);
    let start = days_from_today(7);
    let id = seed_training(&app, &admin, "Kubernetes", start, start, 10, "all").await;

    let response = put_json_auth(
        &app,
        &format!("/api/v1/trainings/{id}"),
        &admin,
        json!({ "venue": "Auditorium", "end_date": days_from_today(8) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["venue"], "Auditorium");

    // End before the existing start date is rejected after merging.
    let response = put_json_auth(
        &app,
        &format!("/api/v1/trainings/{id}"),
        &admin,
        json!({ "end_date": days_from_today(1) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_auth(&app, &format!("/api/v1/trainings/{id}/remind"), &admin).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["queued"], true);
    assert_eq!(json["data"]["pending_jobs"], 3);

    let triggers: Vec<TriggerType> = std::iter::from_fn(|| state.email_queue.dequeue())
        .map(|job| job.trigger)
        .collect();
    assert_eq!(
        triggers,
        vec![TriggerType::Created, TriggerType::Updated, TriggerType::Reminder]
    );

    let response = delete_auth(&app, &format!("/api/v1/trainings/{id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(&app, &format!("/api/v1/trainings/{id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_auth(&app, &format!("/api/v1/trainings/{id}/remind"), &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
