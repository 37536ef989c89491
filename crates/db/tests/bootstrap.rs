use sqlx::PgPool;

/// Connect, migrate, verify the core tables exist.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    hrdc_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "employees",
        "trainings",
        "training_registrations",
        "attendance",
        "certificates",
        "feedback",
        "notifications",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The notifications table refuses rows with zero or two targets.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_notification_single_target_check(pool: PgPool) {
    let none = sqlx::query("INSERT INTO notifications (title, message) VALUES ('t', 'm')")
        .execute(&pool)
        .await;
    assert!(none.is_err());

    let user_id: i64 =
        sqlx::query_scalar("INSERT INTO users (email, role) VALUES ('a@x.io', 'Admin') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
    let both = sqlx::query(
        "INSERT INTO notifications (user_id, role, title, message) VALUES ($1, 'Admin', 't', 'm')",
    )
    .bind(user_id)
    .execute(&pool)
    .await;
    assert!(both.is_err());
}
