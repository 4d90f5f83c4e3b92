use sqlx::PgPool;

/// Connect, migrate, and verify every table exists.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    welfare_db::health_check(&pool).await.unwrap();

    let tables = [
        "admins",
        "donors",
        "projects",
        "donations",
        "donation_settings",
        "contact_settings",
        "contact_messages",
        "about_us",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The `updated_at` trigger fires on UPDATE.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let (id, created): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO projects (title, description, location, updated_at)
         VALUES ('t', 'd', 'l', NOW() - INTERVAL '1 day')
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let (updated,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("UPDATE projects SET title = 'u' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(updated > created);
}

/// Amount floor and enumerations are enforced by the schema as well.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_donation_check_constraints(pool: PgPool) {
    let below_floor = sqlx::query(
        "INSERT INTO donations (donor_name, donor_email, amount, converted_amount)
         VALUES ('a', 'a@b.co', 0.5, 0.5)",
    )
    .execute(&pool)
    .await;
    assert!(below_floor.is_err());

    let bad_currency = sqlx::query(
        "INSERT INTO donations (donor_name, donor_email, amount, currency, converted_amount)
         VALUES ('a', 'a@b.co', 10, 'JPY', 10)",
    )
    .execute(&pool)
    .await;
    assert!(bad_currency.is_err());
}
