//! HTTP-level tests for admin and donor registration, login and the
//! bearer-token gate.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app_with, create_admin, donor_token, forged_role_token,
    get, get_auth, post_json, put_json_auth, test_config, FakeGateway, FakeGeo, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;
use welfare_db::repositories::{AdminRepo, DonorRepo};

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_register_returns_token_without_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "name": "Ayesha", "email": " Ayesha@Example.com ", "password": "secret1" });
    let response = post_json(app, "/api/admin/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["email"], "ayesha@example.com");
    assert_eq!(json["data"]["role"], "admin");
    assert!(json["data"]["token"].is_string());
    assert!(json["data"].get("passwordHash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_register_rejects_duplicate_email(pool: PgPool) {
    create_admin(&pool, "dup@example.com").await;
    let app = common::build_test_app(pool);

    let body = json!({ "name": "Dup", "email": "dup@example.com", "password": "secret1" });
    let response = post_json(app, "/api/admin/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Admin with this email already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_register_can_be_disabled(pool: PgPool) {
    let mut config = test_config();
    config.admin_registration_enabled = false;
    let app = build_test_app_with(pool, config, FakeGateway::default(), FakeGeo::default()).router;

    let body = json!({ "name": "Late", "email": "late@example.com", "password": "secret1" });
    let response = post_json(app, "/api/admin/register", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_register_validates_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "name": "Short", "email": "short@example.com", "password": "123" });
    let response = post_json(app, "/api/admin/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_login_success_and_wrong_password(pool: PgPool) {
    let admin = create_admin(&pool, "login@example.com").await;
    let app = common::build_test_app(pool.clone());

    let ok = post_json(
        app.clone(),
        "/api/admin/login",
        json!({ "email": "LOGIN@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    let json = body_json(ok).await;
    assert_eq!(json["data"]["id"], admin.id);
    assert!(json["data"]["token"].is_string());

    let reloaded = AdminRepo::find_by_id(&pool, admin.id).await.unwrap().unwrap();
    assert!(reloaded.last_login_at.is_some());

    let bad = post_json(
        app,
        "/api/admin/login",
        json!({ "email": "login@example.com", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(bad).await["message"], "Invalid credentials");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_requires_both_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/donors/login", json!({ "email": "x@y.com" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Please provide email and password"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_route_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/admin/profile").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Not authorized to access this route");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_route_rejects_garbage_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/donations", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_admin_is_rejected(pool: PgPool) {
    let token = admin_token(&pool).await;
    let admin = AdminRepo::find_by_email(&pool, "admin@test.com")
        .await
        .unwrap()
        .unwrap();
    AdminRepo::set_active(&pool, admin.id, false).await.unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/admin/profile", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "Admin account is deactivated"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn donor_token_cannot_reach_admin_routes(pool: PgPool) {
    let (donor, token) = donor_token(&pool, "donor@example.com").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/donors", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let forged = forged_role_token(donor.id);
    let response = get_auth(app, "/api/statistics/dashboard", &forged).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_changes_password(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let wrong = put_json_auth(
        app.clone(),
        "/api/admin/reset-password",
        json!({ "currentPassword": "nope-nope", "newPassword": "brand-new-1" }),
        &token,
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let ok = put_json_auth(
        app.clone(),
        "/api/admin/reset-password",
        json!({ "currentPassword": TEST_PASSWORD, "newPassword": "brand-new-1" }),
        &token,
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);

    let login = post_json(
        app,
        "/api/admin/login",
        json!({ "email": "admin@test.com", "password": "brand-new-1" }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_updates_profile(pool: PgPool) {
    let token = admin_token(&pool).await;
    create_admin(&pool, "taken@example.com").await;
    let app = common::build_test_app(pool);

    let clash = put_json_auth(
        app.clone(),
        "/api/admin/profile",
        json!({ "email": "taken@example.com" }),
        &token,
    )
    .await;
    assert_eq!(clash.status(), StatusCode::BAD_REQUEST);

    let ok = put_json_auth(
        app,
        "/api/admin/profile",
        json!({ "name": "Renamed" }),
        &token,
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["data"]["name"], "Renamed");
}

// ---------------------------------------------------------------------------
// Donor
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn donor_register_twice_leaves_one_record(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = json!({
        "name": "Bilal",
        "email": "bilal@example.com",
        "password": "secret1",
        "phone": "0300-1234567",
        "address": { "city": "Karachi", "country": "Pakistan" }
    });

    let first = post_json(app.clone(), "/api/donors/register", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let json = body_json(first).await;
    assert_eq!(json["data"]["address"]["city"], "Karachi");
    assert!(json["data"]["token"].is_string());

    let second = post_json(app, "/api/donors/register", body).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(second).await["message"],
        "Donor with this email already exists"
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM donors WHERE email = $1")
        .bind("bilal@example.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn donor_profile_round_trip(pool: PgPool) {
    let (_donor, token) = donor_token(&pool, "profile@example.com").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/donors/profile", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["email"], "profile@example.com");

    let response = put_json_auth(
        app,
        "/api/donors/profile",
        json!({ "name": "New Name", "phone": "0311" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "New Name");
    assert_eq!(json["data"]["phone"], "0311");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_donor_cannot_log_in(pool: PgPool) {
    let (donor, _token) = donor_token(&pool, "gone@example.com").await;
    DonorRepo::set_active(&pool, donor.id, false).await.unwrap();
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/donors/login",
        json!({ "email": "gone@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Account is deactivated");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_lists_and_searches_donors(pool: PgPool) {
    let token = admin_token(&pool).await;
    let (first, _) = donor_token(&pool, "zara@example.com").await;
    donor_token(&pool, "omar@example.com").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/donors?search=zara", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["email"], "zara@example.com");

    let response = get_auth(app.clone(), &format!("/api/donors/{}", first.id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/donors/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Donor not found");
}
