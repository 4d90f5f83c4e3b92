//! HTTP-level tests for contact settings, public submission and message
//! management.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, delete_auth, get, get_auth, post_json, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

fn message(n: usize) -> serde_json::Value {
    json!({
        "name": format!("Sender {n}"),
        "email": format!("sender{n}@example.com"),
        "subject": "Volunteering",
        "message": "How can I help?"
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn settings_are_created_on_first_read(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app.clone(), "/api/contact/settings").await;

    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["data"]["contactFormEnabled"], true);

    let second = body_json(get(app, "/api/contact/settings").await).await;
    assert_eq!(first["data"]["createdAt"], second["data"]["createdAt"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_updates_settings(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({
        "organizationName": "Helping Hands",
        "phones": [{ "label": "Office", "number": "042-111", "isPrimary": true }],
        "socialMedia": { "facebook": "https://facebook.com/hh" }
    });
    let response = put_json_auth(app.clone(), "/api/contact/settings", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Contact settings updated successfully");
    assert_eq!(json["data"]["organizationName"], "Helping Hands");
    assert_eq!(json["data"]["phones"][0]["number"], "042-111");

    let response = put_json_auth(
        app,
        "/api/contact/settings",
        json!({ "notificationEmail": "nope" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_stores_message_with_client_meta(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/contact/submit")
        .header("content-type", "application/json")
        .header("x-real-ip", "198.51.100.7")
        .header("user-agent", "integration-test")
        .body(axum::body::Body::from(message(1).to_string()))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "new");
    assert_eq!(json["data"]["ipAddress"], "198.51.100.7");
    assert_eq!(json["data"]["userAgent"], "integration-test");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_validates_required_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/contact/submit",
        json!({ "name": "A", "email": "a@example.com", "subject": "" , "message": "hi" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_is_forbidden_when_form_disabled(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    put_json_auth(
        app.clone(),
        "/api/contact/settings",
        json!({ "contactFormEnabled": false }),
        &token,
    )
    .await;

    let response = post_json(app, "/api/contact/submit", message(1)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["message"],
        "Contact form is currently disabled"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_pages_updates_and_deletes_messages(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    for n in 0..3 {
        post_json(app.clone(), "/api/contact/submit", message(n)).await;
    }

    let response = get_auth(app.clone(), "/api/contact/messages?page=2&limit=2", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["pagination"]["page"], 2);
    assert_eq!(json["pagination"]["total"], 3);
    assert_eq!(json["pagination"]["pages"], 2);
    // Newest first, so the last page holds the oldest.
    assert_eq!(json["data"][0]["name"], "Sender 0");
    let id = json["data"][0]["id"].as_i64().unwrap();

    let uri = format!("/api/contact/messages/{id}");
    let response = put_json_auth(app.clone(), &uri, json!({ "status": "replied" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "replied");

    let response = put_json_auth(app.clone(), &uri, json!({ "status": "spam" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(app.clone(), "/api/contact/messages?status=replied", &token).await;
    assert_eq!(body_json(response).await["pagination"]["total"], 1);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Message not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn messages_require_admin(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/contact/messages").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
