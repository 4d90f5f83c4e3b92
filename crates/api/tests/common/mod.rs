#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use welfare_api::auth::jwt::{generate_token, JwtConfig};
use welfare_api::auth::password::hash_password;
use welfare_api::config::ServerConfig;
use welfare_api::router::build_app_router;
use welfare_api::state::AppState;
use welfare_cloud::{
    CloudError, GatewayOrder, GeoLocator, ImageFile, ImageStore, PaymentGateway, RegisteredOrder,
    UploadedImage,
};
use welfare_core::roles::{ACCOUNT_ADMIN, ACCOUNT_DONOR, ROLE_ADMIN};
use welfare_core::types::GeoLocation;
use welfare_db::models::admin::{Admin, CreateAdmin};
use welfare_db::models::donor::{CreateDonor, Donor, DonorAddress};
use welfare_db::models::project::{CreateProject, Project};
use welfare_db::repositories::{AdminRepo, DonorRepo, ProjectRepo};

pub const TEST_PASSWORD: &str = "password123";
pub const FAKE_FORM_URL: &str = "https://gateway.test/payment/form?orderId=abc";

// ---------------------------------------------------------------------------
// Fakes for outbound integrations
// ---------------------------------------------------------------------------

/// In-memory image store that records destroyed ids.
#[derive(Default)]
pub struct FakeImageStore {
    uploads: AtomicUsize,
    pub destroyed: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageStore for FakeImageStore {
    async fn upload(&self, file: ImageFile) -> Result<UploadedImage, CloudError> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(UploadedImage {
            url: format!("https://images.test/welfare/{n}-{}", file.file_name),
            public_id: format!("welfare/{n}"),
            width: None,
            height: None,
            format: None,
            bytes: Some(file.data.len() as u64),
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), CloudError> {
        if public_id.starts_with("missing") {
            return Err(CloudError::NotFound(public_id.to_string()));
        }
        self.destroyed
            .lock()
            .unwrap()
            .push(public_id.to_string());
        Ok(())
    }
}

/// Gateway that either returns [`FAKE_FORM_URL`] or fails.
#[derive(Default)]
pub struct FakeGateway {
    pub fail: bool,
    pub orders: Mutex<Vec<GatewayOrder>>,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn register(&self, order: &GatewayOrder) -> Result<RegisteredOrder, CloudError> {
        self.orders.lock().unwrap().push(order.clone());
        if self.fail {
            return Err(CloudError::InvalidResponse {
                service: "Meezan",
                detail: "no form URL".into(),
            });
        }
        Ok(RegisteredOrder {
            redirect_url: FAKE_FORM_URL.to_string(),
            order_id: Some("abc".to_string()),
        })
    }
}

/// Locator that resolves every address to Lahore, or always fails.
#[derive(Default)]
pub struct FakeGeo {
    pub fail: bool,
}

#[async_trait]
impl GeoLocator for FakeGeo {
    async fn locate(&self, ip: &str) -> Result<Option<GeoLocation>, CloudError> {
        if self.fail {
            return Err(CloudError::NotConfigured("geolocation"));
        }
        Ok(Some(GeoLocation {
            ip: Some(ip.to_string()),
            country: Some("Pakistan".into()),
            country_code: Some("PK".into()),
            city: Some("Lahore".into()),
            ..Default::default()
        }))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            expiry_days: 30,
        },
        admin_registration_enabled: true,
        geolocation_url: "http://geo.invalid/json".to_string(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub images: Arc<FakeImageStore>,
    pub gateway: Arc<FakeGateway>,
}

pub fn build_test_app_with(
    pool: PgPool,
    config: ServerConfig,
    gateway: FakeGateway,
    geo: FakeGeo,
) -> TestApp {
    let images = Arc::new(FakeImageStore::default());
    let gateway = Arc::new(gateway);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        images: images.clone(),
        gateway: gateway.clone(),
        geo: Arc::new(geo),
        started_at: Instant::now(),
    };
    TestApp {
        router: build_app_router(state, &config).unwrap(),
        images,
        gateway,
    }
}

/// Build the full application router with all middleware layers, using the
/// given pool and succeeding fakes.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config(), FakeGateway::default(), FakeGeo::default()).router
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    request(method, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::GET, uri, Some(token)).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::DELETE, uri, Some(token)).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// A multipart body with one part per `(field, file_name, content_type, bytes)`.
pub fn multipart_body(parts: &[(&str, &str, &str, &[u8])]) -> (String, Vec<u8>) {
    let boundary = "welfare-test-boundary";
    let mut body = Vec::new();
    for (field, file_name, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    parts: &[(&str, &str, &str, &[u8])],
    token: &str,
) -> Response {
    let (content_type, body) = multipart_body(parts);
    let request = request(Method::POST, uri, Some(token))
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_admin(pool: &PgPool, email: &str) -> Admin {
    let input = CreateAdmin {
        name: "Test Admin".to_string(),
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role: None,
    };
    AdminRepo::create(pool, &input).await.unwrap()
}

pub async fn create_donor(pool: &PgPool, email: &str) -> Donor {
    let input = CreateDonor {
        name: "Test Donor".to_string(),
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        phone: None,
        address: DonorAddress::default(),
    };
    DonorRepo::create(pool, &input).await.unwrap()
}

pub async fn create_project(pool: &PgPool, title: &str) -> Project {
    let input = CreateProject {
        title: title.to_string(),
        description: "Free medical camp".to_string(),
        location: "Lahore".to_string(),
        images: vec![],
        category: None,
        start_date: None,
        end_date: None,
        status: None,
        beneficiaries: None,
        target_amount: Some(100_000.0),
    };
    ProjectRepo::create(pool, &input).await.unwrap()
}

/// An admin account plus a valid bearer token for it.
pub async fn admin_token(pool: &PgPool) -> String {
    let admin = create_admin(pool, "admin@test.com").await;
    generate_token(admin.id, ACCOUNT_ADMIN, &admin.role, &test_config().jwt).unwrap()
}

/// A donor account plus a valid bearer token for it.
pub async fn donor_token(pool: &PgPool, email: &str) -> (Donor, String) {
    let donor = create_donor(pool, email).await;
    let token = generate_token(donor.id, ACCOUNT_DONOR, ACCOUNT_DONOR, &test_config().jwt).unwrap();
    (donor, token)
}

/// A token naming an admin role but signed for a donor account kind.
pub fn forged_role_token(id: i64) -> String {
    generate_token(id, ACCOUNT_DONOR, ROLE_ADMIN, &test_config().jwt).unwrap()
}
