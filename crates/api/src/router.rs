//! Assembles the public router: banner and health at the root, every
//! resource under `/api`, and the envelope-shaped 404 for anything else.
//! The server binary and the HTTP tests share [`build_app_router`].

use std::time::Duration;

use axum::http::header::{InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// A `CORS_ORIGINS` entry that is not a valid header value.
#[derive(Debug, thiserror::Error)]
#[error("Invalid CORS origin '{origin}': {source}")]
pub struct InvalidOrigin {
    pub origin: String,
    #[source]
    pub source: InvalidHeaderValue,
}

/// Outermost layer first: CORS answers preflights before anything else
/// runs, then every request gets an `x-request-id`, a trace span, a
/// deadline and panic recovery around the handlers.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Result<Router, InvalidOrigin> {
    let cors = build_cors_layer(&config.cors_origins)?;
    let request_id = HeaderName::from_static("x-request-id");

    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .fallback(route_not_found)
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(cors)
        .with_state(state);
    Ok(router)
}

/// Credentialed CORS for the admin dashboard and public site origins.
pub fn build_cors_layer(origins: &[String]) -> Result<CorsLayer, InvalidOrigin> {
    let allowed = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|source| InvalidOrigin {
                    origin: origin.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Route not found" })),
    )
}
