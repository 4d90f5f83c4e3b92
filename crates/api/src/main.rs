use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use welfare_api::config::ServerConfig;
use welfare_api::router::build_app_router;
use welfare_api::state::AppState;
use welfare_cloud::{
    CloudinaryConfig, CloudinaryStore, IpApiLocator, MeezanConfig, MeezanGateway,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "welfare_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = welfare_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    welfare_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    welfare_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Outbound integrations ---
    let images = CloudinaryStore::new(CloudinaryConfig::from_env())
        .expect("Failed to build Cloudinary client");
    let gateway =
        MeezanGateway::new(MeezanConfig::from_env()).expect("Failed to build Meezan client");
    let geo = IpApiLocator::new(config.geolocation_url.clone())
        .expect("Failed to build geolocation client");
    tracing::info!("Outbound clients ready (images, payment gateway, geolocation)");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        images: Arc::new(images),
        gateway: Arc::new(gateway),
        geo: Arc::new(geo),
        started_at: Instant::now(),
    };

    let app = match build_app_router(state, &config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Check CORS_ORIGINS");
            std::process::exit(1);
        }
    };

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // Connect info feeds the client IP fallback in `ClientMeta`.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
