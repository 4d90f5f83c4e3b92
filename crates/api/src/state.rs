use std::sync::Arc;
use std::time::Instant;

use welfare_cloud::{GeoLocator, ImageStore, PaymentGateway};

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is already a handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: welfare_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Cloud image store used by the upload endpoints.
    pub images: Arc<dyn ImageStore>,
    /// Hosted payment page used for card and wallet donations.
    pub gateway: Arc<dyn PaymentGateway>,
    /// Best-effort IP lookup recorded on donations.
    pub geo: Arc<dyn GeoLocator>,
    /// Process start, reported as uptime by `/health`.
    pub started_at: Instant,
}
