//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /register          -> register (public, toggleable)
/// POST   /login             -> login (public)
/// GET    /profile           -> profile
/// PUT    /profile           -> update_profile
/// PUT    /reset-password    -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(admin::register))
        .route("/login", post(admin::login))
        .route("/profile", get(admin::profile).put(admin::update_profile))
        .route("/reset-password", put(admin::reset_password))
}
