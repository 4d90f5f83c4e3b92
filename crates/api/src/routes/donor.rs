//! Route definitions for the `/donors` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::donor;
use crate::state::AppState;

/// Routes mounted at `/donors`.
///
/// ```text
/// POST   /register               -> register (public)
/// POST   /login                  -> login (public)
/// GET    /profile                -> profile (donor)
/// PUT    /profile                -> update_profile (donor)
/// GET    /profile/donations      -> my_donations (donor)
/// GET    /                       -> list (admin)
/// GET    /{id}                   -> get_by_id (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(donor::register))
        .route("/login", post(donor::login))
        .route("/profile", get(donor::profile).put(donor::update_profile))
        .route("/profile/donations", get(donor::my_donations))
        .route("/", get(donor::list))
        .route("/{id}", get(donor::get_by_id))
}
