//! Route definitions for the `/donations` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::donation;
use crate::state::AppState;

/// Routes mounted at `/donations`.
///
/// Static segments are matched before `/{id}`.
///
/// ```text
/// GET    /settings              -> get_settings (public)
/// PUT    /settings              -> update_settings (admin)
/// GET    /statistics/summary    -> summary (admin)
/// POST   /                      -> create (public, optional donor token)
/// GET    /                      -> list (admin)
/// GET    /{id}                  -> get_by_id (public)
/// DELETE /{id}                  -> delete (admin)
/// PUT    /{id}/verify           -> verify (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/settings",
            get(donation::get_settings).put(donation::update_settings),
        )
        .route("/statistics/summary", get(donation::summary))
        .route("/", get(donation::list).post(donation::create))
        .route("/{id}", get(donation::get_by_id).delete(donation::delete))
        .route("/{id}/verify", put(donation::verify))
}
