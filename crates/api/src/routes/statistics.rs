//! Route definitions for `/statistics`.

use axum::routing::get;
use axum::Router;

use crate::handlers::statistics;
use crate::state::AppState;

/// Routes mounted at `/statistics`.
///
/// ```text
/// GET    /dashboard    -> dashboard (admin)
/// GET    /projects     -> projects (public)
/// GET    /donations    -> donations (admin)
/// GET    /donors       -> donors (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(statistics::dashboard))
        .route("/projects", get(statistics::projects))
        .route("/donations", get(statistics::donations))
        .route("/donors", get(statistics::donors))
}
