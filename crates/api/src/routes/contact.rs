//! Route definitions for `/contact`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/contact`.
///
/// ```text
/// GET    /settings          -> get_settings (public)
/// PUT    /settings          -> update_settings (admin)
/// POST   /submit            -> submit (public)
/// GET    /messages          -> list_messages (admin)
/// PUT    /messages/{id}     -> update_message_status (admin)
/// DELETE /messages/{id}     -> delete_message (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/settings",
            get(contact::get_settings).put(contact::update_settings),
        )
        .route("/submit", post(contact::submit))
        .route("/messages", get(contact::list_messages))
        .route(
            "/messages/{id}",
            put(contact::update_message_status).delete(contact::delete_message),
        )
}
