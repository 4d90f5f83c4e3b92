//! Route definitions for the `/upload` image proxy.

use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::middleware::upload::upload_body_limit;
use crate::state::AppState;

/// Routes mounted at `/upload`. All require an admin token.
///
/// ```text
/// POST   /image                 -> upload_image (field `image`)
/// DELETE /image?publicId=...    -> delete_image
/// POST   /images                -> upload_images (field `images`)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/image",
            post(upload::upload_image).delete(upload::delete_image),
        )
        .route("/images", post(upload::upload_images))
        .layer(upload_body_limit())
}
