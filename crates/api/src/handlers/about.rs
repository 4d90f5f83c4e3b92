//! Handlers for the About Us singleton.

use axum::extract::State;
use axum::Json;
use welfare_db::models::about::{AboutUs, UpdateAboutUs};
use welfare_db::repositories::AboutRepo;

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::middleware::auth::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/about
pub async fn get(State(state): State<AppState>) -> AppResult<Json<ApiResponse<AboutUs>>> {
    let about = AboutRepo::get_or_create(&state.pool).await?;
    Ok(Json(ApiResponse::ok(about)))
}

/// PUT /api/about
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<UpdateAboutUs>,
) -> AppResult<Json<ApiResponse<AboutUs>>> {
    let about = AboutRepo::update(&state.pool, &input).await?;
    tracing::info!(admin_id = admin.id, "About Us updated");
    Ok(Json(
        ApiResponse::ok(about).with_message("About Us updated successfully"),
    ))
}
