//! Handlers for the `/upload` image proxy.

use axum::extract::{Multipart, State};
use axum::Json;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use welfare_cloud::{CloudError, UploadedImage};
use welfare_core::upload::{validate_file_count, FIELD_MULTIPLE, FIELD_SINGLE, MAX_FILES};

use crate::error::{AppError, AppResult};
use crate::extract::ApiQuery;
use crate::middleware::auth::RequireAdmin;
use crate::middleware::upload::collect_files;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImageParams {
    pub public_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedImage {
    pub public_id: String,
}

/// POST /api/upload/image
pub async fn upload_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedImage>>> {
    let file = collect_files(&mut multipart, FIELD_SINGLE, 1)
        .await?
        .pop()
        .ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;

    let file_name = file.file_name.clone();
    let image = state.images.upload(file).await?;
    tracing::info!(admin_id = admin.id, file_name = %file_name, public_id = %image.public_id, "Image uploaded");

    Ok(Json(
        ApiResponse::ok(image).with_message("Image uploaded successfully"),
    ))
}

/// POST /api/upload/images
///
/// Uploads run concurrently; any failure fails the whole request.
pub async fn upload_images(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<Vec<UploadedImage>>>> {
    let files = collect_files(&mut multipart, FIELD_MULTIPLE, MAX_FILES).await?;
    validate_file_count(files.len())?;

    let images = try_join_all(files.into_iter().map(|file| state.images.upload(file))).await?;
    tracing::info!(admin_id = admin.id, count = images.len(), "Images uploaded");

    let message = format!("{} images uploaded successfully", images.len());
    Ok(Json(ApiResponse::ok(images).with_message(message)))
}

/// DELETE /api/upload/image?publicId=
pub async fn delete_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<DeleteImageParams>,
) -> AppResult<Json<ApiResponse<DeletedImage>>> {
    let public_id = params
        .public_id
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            AppError::BadRequest(
                "Public ID is required. Use: /api/upload/image?publicId=YOUR_PUBLIC_ID".into(),
            )
        })?;

    match state.images.destroy(&public_id).await {
        Ok(()) => {}
        Err(CloudError::NotFound(_)) => {
            return Err(AppError::NotFound(
                "Image not found or already deleted".into(),
            ))
        }
        Err(e) => return Err(e.into()),
    }
    tracing::info!(admin_id = admin.id, public_id = %public_id, "Image deleted");

    Ok(Json(
        ApiResponse::ok(DeletedImage { public_id }).with_message("Image deleted successfully"),
    ))
}
