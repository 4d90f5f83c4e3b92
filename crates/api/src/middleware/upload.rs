//! In-memory multipart collection for the upload endpoints.
//!
//! Every file is checked against the MIME allow-list and the per-file size
//! limit while it is read, so an oversized or disallowed file is rejected
//! before any bytes reach the image store.

use axum::extract::multipart::Field;
use axum::extract::{DefaultBodyLimit, Multipart};
use welfare_cloud::ImageFile;
use welfare_core::upload::{validate_file_size, validate_mime_type, MAX_FILES, MAX_FILE_SIZE};

use crate::error::{AppError, AppResult};

/// Headroom for multipart boundaries and part headers.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Body limit for upload routes: a full batch of maximum-size files.
pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_FILES * MAX_FILE_SIZE + MULTIPART_OVERHEAD)
}

/// Collect every file part named `field_name`, at most `max_files` of them.
///
/// Non-file parts are skipped; file parts under any other name are rejected.
pub async fn collect_files(
    multipart: &mut Multipart,
    field_name: &str,
    max_files: usize,
) -> AppResult<Vec<ImageFile>> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.file_name().is_none() {
            continue;
        }
        if field.name() != Some(field_name) {
            return Err(AppError::BadRequest(format!(
                "Unexpected field '{}'. Use '{field_name}'",
                field.name().unwrap_or_default()
            )));
        }
        if files.len() == max_files {
            return Err(AppError::BadRequest(format!(
                "Too many files. Maximum is {max_files}"
            )));
        }
        files.push(read_file(field).await?);
    }

    Ok(files)
}

async fn read_file(mut field: Field<'_>) -> AppResult<ImageFile> {
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    validate_mime_type(&content_type)?;

    let mut data = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        validate_file_size(data.len() + chunk.len())?;
        data.extend_from_slice(&chunk);
    }
    validate_file_size(data.len())?;

    Ok(ImageFile {
        file_name,
        content_type,
        data,
    })
}
