//! Upload gate: size and MIME limits applied before anything is sent to the
//! image store.

use crate::error::CoreError;

/// Per-file size limit (5 MiB).
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Maximum number of files accepted by the multi-file endpoint.
pub const MAX_FILES: usize = 10;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "application/pdf",
];

/// Form field carrying a single upload.
pub const FIELD_SINGLE: &str = "image";
/// Form field carrying a batch upload.
pub const FIELD_MULTIPLE: &str = "images";

/// Transformation applied by the image store to every upload.
pub const TRANSFORMATION: &str = "c_limit,w_1200/q_auto/f_auto";

pub fn validate_mime_type(content_type: &str) -> Result<(), CoreError> {
    let base = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if ALLOWED_MIME_TYPES.contains(&base.as_str()) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Invalid file type. Only JPEG, PNG, WEBP and PDF files are allowed".into(),
        ))
    }
}

pub fn validate_file_size(len: usize) -> Result<(), CoreError> {
    if len == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if len > MAX_FILE_SIZE {
        return Err(CoreError::Validation(format!(
            "File too large. Maximum size is {} MB",
            MAX_FILE_SIZE / (1024 * 1024)
        )));
    }
    Ok(())
}

pub fn validate_file_count(count: usize) -> Result<(), CoreError> {
    if count == 0 {
        return Err(CoreError::Validation("No files uploaded".into()));
    }
    if count > MAX_FILES {
        return Err(CoreError::Validation(format!(
            "Too many files. Maximum is {MAX_FILES}"
        )));
    }
    Ok(())
}
