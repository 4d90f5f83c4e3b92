//! Image hosting on Cloudinary.
//!
//! Uploads go to `/{cloud}/auto/upload` with a signed request; deletions go
//! to `/{cloud}/image/destroy`. Every upload is stored under the configured
//! folder with the fixed `welfare_core::upload::TRANSFORMATION` profile.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use welfare_core::upload::TRANSFORMATION;

use crate::error::CloudError;

const SERVICE: &str = "Cloudinary";

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

pub const DEFAULT_FOLDER: &str = "welfare_organization";

/// Uploads carry up to 5 MiB each, so allow more time than other calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A buffered file received from a multipart request.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
}

/// Remote image storage.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store one file and return its public URL and identifier.
    async fn upload(&self, file: ImageFile) -> Result<UploadedImage, CloudError>;

    /// Remove a stored file. Returns [`CloudError::NotFound`] when the
    /// remote store has no file with this identifier.
    async fn destroy(&self, public_id: &str) -> Result<(), CloudError>;
}

/// Cloudinary credentials and placement.
#[derive(Debug, Clone, Default)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
    pub api_base: String,
}

impl CloudinaryConfig {
    /// Read `CLOUDINARY_*` variables. Missing credentials are left empty;
    /// the store reports [`CloudError::NotConfigured`] on first use.
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).unwrap_or_default();
        Self {
            cloud_name: var("CLOUDINARY_CLOUD_NAME"),
            api_key: var("CLOUDINARY_API_KEY"),
            api_secret: var("CLOUDINARY_API_SECRET"),
            folder: std::env::var("CLOUDINARY_FOLDER")
                .unwrap_or_else(|_| DEFAULT_FOLDER.to_string()),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.cloud_name.is_empty() && !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    width: Option<u32>,
    height: Option<u32>,
    format: Option<String>,
    bytes: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// [`ImageStore`] backed by the Cloudinary upload API.
pub struct CloudinaryStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, CloudError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.config.api_base, self.config.cloud_name, path)
    }

    fn ensure_configured(&self) -> Result<(), CloudError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(CloudError::NotConfigured(SERVICE))
        }
    }
}

#[async_trait]
impl ImageStore for CloudinaryStore {
    async fn upload(&self, file: ImageFile) -> Result<UploadedImage, CloudError> {
        self.ensure_configured()?;

        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[
                ("folder", self.config.folder.as_str()),
                ("timestamp", timestamp.as_str()),
                ("transformation", TRANSFORMATION),
            ],
            &self.config.api_secret,
        );

        let part = reqwest::multipart::Part::bytes(file.data)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", self.config.folder.clone())
            .text("transformation", TRANSFORMATION)
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint("auto/upload"))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CloudError::from_response(SERVICE, response).await);
        }

        let body: UploadResponse = response.json().await?;
        tracing::info!(public_id = %body.public_id, "Image uploaded");
        Ok(UploadedImage {
            url: body.secure_url,
            public_id: body.public_id,
            width: body.width,
            height: body.height,
            format: body.format,
            bytes: body.bytes,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), CloudError> {
        self.ensure_configured()?;

        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );
        let params = [
            ("public_id", public_id),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.config.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        let response = self
            .client
            .post(self.endpoint("image/destroy"))
            .form(&params)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CloudError::from_response(SERVICE, response).await);
        }

        let body: DestroyResponse = response.json().await?;
        match body.result.as_str() {
            "ok" => {
                tracing::info!(public_id, "Image deleted");
                Ok(())
            }
            "not found" => Err(CloudError::NotFound(public_id.to_string())),
            other => Err(CloudError::InvalidResponse {
                service: SERVICE,
                detail: format!("destroy result '{other}'"),
            }),
        }
    }
}

/// Cloudinary request signature: SHA-1 hex of the parameters sorted by
/// name and joined as `k=v&k=v`, immediately followed by the API secret.
pub fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let digest = Sha1::digest(format!("{joined}{api_secret}").as_bytes());
    format!("{digest:x}")
}
