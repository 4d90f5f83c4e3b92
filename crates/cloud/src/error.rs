/// Errors from the outbound integration layer.
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote service returned a non-2xx status code.
    #[error("{service} returned HTTP {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Credentials for the named service are missing.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// The remote resource does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The remote service answered, but not in a shape we can use.
    #[error("Unexpected response from {service}: {detail}")]
    InvalidResponse {
        service: &'static str,
        detail: String,
    },
}

impl CloudError {
    /// Build an [`CloudError::Api`] from a failed response, keeping the body
    /// for diagnostics.
    pub(crate) async fn from_response(service: &'static str, response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Self::Api {
            service,
            status,
            body,
        }
    }
}
