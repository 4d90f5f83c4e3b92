//! IP geolocation via an ip-api.com compatible endpoint.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use welfare_core::types::GeoLocation;

use crate::error::CloudError;

const SERVICE: &str = "Geolocation";

pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";

const FIELDS: &str = "status,message,country,countryCode,city,region,timezone,lat,lon";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolve a client IP to an approximate location.
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// `Ok(None)` when the address is not publicly routable and no lookup
    /// was made.
    async fn locate(&self, ip: &str) -> Result<Option<GeoLocation>, CloudError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
    city: Option<String>,
    region: Option<String>,
    timezone: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

pub struct IpApiLocator {
    client: reqwest::Client,
    base_url: String,
}

impl IpApiLocator {
    pub fn new(base_url: impl Into<String>) -> Result<Self, CloudError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl GeoLocator for IpApiLocator {
    async fn locate(&self, ip: &str) -> Result<Option<GeoLocation>, CloudError> {
        if !is_public_ip(ip) {
            return Ok(None);
        }

        let response = self
            .client
            .get(format!("{}/{ip}", self.base_url.trim_end_matches('/')))
            .query(&[("fields", FIELDS)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CloudError::from_response(SERVICE, response).await);
        }

        let body: IpApiResponse = response.json().await?;
        if body.status != "success" {
            return Err(CloudError::InvalidResponse {
                service: SERVICE,
                detail: body.message.unwrap_or(body.status),
            });
        }

        Ok(Some(GeoLocation {
            ip: Some(ip.to_string()),
            country: body.country,
            country_code: body.country_code,
            city: body.city,
            region: body.region,
            timezone: body.timezone,
            latitude: body.lat,
            longitude: body.lon,
        }))
    }
}

/// Whether `ip` parses and is worth looking up. Loopback, private,
/// link-local and unspecified addresses (including their IPv4-mapped IPv6
/// forms) are not.
pub fn is_public_ip(ip: &str) -> bool {
    let Ok(addr) = ip.trim().parse::<IpAddr>() else {
        return false;
    };
    let addr = match addr {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(IpAddr::V6(v6)),
        v4 => v4,
    };
    match addr {
        IpAddr::V4(v4) => {
            !(v4.is_loopback() || v4.is_private() || v4.is_link_local() || v4.is_unspecified())
        }
        IpAddr::V6(v6) => {
            let unique_local = (v6.segments()[0] & 0xfe00) == 0xfc00;
            let link_local = (v6.segments()[0] & 0xffc0) == 0xfe80;
            !(v6.is_loopback() || v6.is_unspecified() || unique_local || link_local)
        }
    }
}
