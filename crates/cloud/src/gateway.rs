//! Meezan Bank hosted payment page.
//!
//! A donation paid by card or wallet is registered with `register.do`; the
//! bank answers with a `formUrl` the donor's browser is sent to. The body
//! is usually JSON but older deployments answer with XML or plain text, so
//! parsing is delegated to [`welfare_core::payment::parse_registration`].

use std::time::Duration;

use async_trait::async_trait;
use welfare_core::currency::iso_numeric_code;
use welfare_core::payment::{parse_registration, to_minor_units};

use crate::error::CloudError;

const SERVICE: &str = "Meezan";

const DEFAULT_BASE_URL: &str = "https://acquiring.meezanbank.com/payment/rest";
const DEFAULT_RETURN_URL: &str = "http://localhost:3000/donate/success";
const DEFAULT_CANCEL_URL: &str = "http://localhost:3000/donation/cancel";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// An order to register with the gateway.
#[derive(Debug, Clone)]
pub struct GatewayOrder {
    /// Merchant-side order number (the donation reference).
    pub order_number: String,
    pub amount: f64,
    pub currency: String,
    pub description: String,
}

/// Gateway acknowledgement of a registered order.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredOrder {
    pub redirect_url: String,
    pub order_id: Option<String>,
}

/// Hosted payment page provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn register(&self, order: &GatewayOrder) -> Result<RegisteredOrder, CloudError>;
}

#[derive(Debug, Clone, Default)]
pub struct MeezanConfig {
    pub username: String,
    pub password: String,
    pub base_url: String,
    pub return_url: String,
    pub cancel_url: String,
}

impl MeezanConfig {
    /// Read `MEEZAN_*` variables. `MEEZAN_ENVIRONMENT=live` selects
    /// `MEEZAN_LIVE_URL`, anything else `MEEZAN_TEST_URL`.
    pub fn from_env() -> Self {
        let var = |key: &str, default: &str| {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };
        let live = var("MEEZAN_ENVIRONMENT", "test").eq_ignore_ascii_case("live");
        let base_url = if live {
            var("MEEZAN_LIVE_URL", DEFAULT_BASE_URL)
        } else {
            var("MEEZAN_TEST_URL", DEFAULT_BASE_URL)
        };
        Self {
            username: var("MEEZAN_USERNAME", ""),
            password: var("MEEZAN_PASSWORD", ""),
            base_url,
            return_url: var("MEEZAN_RETURN_URL", DEFAULT_RETURN_URL),
            cancel_url: var("MEEZAN_CANCEL_URL", DEFAULT_CANCEL_URL),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

pub struct MeezanGateway {
    client: reqwest::Client,
    config: MeezanConfig,
}

impl MeezanGateway {
    pub fn new(config: MeezanConfig) -> Result<Self, CloudError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Form fields for `register.do`. Amounts are in minor units and the
    /// currency is its ISO-4217 numeric code.
    fn form_fields(&self, order: &GatewayOrder) -> Result<Vec<(&'static str, String)>, CloudError> {
        let currency = iso_numeric_code(&order.currency).ok_or_else(|| {
            CloudError::InvalidResponse {
                service: SERVICE,
                detail: format!("unsupported currency {}", order.currency),
            }
        })?;
        Ok(vec![
            ("userName", self.config.username.clone()),
            ("password", self.config.password.clone()),
            ("orderNumber", order.order_number.clone()),
            ("amount", to_minor_units(order.amount).to_string()),
            ("currency", currency.to_string()),
            ("returnUrl", self.config.return_url.clone()),
            ("failUrl", self.config.cancel_url.clone()),
            ("description", order.description.clone()),
        ])
    }
}

#[async_trait]
impl PaymentGateway for MeezanGateway {
    async fn register(&self, order: &GatewayOrder) -> Result<RegisteredOrder, CloudError> {
        if !self.config.is_configured() {
            return Err(CloudError::NotConfigured(SERVICE));
        }

        let fields = self.form_fields(order)?;
        let response = self
            .client
            .post(format!("{}/register.do", self.config.base_url))
            .form(&fields)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CloudError::from_response(SERVICE, response).await);
        }

        let body = response.text().await?;
        let registration = parse_registration(&body);
        match registration.form_url {
            Some(redirect_url) => {
                tracing::info!(
                    order_number = %order.order_number,
                    order_id = ?registration.order_id,
                    "Payment order registered",
                );
                Ok(RegisteredOrder {
                    redirect_url,
                    order_id: registration.order_id,
                })
            }
            None => Err(CloudError::InvalidResponse {
                service: SERVICE,
                detail: registration
                    .error_message
                    .unwrap_or_else(|| "no payment URL in response".to_string()),
            }),
        }
    }
}
