//! Donation settings singleton model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use welfare_core::types::{DbId, Timestamp};

/// The single row of `donation_settings`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationSettings {
    pub bank_details_image: String,
    pub bank_details_image2: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_title: String,
    pub iban: String,
    pub swift_code: String,
    pub branch_code: String,
    pub branch_address: String,
    pub international_bank_name: Option<String>,
    pub international_account_number: Option<String>,
    pub international_swift_code: Option<String>,
    pub international_routing_number: Option<String>,
    pub payment_instructions: String,
    pub privacy_policy_text: String,
    pub accepted_currencies: Vec<String>,
    pub default_currency: String,
    /// Display-only rates keyed by currency code.
    pub exchange_rates: Json<BTreeMap<String, f64>>,
    pub enabled_payment_methods: Vec<String>,
    pub receipt_email_subject: Option<String>,
    pub receipt_email_body: Option<String>,
    pub contact_email: String,
    pub contact_phone: String,
    pub notify_on_donation: bool,
    pub notification_emails: Vec<String>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update of the settings row. Unknown JSON keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonationSettings {
    pub bank_details_image: Option<String>,
    pub bank_details_image2: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub account_title: Option<String>,
    pub iban: Option<String>,
    pub swift_code: Option<String>,
    pub branch_code: Option<String>,
    pub branch_address: Option<String>,
    pub international_bank_name: Option<String>,
    pub international_account_number: Option<String>,
    pub international_swift_code: Option<String>,
    pub international_routing_number: Option<String>,
    pub payment_instructions: Option<String>,
    pub privacy_policy_text: Option<String>,
    pub accepted_currencies: Option<Vec<String>>,
    pub default_currency: Option<String>,
    pub exchange_rates: Option<BTreeMap<String, f64>>,
    pub enabled_payment_methods: Option<Vec<String>>,
    pub receipt_email_subject: Option<String>,
    pub receipt_email_body: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub notify_on_donation: Option<bool>,
    pub notification_emails: Option<Vec<String>>,
}
