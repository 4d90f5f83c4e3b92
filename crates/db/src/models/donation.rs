//! Donation entity model and DTOs.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use welfare_core::currency::format_amount;
use welfare_core::donation::bank_summary;
use welfare_core::types::{DbId, GeoLocation, Timestamp};

/// A row from the `donations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: DbId,
    pub donor_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub donor_name: String,
    pub donor_email: String,
    pub donor_phone: String,
    pub donor_address: String,
    pub donor_country: String,
    pub amount: f64,
    pub currency: String,
    pub converted_amount: f64,
    pub exchange_rate: f64,
    pub payment_method: String,
    pub payment_gateway: String,
    pub gateway_transaction_id: Option<String>,
    pub gateway_order_id: Option<String>,
    pub gateway_status: Option<String>,
    pub reference: Option<String>,
    pub status: String,
    pub bank_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_account_title: Option<String>,
    pub bank_swift_code: Option<String>,
    pub bank_iban: Option<String>,
    pub bank_branch: Option<String>,
    pub bank_reference: Option<String>,
    pub bank_transfer_date: Option<Timestamp>,
    pub bank_transfer_slip: Option<String>,
    pub ip_address: Option<String>,
    pub location: Json<GeoLocation>,
    pub user_agent: Option<String>,
    pub privacy_policy_accepted: bool,
    pub privacy_policy_accepted_at: Option<Timestamp>,
    pub terms_accepted: bool,
    pub verified_by: Option<DbId>,
    pub verified_at: Option<Timestamp>,
    pub card_last4: Option<String>,
    pub card_brand: Option<String>,
    pub notes: Option<String>,
    pub receipt_sent: bool,
    pub receipt_sent_at: Option<Timestamp>,
    /// Whether the amount is currently counted in project/donor totals.
    pub project_credited: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Donation joined with its project's title.
#[derive(Debug, Clone, FromRow)]
pub struct DonationRow {
    #[sqlx(flatten)]
    pub donation: Donation,
    pub project_title: Option<String>,
}

/// Donation with derived display fields, as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationView {
    #[serde(flatten)]
    pub donation: Donation,
    pub project_title: Option<String>,
    pub formatted_amount: String,
    pub bank_summary: Option<String>,
}

impl From<DonationRow> for DonationView {
    fn from(row: DonationRow) -> Self {
        let d = row.donation;
        Self {
            formatted_amount: format_amount(d.amount, &d.currency),
            bank_summary: bank_summary(d.bank_name.as_deref(), d.bank_account_number.as_deref()),
            project_title: row.project_title,
            donation: d,
        }
    }
}

/// Insert DTO. All derived values (conversion, status, gateway) are
/// computed by the caller.
#[derive(Debug, Clone, Default)]
pub struct CreateDonation {
    pub donor_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub donor_name: String,
    pub donor_email: String,
    pub donor_phone: String,
    pub donor_address: String,
    pub donor_country: String,
    pub amount: f64,
    pub currency: String,
    pub converted_amount: f64,
    pub exchange_rate: f64,
    pub payment_method: String,
    pub payment_gateway: String,
    pub status: String,
    pub bank_name: Option<String>,
    pub bank_account_title: Option<String>,
    pub bank_swift_code: Option<String>,
    pub ip_address: Option<String>,
    pub location: GeoLocation,
    pub user_agent: Option<String>,
    pub privacy_policy_accepted: bool,
    pub terms_accepted: bool,
    pub card_last4: Option<String>,
    pub card_brand: Option<String>,
    pub notes: Option<String>,
}

/// Admin verification input. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct VerifyDonation {
    pub status: Option<String>,
    pub bank_reference: Option<String>,
    pub bank_transfer_date: Option<Timestamp>,
    pub bank_transfer_slip: Option<String>,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    /// Admin performing the verification; recorded on completion.
    pub verified_by: DbId,
}

/// Outcome of a gateway registration, stored on the donation.
#[derive(Debug, Clone, Default)]
pub struct GatewayUpdate {
    pub order_id: Option<String>,
    pub status: String,
}

/// Admin list filters.
#[derive(Debug, Clone, Default)]
pub struct DonationFilter {
    pub status: Option<String>,
    pub currency: Option<String>,
    /// Case-insensitive substring of the donor country.
    pub country: Option<String>,
    /// Case-insensitive substring over donor name, email, bank reference
    /// and gateway transaction id.
    pub search: Option<String>,
}

/// Per-currency totals in a list summary.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTotal {
    pub currency: String,
    pub amount: f64,
    pub converted_amount: f64,
    pub count: i64,
}

/// Totals over every donation matching a list filter.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationListSummary {
    pub total_amount: f64,
    pub total_count: i64,
    pub by_currency: Vec<CurrencyTotal>,
}
