//! Read-only aggregate rows produced by `StatisticsRepo` and
//! `DonationRepo::summary_statistics`.

use serde::Serialize;
use sqlx::FromRow;
use welfare_core::types::DbId;

/// A sum of converted amounts and a row count.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct AmountCount {
    pub amount: f64,
    pub count: i64,
}

/// Whole-table donation totals.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationTotals {
    pub total_amount: f64,
    pub average_amount: f64,
    pub count: i64,
    pub min_amount: f64,
    pub max_amount: f64,
}

/// One calendar month bucket, `month` formatted `YYYY-MM`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    pub month: String,
    pub total_amount: f64,
    pub count: i64,
    pub average_amount: f64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryTotal {
    pub country: String,
    pub amount: f64,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodTotal {
    pub payment_method: String,
    pub total_amount: f64,
    pub count: i64,
}

/// Projects grouped by status or category.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGroup {
    pub key: String,
    pub count: i64,
    pub total_funding: f64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFunding {
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub target_amount: f64,
    pub raised_amount: f64,
    pub funding_percentage: f64,
}

/// Donors ranked by total given, grouped by donation email.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDonor {
    pub email: String,
    pub name: String,
    pub total_donated: f64,
    pub donation_count: i64,
    pub average_donation: f64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCount {
    pub country: String,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorTypeCount {
    pub donor_type: String,
    pub count: i64,
}

/// Response body of `GET /api/donations/statistics/summary`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationSummaryStats {
    pub total: SummaryTotal,
    pub monthly: AmountCount,
    pub last_month: AmountCount,
    pub daily: AmountCount,
    pub by_currency: Vec<super::donation::CurrencyTotal>,
    pub by_country: Vec<CountryTotal>,
    pub by_status: Vec<StatusCount>,
    /// Month-over-month change in percent, one decimal place.
    pub monthly_growth: f64,
}

#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct SummaryTotal {
    pub amount: f64,
    pub count: i64,
    pub average: f64,
}

/// Project counts by headline status.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct ProjectCounts {
    pub total: i64,
    pub active: i64,
    pub completed: i64,
}
