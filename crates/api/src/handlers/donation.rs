//! Handlers for the `/donations` resource.
//!
//! Intake is public: the donation is stored and credited first, then card
//! and wallet payments are registered with the hosted payment page. A
//! failed registration marks the donation `failed`, which reverses the
//! credit, and surfaces as a 500.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use welfare_cloud::GatewayOrder;
use welfare_core::currency::{convert_to_pkr, validate_currency, DEFAULT_CURRENCY};
use welfare_core::donation::{
    card_last4, gateway_for_method, initial_status, requires_gateway, validate_amount,
    validate_converted_amount, validate_payment_method, validate_status,
    DEFAULT_BANK_ACCOUNT_TITLE, DEFAULT_BANK_NAME, DEFAULT_BANK_SWIFT_CODE, DEFAULT_PAGE_SIZE,
    DEFAULT_PAYMENT_METHOD, MAX_PAGE_SIZE,
};
use welfare_core::error::CoreError;
use welfare_core::types::{parse_timestamp, DbId, GeoLocation};
use welfare_core::validation::{is_valid_email, normalize_email};
use welfare_db::models::donation::{
    CreateDonation, DonationFilter, DonationListSummary, DonationView, GatewayUpdate,
    VerifyDonation,
};
use welfare_db::models::donation_settings::{DonationSettings, UpdateDonationSettings};
use welfare_db::models::statistics::DonationSummaryStats;
use welfare_db::repositories::{DonationRepo, DonationSettingsRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery, ClientMeta};
use crate::middleware::auth::{OptionalDonor, RequireAdmin};
use crate::query::{non_empty, PageParams};
use crate::response::{ApiResponse, Pagination};
use crate::state::AppState;

const GATEWAY_FAILURE: &str = "Failed to get payment URL from Meezan Bank";
const GATEWAY_STATUS_REGISTERED: &str = "registered";
const GATEWAY_STATUS_FAILED: &str = "registration_failed";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Nested donor contact block.
#[derive(Debug, Default, Deserialize)]
pub struct DonorContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
}

/// A number or a numeric string, as sent by HTML forms.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    fn value(&self) -> Option<f64> {
        match self {
            AmountInput::Number(n) => Some(*n),
            AmountInput::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Body of `POST /donations`. Donor contact may arrive either as a nested
/// `donor` object or as flat `fullName`/`email`/`phone`/`address` fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    pub donor: Option<DonorContact>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub project_id: Option<DbId>,
    pub amount: Option<AmountInput>,
    pub currency: Option<String>,
    pub payment_method: Option<String>,
    pub privacy_policy_accepted: Option<bool>,
    pub terms_accepted: Option<bool>,
    pub card_number: Option<String>,
    pub card_brand: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationCreated {
    pub donation_id: DbId,
    pub reference: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyDonationRequest {
    pub status: Option<String>,
    pub bank_reference: Option<String>,
    pub bank_transfer_date: Option<String>,
    pub bank_transfer_slip: Option<String>,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DonationListParams {
    pub status: Option<String>,
    pub currency: Option<String>,
    pub country: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

fn not_found() -> AppError {
    AppError::NotFound("Donation not found".into())
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// GET /api/donations/settings
pub async fn get_settings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DonationSettings>>> {
    let settings = DonationSettingsRepo::get_or_create(&state.pool).await?;
    Ok(Json(ApiResponse::ok(settings)))
}

/// PUT /api/donations/settings
pub async fn update_settings(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<UpdateDonationSettings>,
) -> AppResult<Json<ApiResponse<DonationSettings>>> {
    if let Some(currency) = input.default_currency.as_deref() {
        validate_currency(currency)?;
    }
    for currency in input.accepted_currencies.iter().flatten() {
        validate_currency(currency)?;
    }
    for method in input.enabled_payment_methods.iter().flatten() {
        validate_payment_method(method)?;
    }

    let settings = DonationSettingsRepo::update(&state.pool, &input, admin.id).await?;
    tracing::info!(admin_id = admin.id, "Donation settings updated");

    Ok(Json(
        ApiResponse::ok(settings).with_message("Donation settings updated successfully"),
    ))
}

// ---------------------------------------------------------------------------
// Intake
// ---------------------------------------------------------------------------

/// POST /api/donations
pub async fn create(
    OptionalDonor(account): OptionalDonor,
    meta: ClientMeta,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateDonationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<DonationCreated>>)> {
    let contact = input.donor.unwrap_or_default();

    let name = blank_to_none(contact.name.or(input.full_name))
        .or_else(|| account.as_ref().map(|d| d.name.clone()));
    let email = blank_to_none(contact.email.or(input.email))
        .or_else(|| account.as_ref().map(|d| d.email.clone()));
    let (Some(name), Some(email)) = (name, email) else {
        return Err(AppError::BadRequest(
            "Full name and email are required".into(),
        ));
    };
    if !is_valid_email(&email) {
        return Err(AppError::BadRequest(
            "Please provide a valid email address".into(),
        ));
    }

    let amount = input
        .amount
        .as_ref()
        .and_then(AmountInput::value)
        .unwrap_or_default();
    validate_amount(amount)?;

    let currency = blank_to_none(input.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
    validate_currency(&currency)?;

    let payment_method = blank_to_none(input.payment_method)
        .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());
    validate_payment_method(&payment_method)?;

    let location = match meta.ip.as_deref() {
        Some(ip) => locate(&state, ip).await,
        None => GeoLocation::default(),
    };
    let country = blank_to_none(contact.country)
        .or_else(|| location.country.clone())
        .unwrap_or_default();

    let conversion = convert_to_pkr(amount, &currency);
    validate_converted_amount(conversion.converted_amount)?;
    let create = CreateDonation {
        donor_id: account.as_ref().map(|d| d.id),
        project_id: input.project_id,
        donor_name: name,
        donor_email: normalize_email(&email),
        donor_phone: contact.phone.or(input.phone).unwrap_or_default().trim().to_string(),
        donor_address: contact
            .address
            .or(input.address)
            .unwrap_or_default()
            .trim()
            .to_string(),
        donor_country: country,
        amount,
        currency: currency.clone(),
        converted_amount: conversion.converted_amount,
        exchange_rate: conversion.exchange_rate,
        payment_method: payment_method.clone(),
        payment_gateway: gateway_for_method(&payment_method).to_string(),
        status: initial_status(&payment_method).to_string(),
        bank_name: Some(DEFAULT_BANK_NAME.to_string()),
        bank_account_title: Some(DEFAULT_BANK_ACCOUNT_TITLE.to_string()),
        bank_swift_code: Some(DEFAULT_BANK_SWIFT_CODE.to_string()),
        ip_address: meta.ip,
        location,
        user_agent: meta.user_agent,
        privacy_policy_accepted: input.privacy_policy_accepted.unwrap_or(true),
        terms_accepted: input.terms_accepted.unwrap_or(true),
        card_last4: input.card_number.as_deref().and_then(card_last4),
        card_brand: blank_to_none(input.card_brand),
        notes: blank_to_none(input.notes),
    };

    let donation = DonationRepo::create(&state.pool, &create)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23503") => {
                AppError::NotFound("Project not found".into())
            }
            _ => AppError::Database(e),
        })?;
    let reference = donation.reference.clone().unwrap_or_default();
    tracing::info!(
        donation_id = donation.id,
        reference = %reference,
        amount,
        currency = %currency,
        payment_method = %payment_method,
        "Donation received"
    );

    let mut form_url = None;
    if requires_gateway(&payment_method) {
        let order = GatewayOrder {
            order_number: reference.clone(),
            amount,
            currency: currency.clone(),
            description: format!("Donation {reference}"),
        };
        match state.gateway.register(&order).await {
            Ok(registered) => {
                DonationRepo::record_gateway(
                    &state.pool,
                    donation.id,
                    &GatewayUpdate {
                        order_id: registered.order_id,
                        status: GATEWAY_STATUS_REGISTERED.to_string(),
                    },
                )
                .await?;
                form_url = Some(registered.redirect_url);
            }
            Err(e) => {
                tracing::error!(
                    donation_id = donation.id,
                    reference = %reference,
                    error = %e,
                    "Payment gateway registration failed"
                );
                DonationRepo::mark_gateway_failed(&state.pool, donation.id, GATEWAY_STATUS_FAILED)
                    .await?;
                return Err(AppError::Upstream(GATEWAY_FAILURE.into()));
            }
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::ok(DonationCreated {
                donation_id: donation.id,
                reference,
                status: donation.status,
                form_url,
            })
            .with_message("Donation request created successfully"),
        ),
    ))
}

/// Best-effort IP lookup. Failures are logged and yield an empty location.
async fn locate(state: &AppState, ip: &str) -> GeoLocation {
    match state.geo.locate(ip).await {
        Ok(Some(mut location)) => {
            location.ip.get_or_insert_with(|| ip.to_string());
            location
        }
        Ok(None) => GeoLocation::default(),
        Err(e) => {
            tracing::warn!(ip, error = %e, "Location detection failed");
            GeoLocation::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/donations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ApiResponse<DonationView>>> {
    let row = DonationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(ApiResponse::ok(row.into())))
}

/// GET /api/donations
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<DonationListParams>,
) -> AppResult<Json<ApiResponse<Vec<DonationView>, DonationListSummary>>> {
    let (page, limit, offset) = PageParams {
        page: params.page,
        limit: params.limit,
    }
    .resolve(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);

    let filter = DonationFilter {
        status: non_empty(&params.status),
        currency: non_empty(&params.currency),
        country: non_empty(&params.country),
        search: non_empty(&params.search),
    };

    let rows = DonationRepo::list(&state.pool, &filter, limit, offset).await?;
    let summary = DonationRepo::list_summary(&state.pool, &filter).await?;
    let donations: Vec<DonationView> = rows.into_iter().map(DonationView::from).collect();
    let pagination = Pagination::new(page, limit, summary.total_count);

    Ok(Json(
        ApiResponse::ok(donations)
            .with_pagination(pagination)
            .with_summary(summary),
    ))
}

/// GET /api/donations/statistics/summary
pub async fn summary(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DonationSummaryStats>>> {
    let stats = DonationRepo::summary_statistics(&state.pool, chrono::Utc::now()).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

// ---------------------------------------------------------------------------
// Admin writes
// ---------------------------------------------------------------------------

/// PUT /api/donations/{id}/verify
pub async fn verify(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<VerifyDonationRequest>,
) -> AppResult<Json<ApiResponse<DonationView>>> {
    let status = blank_to_none(input.status);
    if let Some(status) = status.as_deref() {
        validate_status(status)?;
    }
    let bank_transfer_date = match blank_to_none(input.bank_transfer_date) {
        None => None,
        Some(raw) => Some(parse_timestamp(&raw).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Invalid bank transfer date '{raw}'"
            )))
        })?),
    };

    let verify = VerifyDonation {
        status: status.clone(),
        bank_reference: blank_to_none(input.bank_reference),
        bank_transfer_date,
        bank_transfer_slip: blank_to_none(input.bank_transfer_slip),
        transaction_id: blank_to_none(input.transaction_id),
        notes: blank_to_none(input.notes),
        verified_by: admin.id,
    };
    DonationRepo::verify(&state.pool, id, &verify)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(donation_id = id, admin_id = admin.id, status = ?status, "Donation verified");

    let row = DonationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(
        ApiResponse::ok(row.into()).with_message("Donation updated successfully"),
    ))
}

/// DELETE /api/donations/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !DonationRepo::delete(&state.pool, id).await? {
        return Err(not_found());
    }
    tracing::info!(donation_id = id, admin_id = admin.id, "Donation deleted");
    Ok(Json(ApiResponse::message("Donation deleted successfully")))
}
