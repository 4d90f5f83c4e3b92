//! Handlers for the `/donors` resource: donor self-service and the admin
//! donor directory.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use welfare_core::roles::ACCOUNT_DONOR;
use welfare_core::types::DbId;
use welfare_db::is_unique_violation;
use welfare_db::models::donation::DonationView;
use welfare_db::models::donor::{
    CreateDonor, DonorAddress, DonorListFilter, DonorResponse, UpdateDonor,
};
use welfare_db::repositories::{DonationRepo, DonorRepo};

use super::auth::{check_login, hash, invalid_credentials, issue_token, AuthResponse, LoginRequest, RegisterRequest};
use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::auth::{AuthDonor, RequireAdmin};
use crate::query::non_empty;
use crate::response::ApiResponse;
use crate::state::AppState;

const DUPLICATE_EMAIL: &str = "Donor with this email already exists";

#[derive(Debug, Default, Deserialize)]
pub struct DonorRegisterRequest {
    #[serde(flatten)]
    pub account: RegisterRequest,
    pub phone: Option<String>,
    #[serde(default)]
    pub address: DonorAddress,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorListParams {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default).
    pub order: Option<String>,
}

/// POST /api/donors/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<DonorRegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthResponse<DonorResponse>>>)> {
    let account = input.account.normalized()?;

    if DonorRepo::find_by_email(&state.pool, &account.email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(DUPLICATE_EMAIL.into()));
    }

    let create = CreateDonor {
        name: account.name,
        email: account.email,
        password_hash: hash(&account.password)?,
        phone: input.phone.filter(|p| !p.trim().is_empty()),
        address: input.address,
    };
    let donor = DonorRepo::create(&state.pool, &create).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::BadRequest(DUPLICATE_EMAIL.into())
        } else {
            AppError::Database(e)
        }
    })?;

    let token = issue_token(&state, donor.id, ACCOUNT_DONOR, "")?;
    tracing::info!(donor_id = donor.id, "Donor registered");

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::ok(AuthResponse {
                account: donor.into(),
                token,
            })
            .with_message("Donor registered successfully"),
        ),
    ))
}

/// POST /api/donors/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse<DonorResponse>>>> {
    let (email, password) = input.credentials()?;

    let donor = DonorRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;
    check_login(password, &donor.password_hash, donor.is_active)?;

    let token = issue_token(&state, donor.id, ACCOUNT_DONOR, "")?;
    tracing::info!(donor_id = donor.id, "Donor logged in");

    Ok(Json(
        ApiResponse::ok(AuthResponse {
            account: donor.into(),
            token,
        })
        .with_message("Login successful"),
    ))
}

/// GET /api/donors/profile
pub async fn profile(AuthDonor(donor): AuthDonor) -> Json<ApiResponse<DonorResponse>> {
    Json(ApiResponse::ok(donor.into()))
}

/// PUT /api/donors/profile
///
/// Email and funding totals are not editable here.
pub async fn update_profile(
    AuthDonor(donor): AuthDonor,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<UpdateDonor>,
) -> AppResult<Json<ApiResponse<DonorResponse>>> {
    let update = UpdateDonor {
        name: input
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        ..input
    };
    let updated = DonorRepo::update(&state.pool, donor.id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound("Donor not found".into()))?;

    Ok(Json(
        ApiResponse::ok(updated.into()).with_message("Profile updated successfully"),
    ))
}

/// GET /api/donors/profile/donations
pub async fn my_donations(
    AuthDonor(donor): AuthDonor,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<DonationView>>>> {
    let donations: Vec<DonationView> = DonationRepo::list_for_donor(&state.pool, donor.id)
        .await?
        .into_iter()
        .map(DonationView::from)
        .collect();
    let count = donations.len();
    Ok(Json(ApiResponse::ok(donations).with_count(count)))
}

/// GET /api/donors
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<DonorListParams>,
) -> AppResult<Json<ApiResponse<Vec<DonorResponse>>>> {
    let filter = DonorListFilter {
        search: non_empty(&params.search),
        sort_by: non_empty(&params.sort_by),
        descending: !params
            .order
            .as_deref()
            .is_some_and(|o| o.eq_ignore_ascii_case("asc")),
    };
    let donors: Vec<DonorResponse> = DonorRepo::list(&state.pool, &filter)
        .await?
        .into_iter()
        .map(DonorResponse::from)
        .collect();
    let count = donors.len();
    Ok(Json(ApiResponse::ok(donors).with_count(count)))
}

/// GET /api/donors/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ApiResponse<DonorResponse>>> {
    let donor = DonorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Donor not found".into()))?;
    Ok(Json(ApiResponse::ok(donor.into())))
}
