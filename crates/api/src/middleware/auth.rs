//! Bearer-token extractors that load the account the token names.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use welfare_core::error::CoreError;
use welfare_core::roles::{ACCOUNT_ADMIN, ACCOUNT_DONOR};
use welfare_db::models::admin::Admin;
use welfare_db::models::donor::Donor;
use welfare_db::repositories::{AdminRepo, DonorRepo};

use crate::auth::jwt::{validate_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

const NOT_AUTHORIZED: &str = "Not authorized to access this route";

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

/// Decode the `Authorization: Bearer <token>` header.
///
/// Missing headers and bad tokens are both reported as the same 401.
fn bearer_claims(parts: &Parts, state: &AppState) -> Result<Claims, AppError> {
    let token = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| unauthorized(NOT_AUTHORIZED))?;

    validate_token(token, &state.config.jwt).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        unauthorized(NOT_AUTHORIZED)
    })
}

/// An active admin account.
///
/// ```ignore
/// async fn handler(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> { .. }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Admin);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)?;
        if claims.kind != ACCOUNT_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Access denied. Admin only.".into(),
            )));
        }

        let admin = AdminRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| unauthorized("Admin not found"))?;
        if !admin.is_active {
            return Err(unauthorized("Admin account is deactivated"));
        }
        Ok(RequireAdmin(admin))
    }
}

/// An active donor account.
#[derive(Debug, Clone)]
pub struct AuthDonor(pub Donor);

impl FromRequestParts<AppState> for AuthDonor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)?;
        if claims.kind != ACCOUNT_DONOR {
            return Err(unauthorized(NOT_AUTHORIZED));
        }

        let donor = DonorRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| unauthorized("Donor not found"))?;
        if !donor.is_active {
            return Err(unauthorized("Donor account is deactivated"));
        }
        Ok(AuthDonor(donor))
    }
}

/// The signed-in donor, if any. Public routes use this to link records to
/// an account without requiring one; absent, invalid, or non-donor tokens
/// all yield `None`.
#[derive(Debug, Clone, Default)]
pub struct OptionalDonor(pub Option<Donor>);

impl FromRequestParts<AppState> for OptionalDonor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(claims) = bearer_claims(parts, state) else {
            return Ok(OptionalDonor(None));
        };
        if claims.kind != ACCOUNT_DONOR {
            return Ok(OptionalDonor(None));
        }
        let donor = DonorRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .filter(|d| d.is_active);
        Ok(OptionalDonor(donor))
    }
}
