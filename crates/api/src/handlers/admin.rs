//! Handlers for the `/admin` account resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use welfare_core::error::CoreError;
use welfare_core::roles::ACCOUNT_ADMIN;
use welfare_core::validation::{normalize_email, validate_email, validate_password};
use welfare_db::is_unique_violation;
use welfare_db::models::admin::{AdminResponse, CreateAdmin, UpdateAdminProfile};
use welfare_db::repositories::AdminRepo;

use super::auth::{
    check_login, hash, invalid_credentials, issue_token, AuthResponse, ChangePasswordRequest,
    LoginRequest, RegisterRequest,
};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::auth::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

const DUPLICATE_EMAIL: &str = "Admin with this email already exists";

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// POST /api/admin/register
///
/// Open while `ADMIN_REGISTRATION_ENABLED` is on; use the `create-admin`
/// binary to bootstrap accounts when it is off.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthResponse<AdminResponse>>>)> {
    if !state.config.admin_registration_enabled {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin registration is disabled".into(),
        )));
    }
    let input = input.normalized()?;

    if AdminRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(DUPLICATE_EMAIL.into()));
    }

    let create = CreateAdmin {
        name: input.name,
        email: input.email,
        password_hash: hash(&input.password)?,
        role: None,
    };
    let admin = AdminRepo::create(&state.pool, &create)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::BadRequest(DUPLICATE_EMAIL.into())
            } else {
                AppError::Database(e)
            }
        })?;

    let token = issue_token(&state, admin.id, ACCOUNT_ADMIN, &admin.role)?;
    tracing::info!(admin_id = admin.id, "Admin registered");

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::ok(AuthResponse {
                account: admin.into(),
                token,
            })
            .with_message("Admin registered successfully"),
        ),
    ))
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse<AdminResponse>>>> {
    let (email, password) = input.credentials()?;

    let admin = AdminRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;
    check_login(password, &admin.password_hash, admin.is_active)?;

    AdminRepo::record_login(&state.pool, admin.id).await?;
    let token = issue_token(&state, admin.id, ACCOUNT_ADMIN, &admin.role)?;
    tracing::info!(admin_id = admin.id, "Admin logged in");

    Ok(Json(
        ApiResponse::ok(AuthResponse {
            account: admin.into(),
            token,
        })
        .with_message("Login successful"),
    ))
}

/// GET /api/admin/profile
pub async fn profile(RequireAdmin(admin): RequireAdmin) -> Json<ApiResponse<AdminResponse>> {
    Json(ApiResponse::ok(admin.into()))
}

/// PUT /api/admin/profile
pub async fn update_profile(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<AdminResponse>>> {
    let name = input
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    let email = input.email.map(|e| normalize_email(&e));

    if let Some(email) = email.as_deref() {
        validate_email(email)?;
        if email != admin.email
            && AdminRepo::find_by_email(&state.pool, email).await?.is_some()
        {
            return Err(AppError::BadRequest(DUPLICATE_EMAIL.into()));
        }
    }

    let updated = AdminRepo::update_profile(&state.pool, admin.id, &UpdateAdminProfile { name, email })
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::BadRequest(DUPLICATE_EMAIL.into())
            } else {
                AppError::Database(e)
            }
        })?
        .ok_or_else(|| AppError::NotFound("Admin not found".into()))?;

    Ok(Json(
        ApiResponse::ok(updated.into()).with_message("Profile updated successfully"),
    ))
}

/// PUT /api/admin/reset-password
///
/// Change the signed-in admin's password after confirming the current one.
pub async fn reset_password(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let (Some(current), Some(new)) = (input.current_password, input.new_password) else {
        return Err(AppError::BadRequest(
            "Please provide current and new password".into(),
        ));
    };
    validate_password(&new)?;

    let matches = verify_password(&current, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !matches {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    AdminRepo::update_password(&state.pool, admin.id, &hash(&new)?).await?;
    tracing::info!(admin_id = admin.id, "Admin password changed");

    Ok(Json(ApiResponse::message("Password updated successfully")))
}
