//! Request and response types shared by the admin and donor account
//! handlers, plus the credential checks both flows run.

use serde::{Deserialize, Serialize};
use validator::Validate;
use welfare_core::error::CoreError;
use welfare_core::types::DbId;
use welfare_core::validation::{normalize_email, validate_request, EMAIL_REGEX};

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /admin/register` and the account part of donor sign-up.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(regex(path = *EMAIL_REGEX, message = "Please provide a valid email"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl RegisterRequest {
    /// Trim the name, normalise the email, then validate.
    pub fn normalized(mut self) -> AppResult<Self> {
        self.name = self.name.trim().to_string();
        self.email = normalize_email(&self.email);
        validate_request(&self)?;
        Ok(self)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// The normalised email and the password, or 400 when either is blank.
    pub fn credentials(&self) -> AppResult<(String, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Ok((normalize_email(email), password))
            }
            _ => Err(AppError::BadRequest(
                "Please provide email and password".into(),
            )),
        }
    }
}

/// Body of `PUT /admin/reset-password`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// An account representation plus a freshly issued bearer token.
#[derive(Debug, Serialize)]
pub struct AuthResponse<T: Serialize> {
    #[serde(flatten)]
    pub account: T,
    pub token: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid credentials".into()))
}

pub(crate) fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

/// Check a login attempt against a stored account.
///
/// Unknown emails and wrong passwords share one message; a deactivated
/// account is only reported once the password has matched.
pub(crate) fn check_login(password: &str, password_hash: &str, is_active: bool) -> AppResult<()> {
    let valid = verify_password(password, password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        return Err(invalid_credentials());
    }
    if !is_active {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Account is deactivated".into(),
        )));
    }
    Ok(())
}

pub(crate) fn issue_token(state: &AppState, id: DbId, kind: &str, role: &str) -> AppResult<String> {
    generate_token(id, kind, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))
}
