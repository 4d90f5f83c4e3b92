//! Admin account model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use welfare_core::types::{DbId, Timestamp};

/// Full row from the `admins` table.
///
/// Contains the password hash -- never serialize this directly.
/// Use [`AdminResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe admin representation for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<Admin> for AdminResponse {
    fn from(a: Admin) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
            role: a.role,
            is_active: a.is_active,
            last_login_at: a.last_login_at,
            created_at: a.created_at,
        }
    }
}

/// Insert DTO. `password_hash` is already hashed; `email` already normalised.
#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// Defaults to `admin` when `None`.
    pub role: Option<String>,
}

/// Profile update. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAdminProfile {
    pub name: Option<String>,
    pub email: Option<String>,
}
