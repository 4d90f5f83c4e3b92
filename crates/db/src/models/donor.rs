//! Donor account model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use welfare_core::types::{DbId, Timestamp};

/// Full row from the `donors` table. Holds the password hash; see
/// [`DonorResponse`] for the serialisable form.
#[derive(Debug, Clone, FromRow)]
pub struct Donor {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address_street: Option<String>,
    pub address_city: Option<String>,
    pub address_country: Option<String>,
    pub address_postal_code: Option<String>,
    pub is_anonymous: bool,
    pub total_donated: f64,
    pub donation_count: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Postal address, stored as four flat columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: DonorAddress,
    pub is_anonymous: bool,
    pub total_donated: f64,
    pub donation_count: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Donor> for DonorResponse {
    fn from(d: Donor) -> Self {
        Self {
            id: d.id,
            name: d.name,
            email: d.email,
            phone: d.phone,
            address: DonorAddress {
                street: d.address_street,
                city: d.address_city,
                country: d.address_country,
                postal_code: d.address_postal_code,
            },
            is_anonymous: d.is_anonymous,
            total_donated: d.total_donated,
            donation_count: d.donation_count,
            is_active: d.is_active,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// Insert DTO. `password_hash` is already hashed; `email` already normalised.
#[derive(Debug, Clone, Default)]
pub struct CreateDonor {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: DonorAddress,
}

/// Profile update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonor {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<DonorAddress>,
    pub is_anonymous: Option<bool>,
}

/// Admin list filters.
#[derive(Debug, Clone, Default)]
pub struct DonorListFilter {
    /// Case-insensitive substring over name and email.
    pub search: Option<String>,
    /// One of the sortable columns; see `DonorRepo::list`.
    pub sort_by: Option<String>,
    pub descending: bool,
}
