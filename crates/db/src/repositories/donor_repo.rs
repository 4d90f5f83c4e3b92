//! Repository for the `donors` table.

use sqlx::PgPool;
use welfare_core::types::DbId;

use crate::models::donor::{CreateDonor, Donor, DonorListFilter, UpdateDonor};

const COLUMNS: &str = "id, name, email, password_hash, phone, address_street, address_city, \
    address_country, address_postal_code, is_anonymous, total_donated, donation_count, \
    is_active, created_at, updated_at";

/// Sort keys accepted by [`DonorRepo::list`], mapped to their columns.
const SORTABLE: &[(&str, &str)] = &[
    ("createdAt", "created_at"),
    ("name", "name"),
    ("email", "email"),
    ("totalDonated", "total_donated"),
    ("donationCount", "donation_count"),
];

/// Provides account operations for donors.
pub struct DonorRepo;

impl DonorRepo {
    /// Insert a new donor. Fails with a unique violation on duplicate email.
    pub async fn create(pool: &PgPool, input: &CreateDonor) -> Result<Donor, sqlx::Error> {
        let query = format!(
            "INSERT INTO donors (name, email, password_hash, phone,
                address_street, address_city, address_country, address_postal_code)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donor>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.phone)
            .bind(&input.address.street)
            .bind(&input.address.city)
            .bind(&input.address.country)
            .bind(&input.address.postal_code)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Donor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donors WHERE id = $1");
        sqlx::query_as::<_, Donor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up by (already normalised) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Donor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donors WHERE email = $1");
        sqlx::query_as::<_, Donor>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List donors with optional search and a whitelisted sort column.
    /// Unknown sort keys fall back to `createdAt`.
    pub async fn list(pool: &PgPool, filter: &DonorListFilter) -> Result<Vec<Donor>, sqlx::Error> {
        let column = filter
            .sort_by
            .as_deref()
            .and_then(|key| SORTABLE.iter().find(|(k, _)| *k == key))
            .map(|(_, col)| *col)
            .unwrap_or("created_at");
        let direction = if filter.descending { "DESC" } else { "ASC" };

        let query = format!(
            "SELECT {COLUMNS} FROM donors
             WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%')
             ORDER BY {column} {direction}, id {direction}"
        );
        sqlx::query_as::<_, Donor>(&query)
            .bind(&filter.search)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDonor,
    ) -> Result<Option<Donor>, sqlx::Error> {
        let address = input.address.clone().unwrap_or_default();
        let query = format!(
            "UPDATE donors SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                address_street = COALESCE($4, address_street),
                address_city = COALESCE($5, address_city),
                address_country = COALESCE($6, address_country),
                address_postal_code = COALESCE($7, address_postal_code),
                is_anonymous = COALESCE($8, is_anonymous)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donor>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&address.street)
            .bind(&address.city)
            .bind(&address.country)
            .bind(&address.postal_code)
            .bind(input.is_anonymous)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE donors SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
