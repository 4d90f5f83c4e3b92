//! Repository for the `admins` table.

use sqlx::PgPool;
use welfare_core::types::DbId;

use crate::models::admin::{Admin, CreateAdmin, UpdateAdminProfile};

const COLUMNS: &str = "id, name, email, password_hash, role, is_active, \
    last_login_at, created_at, updated_at";

/// Provides account operations for admins.
pub struct AdminRepo;

impl AdminRepo {
    /// Insert a new admin. Fails with a unique violation on duplicate email.
    pub async fn create(pool: &PgPool, input: &CreateAdmin) -> Result<Admin, sqlx::Error> {
        let query = format!(
            "INSERT INTO admins (name, email, password_hash, role)
             VALUES ($1, $2, $3, COALESCE($4, 'admin'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE id = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up by (already normalised) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE email = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Update name and/or email. Returns `None` if the admin does not exist.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdminProfile,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!(
            "UPDATE admins SET
                name = COALESCE($2, name),
                email = COALESCE($3, email)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE admins SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE admins SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE admins SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
