//! Repository for the `contact_settings` singleton.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::contact::{ContactSettings, UpdateContactSettings};

const COLUMNS: &str = "organization_name, addresses, phones, emails, working_hours, \
    social_media, map_settings, contact_form_enabled, auto_reply_enabled, auto_reply_message, \
    notification_email, created_at, updated_at";

pub struct ContactSettingsRepo;

impl ContactSettingsRepo {
    /// Load the settings row, inserting the defaults on first access.
    pub async fn get_or_create(pool: &PgPool) -> Result<ContactSettings, sqlx::Error> {
        sqlx::query("INSERT INTO contact_settings (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(pool)
            .await?;
        let query = format!("SELECT {COLUMNS} FROM contact_settings WHERE id = 1");
        sqlx::query_as::<_, ContactSettings>(&query)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        input: &UpdateContactSettings,
    ) -> Result<ContactSettings, sqlx::Error> {
        Self::get_or_create(pool).await?;
        let query = format!(
            "UPDATE contact_settings SET
                organization_name = COALESCE($1, organization_name),
                addresses = COALESCE($2, addresses),
                phones = COALESCE($3, phones),
                emails = COALESCE($4, emails),
                working_hours = COALESCE($5, working_hours),
                social_media = COALESCE($6, social_media),
                map_settings = COALESCE($7, map_settings),
                contact_form_enabled = COALESCE($8, contact_form_enabled),
                auto_reply_enabled = COALESCE($9, auto_reply_enabled),
                auto_reply_message = COALESCE($10, auto_reply_message),
                notification_email = COALESCE($11, notification_email)
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactSettings>(&query)
            .bind(&input.organization_name)
            .bind(input.addresses.as_ref().map(Json))
            .bind(input.phones.as_ref().map(Json))
            .bind(input.emails.as_ref().map(Json))
            .bind(input.working_hours.as_ref().map(Json))
            .bind(input.social_media.as_ref().map(Json))
            .bind(input.map_settings.as_ref().map(Json))
            .bind(input.contact_form_enabled)
            .bind(input.auto_reply_enabled)
            .bind(&input.auto_reply_message)
            .bind(&input.notification_email)
            .fetch_one(pool)
            .await
    }
}
