//! Repository for the `donation_settings` singleton.

use sqlx::types::Json;
use sqlx::PgPool;
use welfare_core::types::DbId;

use crate::models::donation_settings::{DonationSettings, UpdateDonationSettings};

const COLUMNS: &str = "bank_details_image, bank_details_image2, bank_name, account_number, \
    account_title, iban, swift_code, branch_code, branch_address, international_bank_name, \
    international_account_number, international_swift_code, international_routing_number, \
    payment_instructions, privacy_policy_text, accepted_currencies, default_currency, \
    exchange_rates, enabled_payment_methods, receipt_email_subject, receipt_email_body, \
    contact_email, contact_phone, notify_on_donation, notification_emails, updated_by, \
    created_at, updated_at";

pub struct DonationSettingsRepo;

impl DonationSettingsRepo {
    /// Load the settings row, inserting the defaults on first access.
    ///
    /// Concurrent first reads are safe: the row has a fixed primary key and
    /// the insert is `ON CONFLICT DO NOTHING`.
    pub async fn get_or_create(pool: &PgPool) -> Result<DonationSettings, sqlx::Error> {
        sqlx::query("INSERT INTO donation_settings (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(pool)
            .await?;
        let query = format!("SELECT {COLUMNS} FROM donation_settings WHERE id = 1");
        sqlx::query_as::<_, DonationSettings>(&query)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update and record who made it.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateDonationSettings,
        updated_by: DbId,
    ) -> Result<DonationSettings, sqlx::Error> {
        Self::get_or_create(pool).await?;
        let query = format!(
            "UPDATE donation_settings SET
                bank_details_image = COALESCE($1, bank_details_image),
                bank_details_image2 = COALESCE($2, bank_details_image2),
                bank_name = COALESCE($3, bank_name),
                account_number = COALESCE($4, account_number),
                account_title = COALESCE($5, account_title),
                iban = COALESCE($6, iban),
                swift_code = COALESCE($7, swift_code),
                branch_code = COALESCE($8, branch_code),
                branch_address = COALESCE($9, branch_address),
                international_bank_name = COALESCE($10, international_bank_name),
                international_account_number = COALESCE($11, international_account_number),
                international_swift_code = COALESCE($12, international_swift_code),
                international_routing_number = COALESCE($13, international_routing_number),
                payment_instructions = COALESCE($14, payment_instructions),
                privacy_policy_text = COALESCE($15, privacy_policy_text),
                accepted_currencies = COALESCE($16, accepted_currencies),
                default_currency = COALESCE($17, default_currency),
                exchange_rates = COALESCE($18, exchange_rates),
                enabled_payment_methods = COALESCE($19, enabled_payment_methods),
                receipt_email_subject = COALESCE($20, receipt_email_subject),
                receipt_email_body = COALESCE($21, receipt_email_body),
                contact_email = COALESCE($22, contact_email),
                contact_phone = COALESCE($23, contact_phone),
                notify_on_donation = COALESCE($24, notify_on_donation),
                notification_emails = COALESCE($25, notification_emails),
                updated_by = $26
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DonationSettings>(&query)
            .bind(&input.bank_details_image)
            .bind(&input.bank_details_image2)
            .bind(&input.bank_name)
            .bind(&input.account_number)
            .bind(&input.account_title)
            .bind(&input.iban)
            .bind(&input.swift_code)
            .bind(&input.branch_code)
            .bind(&input.branch_address)
            .bind(&input.international_bank_name)
            .bind(&input.international_account_number)
            .bind(&input.international_swift_code)
            .bind(&input.international_routing_number)
            .bind(&input.payment_instructions)
            .bind(&input.privacy_policy_text)
            .bind(&input.accepted_currencies)
            .bind(&input.default_currency)
            .bind(input.exchange_rates.as_ref().map(Json))
            .bind(&input.enabled_payment_methods)
            .bind(&input.receipt_email_subject)
            .bind(&input.receipt_email_body)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(input.notify_on_donation)
            .bind(&input.notification_emails)
            .bind(updated_by)
            .fetch_one(pool)
            .await
    }
}
