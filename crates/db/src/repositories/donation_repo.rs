//! Repository for the `donations` table.
//!
//! Every write that changes whether a donation counts toward its project's
//! and donor's totals runs in one transaction with the matching
//! `raised_amount`/`total_donated` adjustment, guarded by the
//! `project_credited` flag so each donation is counted at most once.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use welfare_core::donation::{build_reference, ledger_action, LedgerAction, STATUS_FAILED};
use welfare_core::statistics::{
    monthly_growth, start_of_day, start_of_month, start_of_previous_month,
};
use welfare_core::types::{DbId, Timestamp};

use crate::models::donation::{
    CreateDonation, CurrencyTotal, Donation, DonationFilter, DonationListSummary, DonationRow,
    GatewayUpdate, VerifyDonation,
};
use crate::models::statistics::{
    AmountCount, CountryTotal, DonationSummaryStats, StatusCount, SummaryTotal,
};

const COLUMNS: &str = "id, donor_id, project_id, donor_name, donor_email, donor_phone, \
    donor_address, donor_country, amount, currency, converted_amount, exchange_rate, \
    payment_method, payment_gateway, gateway_transaction_id, gateway_order_id, gateway_status, \
    reference, status, bank_name, bank_account_number, bank_account_title, bank_swift_code, \
    bank_iban, bank_branch, bank_reference, bank_transfer_date, bank_transfer_slip, ip_address, \
    location, user_agent, privacy_policy_accepted, privacy_policy_accepted_at, terms_accepted, \
    verified_by, verified_at, card_last4, card_brand, notes, receipt_sent, receipt_sent_at, \
    project_credited, created_at, updated_at";

/// Donation columns plus the linked project's title.
const JOINED_SELECT: &str =
    "SELECT d.*, p.title AS project_title FROM donations d LEFT JOIN projects p ON p.id = d.project_id";

/// Shared `WHERE` body for admin list queries; binds `$1..$4` from
/// [`DonationFilter`].
const FILTER_WHERE: &str = "($1::TEXT IS NULL OR d.status = $1)
    AND ($2::TEXT IS NULL OR d.currency = $2)
    AND ($3::TEXT IS NULL OR d.donor_country ILIKE '%' || $3 || '%')
    AND ($4::TEXT IS NULL
         OR d.donor_name ILIKE '%' || $4 || '%'
         OR d.donor_email ILIKE '%' || $4 || '%'
         OR d.bank_reference ILIKE '%' || $4 || '%'
         OR d.gateway_transaction_id ILIKE '%' || $4 || '%')";

/// Provides donation intake, verification and reporting queries.
pub struct DonationRepo;

impl DonationRepo {
    /// Insert a donation, assign its reference number and credit the linked
    /// project and donor account, all in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateDonation) -> Result<Donation, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO donations (donor_id, project_id, donor_name, donor_email, donor_phone,
                donor_address, donor_country, amount, currency, converted_amount, exchange_rate,
                payment_method, payment_gateway, status, bank_name, bank_account_title,
                bank_swift_code, ip_address, location, user_agent, privacy_policy_accepted,
                privacy_policy_accepted_at, terms_accepted, card_last4, card_brand, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20, $21, CASE WHEN $21 THEN NOW() END, $22, $23, $24, $25)
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Donation>(&query)
            .bind(input.donor_id)
            .bind(input.project_id)
            .bind(&input.donor_name)
            .bind(&input.donor_email)
            .bind(&input.donor_phone)
            .bind(&input.donor_address)
            .bind(&input.donor_country)
            .bind(input.amount)
            .bind(&input.currency)
            .bind(input.converted_amount)
            .bind(input.exchange_rate)
            .bind(&input.payment_method)
            .bind(&input.payment_gateway)
            .bind(&input.status)
            .bind(&input.bank_name)
            .bind(&input.bank_account_title)
            .bind(&input.bank_swift_code)
            .bind(&input.ip_address)
            .bind(Json(&input.location))
            .bind(&input.user_agent)
            .bind(input.privacy_policy_accepted)
            .bind(input.terms_accepted)
            .bind(&input.card_last4)
            .bind(&input.card_brand)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        let reference = build_reference(inserted.id, Utc::now().timestamp_millis());
        sqlx::query("UPDATE donations SET reference = $2 WHERE id = $1")
            .bind(inserted.id)
            .bind(&reference)
            .execute(&mut *tx)
            .await?;

        apply_ledger(&mut tx, &inserted, LedgerAction::Credit).await?;
        let donation = fetch_for_update(&mut tx, inserted.id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        Ok(donation)
    }

    /// Find a donation with its project title.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DonationRow>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} WHERE d.id = $1");
        sqlx::query_as::<_, DonationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Filtered page of donations, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &DonationFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DonationRow>, sqlx::Error> {
        let query = format!(
            "{JOINED_SELECT} WHERE {FILTER_WHERE}
             ORDER BY d.created_at DESC, d.id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, DonationRow>(&query)
            .bind(&filter.status)
            .bind(&filter.currency)
            .bind(&filter.country)
            .bind(&filter.search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Totals over every donation matching `filter`, ignoring pagination.
    pub async fn list_summary(
        pool: &PgPool,
        filter: &DonationFilter,
    ) -> Result<DonationListSummary, sqlx::Error> {
        let totals_query = format!(
            "SELECT COALESCE(SUM(d.converted_amount), 0) AS amount, COUNT(*) AS count
             FROM donations d WHERE {FILTER_WHERE}"
        );
        let totals = sqlx::query_as::<_, AmountCount>(&totals_query)
            .bind(&filter.status)
            .bind(&filter.currency)
            .bind(&filter.country)
            .bind(&filter.search)
            .fetch_one(pool)
            .await?;

        let currency_query = format!(
            "SELECT d.currency, SUM(d.amount) AS amount,
                    SUM(d.converted_amount) AS converted_amount, COUNT(*) AS count
             FROM donations d WHERE {FILTER_WHERE}
             GROUP BY d.currency
             ORDER BY converted_amount DESC"
        );
        let by_currency = sqlx::query_as::<_, CurrencyTotal>(&currency_query)
            .bind(&filter.status)
            .bind(&filter.currency)
            .bind(&filter.country)
            .bind(&filter.search)
            .fetch_all(pool)
            .await?;

        Ok(DonationListSummary {
            total_amount: totals.amount,
            total_count: totals.count,
            by_currency,
        })
    }

    /// Donations linked to a donor account, newest first.
    pub async fn list_for_donor(
        pool: &PgPool,
        donor_id: DbId,
    ) -> Result<Vec<DonationRow>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} WHERE d.donor_id = $1 ORDER BY d.created_at DESC, d.id DESC");
        sqlx::query_as::<_, DonationRow>(&query)
            .bind(donor_id)
            .fetch_all(pool)
            .await
    }

    /// Apply an admin verification. Moving to `completed` records the
    /// verifier and marks the receipt sent; the ledger follows the new
    /// status. Returns `None` if the donation does not exist.
    pub async fn verify(
        pool: &PgPool,
        id: DbId,
        input: &VerifyDonation,
    ) -> Result<Option<Donation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = fetch_for_update(&mut tx, id).await? else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE donations SET
                status = COALESCE($2::TEXT, status),
                bank_reference = COALESCE($3, bank_reference),
                bank_transfer_date = COALESCE($4, bank_transfer_date),
                bank_transfer_slip = COALESCE($5, bank_transfer_slip),
                gateway_transaction_id = COALESCE($6, gateway_transaction_id),
                notes = COALESCE($7, notes),
                verified_by = CASE WHEN $2::TEXT = 'completed' THEN $8 ELSE verified_by END,
                verified_at = CASE WHEN $2::TEXT = 'completed' THEN NOW() ELSE verified_at END,
                receipt_sent_at = CASE WHEN $2::TEXT = 'completed' AND NOT receipt_sent
                                       THEN NOW() ELSE receipt_sent_at END,
                receipt_sent = CASE WHEN $2::TEXT = 'completed' THEN TRUE ELSE receipt_sent END
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.status)
        .bind(&input.bank_reference)
        .bind(input.bank_transfer_date)
        .bind(&input.bank_transfer_slip)
        .bind(&input.transaction_id)
        .bind(&input.notes)
        .bind(input.verified_by)
        .execute(&mut *tx)
        .await?;

        let new_status = input.status.as_deref().unwrap_or(&current.status);
        let action = ledger_action(new_status, current.project_credited);
        apply_ledger(&mut tx, &current, action).await?;

        let updated = fetch_for_update(&mut tx, id).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Store the gateway's order id and status after a successful
    /// registration.
    pub async fn record_gateway(
        pool: &PgPool,
        id: DbId,
        update: &GatewayUpdate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE donations SET
                gateway_order_id = COALESCE($2, gateway_order_id),
                gateway_status = $3
             WHERE id = $1",
        )
        .bind(id)
        .bind(&update.order_id)
        .bind(&update.status)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a donation `failed` after the gateway rejected it, reversing any
    /// credit it received at submission.
    pub async fn mark_gateway_failed(
        pool: &PgPool,
        id: DbId,
        gateway_status: &str,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        let Some(current) = fetch_for_update(&mut tx, id).await? else {
            return Ok(());
        };

        sqlx::query("UPDATE donations SET status = $2, gateway_status = $3 WHERE id = $1")
            .bind(id)
            .bind(STATUS_FAILED)
            .bind(gateway_status)
            .execute(&mut *tx)
            .await?;

        let action = ledger_action(STATUS_FAILED, current.project_credited);
        apply_ledger(&mut tx, &current, action).await?;
        tx.commit().await
    }

    /// Delete a donation, reversing its credit first. Returns `false` if
    /// it did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let Some(current) = fetch_for_update(&mut tx, id).await? else {
            return Ok(false);
        };

        if current.project_credited {
            apply_ledger(&mut tx, &current, LedgerAction::Reverse).await?;
        }

        sqlx::query("DELETE FROM donations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }

    /// Completed-donation totals for the admin summary: overall, this
    /// month, last month, today, and breakdowns by currency, country and
    /// status.
    pub async fn summary_statistics(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<DonationSummaryStats, sqlx::Error> {
        let total = sqlx::query_as::<_, SummaryTotal>(
            "SELECT COALESCE(SUM(converted_amount), 0) AS amount, COUNT(*) AS count,
                    COALESCE(AVG(converted_amount), 0) AS average
             FROM donations WHERE status = 'completed'",
        )
        .fetch_one(pool)
        .await?;

        let window = "SELECT COALESCE(SUM(converted_amount), 0) AS amount, COUNT(*) AS count
             FROM donations
             WHERE status = 'completed'
               AND created_at >= $1
               AND ($2::TIMESTAMPTZ IS NULL OR created_at < $2)";

        let this_month_start = start_of_month(now);
        let monthly = sqlx::query_as::<_, AmountCount>(window)
            .bind(this_month_start)
            .bind(None::<Timestamp>)
            .fetch_one(pool)
            .await?;
        let last_month = sqlx::query_as::<_, AmountCount>(window)
            .bind(start_of_previous_month(now))
            .bind(Some(this_month_start))
            .fetch_one(pool)
            .await?;
        let daily = sqlx::query_as::<_, AmountCount>(window)
            .bind(start_of_day(now))
            .bind(None::<Timestamp>)
            .fetch_one(pool)
            .await?;

        let by_currency = sqlx::query_as::<_, CurrencyTotal>(
            "SELECT currency, SUM(amount) AS amount, SUM(converted_amount) AS converted_amount,
                    COUNT(*) AS count
             FROM donations WHERE status = 'completed'
             GROUP BY currency
             ORDER BY converted_amount DESC",
        )
        .fetch_all(pool)
        .await?;

        let by_country = sqlx::query_as::<_, CountryTotal>(
            "SELECT donor_country AS country, SUM(converted_amount) AS amount, COUNT(*) AS count
             FROM donations WHERE status = 'completed' AND donor_country <> ''
             GROUP BY donor_country
             ORDER BY amount DESC
             LIMIT 10",
        )
        .fetch_all(pool)
        .await?;

        let by_status = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM donations GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await?;

        Ok(DonationSummaryStats {
            total,
            monthly_growth: monthly_growth(monthly.amount, last_month.amount),
            monthly,
            last_month,
            daily,
            by_currency,
            by_country,
            by_status,
        })
    }
}

/// Lock and load a donation inside a transaction.
async fn fetch_for_update(
    conn: &mut PgConnection,
    id: DbId,
) -> Result<Option<Donation>, sqlx::Error> {
    let query = format!("SELECT {COLUMNS} FROM donations WHERE id = $1 FOR UPDATE");
    sqlx::query_as::<_, Donation>(&query)
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Add (credit) or subtract (reverse) the donation's converted amount and
/// one unit of count on its project and donor, and flip the credited flag.
async fn apply_ledger(
    conn: &mut PgConnection,
    donation: &Donation,
    action: LedgerAction,
) -> Result<(), sqlx::Error> {
    let (sign, credited) = match action {
        LedgerAction::Credit => (1, true),
        LedgerAction::Reverse => (-1, false),
        LedgerAction::None => return Ok(()),
    };
    let amount = donation.converted_amount * f64::from(sign);

    if let Some(project_id) = donation.project_id {
        sqlx::query(
            "UPDATE projects SET
                raised_amount = raised_amount + $2,
                donation_count = donation_count + $3
             WHERE id = $1",
        )
        .bind(project_id)
        .bind(amount)
        .bind(sign)
        .execute(&mut *conn)
        .await?;
    }

    if let Some(donor_id) = donation.donor_id {
        sqlx::query(
            "UPDATE donors SET
                total_donated = total_donated + $2,
                donation_count = donation_count + $3
             WHERE id = $1",
        )
        .bind(donor_id)
        .bind(amount)
        .bind(sign)
        .execute(&mut *conn)
        .await?;
    }

    sqlx::query("UPDATE donations SET project_credited = $2 WHERE id = $1")
        .bind(donation.id)
        .bind(credited)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
