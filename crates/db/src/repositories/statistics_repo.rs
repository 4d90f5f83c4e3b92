//! Read-only aggregation queries behind `/api/statistics`.
//!
//! Donation figures count only donations currently credited to the
//! project/donor totals and sum `converted_amount`, so mixed currencies add
//! up in PKR.

use sqlx::PgPool;
use welfare_core::types::Timestamp;

use crate::models::donation::DonationRow;
use crate::models::statistics::{
    AmountCount, DonationTotals, DonorTypeCount, LocationCount, MonthlyBucket, PaymentMethodTotal,
    ProjectCounts, ProjectFunding, ProjectGroup, TopDonor,
};

pub struct StatisticsRepo;

impl StatisticsRepo {
    pub async fn project_counts(pool: &PgPool) -> Result<ProjectCounts, sqlx::Error> {
        sqlx::query_as::<_, ProjectCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'active') AS active,
                    COUNT(*) FILTER (WHERE status = 'completed') AS completed
             FROM projects",
        )
        .fetch_one(pool)
        .await
    }

    pub async fn donation_amount_count(pool: &PgPool) -> Result<AmountCount, sqlx::Error> {
        sqlx::query_as::<_, AmountCount>(
            "SELECT COALESCE(SUM(converted_amount), 0) AS amount, COUNT(*) AS count
             FROM donations WHERE project_credited",
        )
        .fetch_one(pool)
        .await
    }

    pub async fn donation_totals(pool: &PgPool) -> Result<DonationTotals, sqlx::Error> {
        sqlx::query_as::<_, DonationTotals>(
            "SELECT COALESCE(SUM(converted_amount), 0) AS total_amount,
                    COALESCE(AVG(converted_amount), 0) AS average_amount,
                    COUNT(*) AS count,
                    COALESCE(MIN(converted_amount), 0) AS min_amount,
                    COALESCE(MAX(converted_amount), 0) AS max_amount
             FROM donations WHERE project_credited",
        )
        .fetch_one(pool)
        .await
    }

    /// Monthly buckets (UTC) from `since` onwards, oldest first.
    pub async fn monthly_donations(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<Vec<MonthlyBucket>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyBucket>(
            "SELECT to_char(date_trunc('month', created_at AT TIME ZONE 'UTC'), 'YYYY-MM') AS month,
                    SUM(converted_amount) AS total_amount,
                    COUNT(*) AS count,
                    AVG(converted_amount) AS average_amount
             FROM donations
             WHERE project_credited AND created_at >= $1
             GROUP BY 1
             ORDER BY 1",
        )
        .bind(since)
        .fetch_all(pool)
        .await
    }

    /// Latest donations of any status, newest first.
    pub async fn recent_donations(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<DonationRow>, sqlx::Error> {
        sqlx::query_as::<_, DonationRow>(
            "SELECT d.*, p.title AS project_title
             FROM donations d LEFT JOIN projects p ON p.id = d.project_id
             ORDER BY d.created_at DESC, d.id DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn largest_donations(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<DonationRow>, sqlx::Error> {
        sqlx::query_as::<_, DonationRow>(
            "SELECT d.*, p.title AS project_title
             FROM donations d LEFT JOIN projects p ON p.id = d.project_id
             WHERE d.project_credited
             ORDER BY d.converted_amount DESC, d.id DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn payment_method_totals(
        pool: &PgPool,
    ) -> Result<Vec<PaymentMethodTotal>, sqlx::Error> {
        sqlx::query_as::<_, PaymentMethodTotal>(
            "SELECT payment_method, SUM(converted_amount) AS total_amount, COUNT(*) AS count
             FROM donations WHERE project_credited
             GROUP BY payment_method
             ORDER BY total_amount DESC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn projects_by_status(pool: &PgPool) -> Result<Vec<ProjectGroup>, sqlx::Error> {
        sqlx::query_as::<_, ProjectGroup>(
            "SELECT status AS key, COUNT(*) AS count, SUM(raised_amount) AS total_funding
             FROM projects GROUP BY status ORDER BY count DESC, key",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn projects_by_category(pool: &PgPool) -> Result<Vec<ProjectGroup>, sqlx::Error> {
        sqlx::query_as::<_, ProjectGroup>(
            "SELECT category AS key, COUNT(*) AS count, SUM(raised_amount) AS total_funding
             FROM projects GROUP BY category ORDER BY count DESC, key",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn top_funded_projects(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<ProjectFunding>, sqlx::Error> {
        sqlx::query_as::<_, ProjectFunding>(
            "SELECT id, title, status, target_amount, raised_amount,
                    CASE WHEN target_amount = 0 THEN 0
                         ELSE raised_amount / target_amount * 100 END AS funding_percentage
             FROM projects
             ORDER BY raised_amount DESC, id
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Projects ordered by percentage of target raised.
    pub async fn funding_progress(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<ProjectFunding>, sqlx::Error> {
        sqlx::query_as::<_, ProjectFunding>(
            "SELECT id, title, status, target_amount, raised_amount,
                    CASE WHEN target_amount = 0 THEN 0
                         ELSE raised_amount / target_amount * 100 END AS funding_percentage
             FROM projects
             ORDER BY funding_percentage DESC, id
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn donor_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM donors")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn donors_since(pool: &PgPool, since: Timestamp) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM donors WHERE created_at >= $1")
            .bind(since)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Number of distinct donor emails with more than one credited donation.
    pub async fn repeat_donor_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM (
                SELECT donor_email FROM donations WHERE project_credited
                GROUP BY donor_email HAVING COUNT(*) > 1
             ) repeaters",
        )
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    pub async fn top_donors(pool: &PgPool, limit: i64) -> Result<Vec<TopDonor>, sqlx::Error> {
        sqlx::query_as::<_, TopDonor>(
            "SELECT donor_email AS email,
                    MAX(donor_name) AS name,
                    SUM(converted_amount) AS total_donated,
                    COUNT(*) AS donation_count,
                    AVG(converted_amount) AS average_donation
             FROM donations WHERE project_credited
             GROUP BY donor_email
             ORDER BY total_donated DESC, email
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn donor_locations(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<LocationCount>, sqlx::Error> {
        sqlx::query_as::<_, LocationCount>(
            "SELECT COALESCE(NULLIF(address_country, ''), 'Unknown') AS country, COUNT(*) AS count
             FROM donors
             GROUP BY 1
             ORDER BY count DESC, country
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn donor_types(pool: &PgPool) -> Result<Vec<DonorTypeCount>, sqlx::Error> {
        sqlx::query_as::<_, DonorTypeCount>(
            "SELECT CASE WHEN is_anonymous THEN 'anonymous' ELSE 'named' END AS donor_type,
                    COUNT(*) AS count
             FROM donors
             GROUP BY 1
             ORDER BY 1",
        )
        .fetch_all(pool)
        .await
    }
}
