//! Aggregates behind the dashboard and statistics endpoints.

use sqlx::PgPool;
use welfare_core::statistics::months_ago;
use welfare_db::models::donation::{CreateDonation, VerifyDonation};
use welfare_db::models::project::CreateProject;
use welfare_db::repositories::{DonationRepo, ProjectRepo, StatisticsRepo};

async fn project(pool: &PgPool, title: &str, category: &str, status: &str, target: f64) -> i64 {
    ProjectRepo::create(
        pool,
        &CreateProject {
            title: title.into(),
            description: "d".into(),
            location: "Karachi".into(),
            category: Some(category.into()),
            status: Some(status.into()),
            target_amount: Some(target),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

async fn give(pool: &PgPool, project_id: i64, email: &str, amount: f64, method: &str) -> i64 {
    DonationRepo::create(
        pool,
        &CreateDonation {
            project_id: Some(project_id),
            donor_name: email.split('@').next().unwrap_or_default().into(),
            donor_email: email.into(),
            amount,
            currency: "PKR".into(),
            converted_amount: amount,
            exchange_rate: 1.0,
            payment_method: method.into(),
            payment_gateway: "manual".into(),
            status: "pending".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_database_aggregates(pool: PgPool) {
    let counts = StatisticsRepo::project_counts(&pool).await.unwrap();
    assert_eq!((counts.total, counts.active, counts.completed), (0, 0, 0));

    let totals = StatisticsRepo::donation_totals(&pool).await.unwrap();
    assert_eq!(totals.count, 0);
    assert_eq!(totals.total_amount, 0.0);

    assert!(StatisticsRepo::top_donors(&pool, 10).await.unwrap().is_empty());
    assert_eq!(StatisticsRepo::repeat_donor_count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_credited_donations_drive_aggregates(pool: PgPool) {
    let clinic = project(&pool, "Clinic", "healthcare", "active", 1000.0).await;
    let school = project(&pool, "School", "education", "completed", 0.0).await;

    give(&pool, clinic, "a@x.org", 500.0, "bank_transfer").await;
    give(&pool, clinic, "a@x.org", 250.0, "bank_transfer").await;
    give(&pool, school, "b@x.org", 100.0, "credit_card").await;
    let failed = give(&pool, school, "c@x.org", 900.0, "credit_card").await;
    DonationRepo::verify(
        &pool,
        failed,
        &VerifyDonation {
            status: Some("failed".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let counts = StatisticsRepo::project_counts(&pool).await.unwrap();
    assert_eq!((counts.total, counts.active, counts.completed), (2, 1, 1));

    let sum = StatisticsRepo::donation_amount_count(&pool).await.unwrap();
    assert_eq!((sum.amount, sum.count), (850.0, 3));

    let totals = StatisticsRepo::donation_totals(&pool).await.unwrap();
    assert_eq!(totals.min_amount, 100.0);
    assert_eq!(totals.max_amount, 500.0);

    let months = StatisticsRepo::monthly_donations(&pool, months_ago(chrono::Utc::now(), 12))
        .await
        .unwrap();
    assert_eq!(months.len(), 1);
    assert_eq!(months[0].count, 3);

    let methods = StatisticsRepo::payment_method_totals(&pool).await.unwrap();
    let bank = methods.iter().find(|m| m.payment_method == "bank_transfer").unwrap();
    assert_eq!((bank.total_amount, bank.count), (750.0, 2));

    let top = StatisticsRepo::top_donors(&pool, 10).await.unwrap();
    assert_eq!(top[0].email, "a@x.org");
    assert_eq!(top[0].average_donation, 375.0);
    assert_eq!(top.len(), 2);
    assert_eq!(StatisticsRepo::repeat_donor_count(&pool).await.unwrap(), 1);

    let funded = StatisticsRepo::top_funded_projects(&pool, 5).await.unwrap();
    assert_eq!(funded[0].id, clinic);
    assert_eq!(funded[0].funding_percentage, 75.0);
    // A zero target never divides.
    assert_eq!(funded[1].funding_percentage, 0.0);

    let by_category = StatisticsRepo::projects_by_category(&pool).await.unwrap();
    assert_eq!(by_category.len(), 2);

    // Recent donations include non-credited ones.
    let recent = StatisticsRepo::recent_donations(&pool, 5).await.unwrap();
    assert_eq!(recent.len(), 4);
}
