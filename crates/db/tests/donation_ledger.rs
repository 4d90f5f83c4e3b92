//! Donation ledger: project and donor totals follow donation state exactly
//! once per credit/reversal.

use sqlx::PgPool;
use welfare_core::currency::convert_to_pkr;
use welfare_db::models::donation::{CreateDonation, DonationFilter, VerifyDonation};
use welfare_db::models::donor::CreateDonor;
use welfare_db::models::project::CreateProject;
use welfare_db::models::admin::CreateAdmin;
use welfare_db::repositories::{AdminRepo, DonationRepo, DonorRepo, ProjectRepo};

async fn seed_project(pool: &PgPool) -> i64 {
    ProjectRepo::create(
        pool,
        &CreateProject {
            title: "Clinic Build".into(),
            description: "New clinic".into(),
            location: "Lahore".into(),
            target_amount: Some(100_000.0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

fn donation(project_id: Option<i64>, amount: f64, currency: &str) -> CreateDonation {
    let conv = convert_to_pkr(amount, currency);
    CreateDonation {
        project_id,
        donor_name: "Sara".into(),
        donor_email: "sara@x.org".into(),
        amount,
        currency: currency.into(),
        converted_amount: conv.converted_amount,
        exchange_rate: conv.exchange_rate,
        payment_method: "bank_transfer".into(),
        payment_gateway: "manual".into(),
        status: "pending".into(),
        privacy_policy_accepted: true,
        terms_accepted: true,
        ..Default::default()
    }
}

async fn project_totals(pool: &PgPool, id: i64) -> (f64, i32) {
    let p = ProjectRepo::find_by_id(pool, id).await.unwrap().unwrap();
    (p.raised_amount, p.donation_count)
}

async fn seed_admin(pool: &PgPool) -> i64 {
    AdminRepo::create(
        pool,
        &CreateAdmin {
            name: "Verifier".into(),
            email: "verifier@pmi.org".into(),
            password_hash: "$argon2id$fake".into(),
            role: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn verify(status: &str, admin_id: i64) -> VerifyDonation {
    VerifyDonation {
        status: Some(status.into()),
        verified_by: admin_id,
        ..Default::default()
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_credits_project_and_sets_reference(pool: PgPool) {
    let project_id = seed_project(&pool).await;

    let d = DonationRepo::create(&pool, &donation(Some(project_id), 5000.0, "PKR"))
        .await
        .unwrap();

    assert!(d.project_credited);
    assert_eq!(d.converted_amount, 5000.0);
    let reference = d.reference.expect("reference assigned");
    assert!(reference.starts_with(&format!("PMI-{:08}-", d.id)));
    assert_eq!(project_totals(&pool, project_id).await, (5000.0, 1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_currency_credits_converted_amount(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    DonationRepo::create(&pool, &donation(Some(project_id), 10.0, "USD"))
        .await
        .unwrap();
    assert_eq!(project_totals(&pool, project_id).await, (2800.0, 1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_complete_then_delete_is_net_zero(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let project_id = seed_project(&pool).await;
    let before = project_totals(&pool, project_id).await;

    let d = DonationRepo::create(&pool, &donation(Some(project_id), 750.0, "PKR"))
        .await
        .unwrap();

    let completed = DonationRepo::verify(&pool, d.id, &verify("completed", admin))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, "completed");
    assert!(completed.receipt_sent);
    assert!(completed.verified_at.is_some());
    // Completion of an already-credited donation does not double count.
    assert_eq!(project_totals(&pool, project_id).await, (750.0, 1));

    assert!(DonationRepo::delete(&pool, d.id).await.unwrap());
    assert_eq!(project_totals(&pool, project_id).await, before);
    assert!(DonationRepo::find_by_id(&pool, d.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failure_reverses_and_completion_recredits_once(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let project_id = seed_project(&pool).await;
    let d = DonationRepo::create(&pool, &donation(Some(project_id), 100.0, "PKR"))
        .await
        .unwrap();

    DonationRepo::verify(&pool, d.id, &verify("failed", admin)).await.unwrap();
    assert_eq!(project_totals(&pool, project_id).await, (0.0, 0));

    // A second reversing status does nothing further.
    DonationRepo::verify(&pool, d.id, &verify("cancelled", admin)).await.unwrap();
    assert_eq!(project_totals(&pool, project_id).await, (0.0, 0));

    DonationRepo::verify(&pool, d.id, &verify("completed", admin)).await.unwrap();
    DonationRepo::verify(&pool, d.id, &verify("completed", admin)).await.unwrap();
    assert_eq!(project_totals(&pool, project_id).await, (100.0, 1));

    // Deleting a non-credited donation leaves totals alone.
    DonationRepo::verify(&pool, d.id, &verify("refunded", admin)).await.unwrap();
    DonationRepo::delete(&pool, d.id).await.unwrap();
    assert_eq!(project_totals(&pool, project_id).await, (0.0, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gateway_failure_reverses_credit(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let d = DonationRepo::create(&pool, &donation(Some(project_id), 300.0, "PKR"))
        .await
        .unwrap();

    DonationRepo::mark_gateway_failed(&pool, d.id, "registration_failed")
        .await
        .unwrap();

    let row = DonationRepo::find_by_id(&pool, d.id).await.unwrap().unwrap();
    assert_eq!(row.donation.status, "failed");
    assert!(!row.donation.project_credited);
    assert_eq!(project_totals(&pool, project_id).await, (0.0, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_linked_donor_totals_follow_ledger(pool: PgPool) {
    let donor = DonorRepo::create(
        &pool,
        &CreateDonor {
            name: "Sara".into(),
            email: "sara@x.org".into(),
            password_hash: "$argon2id$fake".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let d = DonationRepo::create(
        &pool,
        &CreateDonation {
            donor_id: Some(donor.id),
            ..donation(None, 20.0, "GBP")
        },
    )
    .await
    .unwrap();

    let after = DonorRepo::find_by_id(&pool, donor.id).await.unwrap().unwrap();
    assert_eq!(after.total_donated, 7000.0);
    assert_eq!(after.donation_count, 1);

    DonationRepo::delete(&pool, d.id).await.unwrap();
    let reverted = DonorRepo::find_by_id(&pool, donor.id).await.unwrap().unwrap();
    assert_eq!(reverted.total_donated, 0.0);
    assert_eq!(reverted.donation_count, 0);

    let history = DonationRepo::list_for_donor(&pool, donor.id).await.unwrap();
    assert!(history.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_summary(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    DonationRepo::create(&pool, &donation(Some(project_id), 100.0, "PKR")).await.unwrap();
    DonationRepo::create(&pool, &donation(None, 2.0, "USD")).await.unwrap();
    DonationRepo::create(
        &pool,
        &CreateDonation {
            donor_name: "Omar".into(),
            donor_email: "omar@y.org".into(),
            donor_country: "Pakistan".into(),
            ..donation(None, 1.0, "EUR")
        },
    )
    .await
    .unwrap();

    let all = DonationFilter::default();
    let rows = DonationRepo::list(&pool, &all, 50, 0).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows.iter().filter(|r| r.project_title.is_some()).count(), 1);

    let summary = DonationRepo::list_summary(&pool, &all).await.unwrap();
    assert_eq!(summary.total_count, 3);
    assert_eq!(summary.total_amount, 100.0 + 560.0 + 300.0);
    assert_eq!(summary.by_currency.len(), 3);

    let usd = DonationFilter {
        currency: Some("USD".into()),
        ..Default::default()
    };
    assert_eq!(DonationRepo::list(&pool, &usd, 50, 0).await.unwrap().len(), 1);

    let omar = DonationFilter {
        search: Some("OMAR".into()),
        ..Default::default()
    };
    assert_eq!(DonationRepo::list(&pool, &omar, 50, 0).await.unwrap().len(), 1);

    let pk = DonationFilter {
        country: Some("pak".into()),
        ..Default::default()
    };
    assert_eq!(DonationRepo::list(&pool, &pk, 50, 0).await.unwrap().len(), 1);

    let page = DonationRepo::list(&pool, &all, 2, 2).await.unwrap();
    assert_eq!(page.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_summary_statistics_counts_completed_only(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let a = DonationRepo::create(&pool, &donation(None, 100.0, "PKR")).await.unwrap();
    let b = DonationRepo::create(&pool, &donation(None, 1.0, "USD")).await.unwrap();
    DonationRepo::create(&pool, &donation(None, 50.0, "PKR")).await.unwrap();

    DonationRepo::verify(&pool, a.id, &verify("completed", admin)).await.unwrap();
    DonationRepo::verify(&pool, b.id, &verify("completed", admin)).await.unwrap();

    let stats = DonationRepo::summary_statistics(&pool, chrono::Utc::now())
        .await
        .unwrap();

    assert_eq!(stats.total.count, 2);
    assert_eq!(stats.total.amount, 380.0);
    assert_eq!(stats.monthly.count, 2);
    assert_eq!(stats.daily.count, 2);
    assert_eq!(stats.last_month.count, 0);
    assert_eq!(stats.monthly_growth, 0.0);
    assert_eq!(stats.by_currency.len(), 2);
    let pending = stats.by_status.iter().find(|s| s.status == "pending").unwrap();
    assert_eq!(pending.count, 1);
}
