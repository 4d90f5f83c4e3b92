//! Handlers for `/statistics`. Every figure is recomputed per request;
//! the independent queries behind each endpoint run concurrently.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use welfare_core::statistics::{
    completion_rate, days_ago, months_ago, DASHBOARD_WINDOW_MONTHS, DONATION_TREND_MONTHS,
    NEW_DONOR_DAYS, RECENT_DONATIONS_LIMIT, TOP_FUNDED_LIMIT, TOP_N_LIMIT,
};
use welfare_db::models::donation::DonationView;
use welfare_db::models::statistics::{
    DonationTotals, DonorTypeCount, LocationCount, MonthlyBucket, PaymentMethodTotal,
    ProjectCounts, ProjectFunding, ProjectGroup, TopDonor,
};
use welfare_db::repositories::StatisticsRepo;

use crate::error::AppResult;
use crate::middleware::auth::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_projects: i64,
    pub active_projects: i64,
    pub completed_projects: i64,
    /// Whole percentage with a `%` suffix, e.g. `"40%"`.
    pub completion_rate: String,
    pub total_donors: i64,
    pub total_donations: i64,
    pub total_amount: f64,
}

#[derive(Debug, Serialize)]
pub struct ChartData {
    pub projects: ProjectCounts,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub overview: Overview,
    pub recent_donations: Vec<DonationView>,
    pub monthly_donations: Vec<MonthlyBucket>,
    pub chart_data: ChartData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub status_distribution: Vec<ProjectGroup>,
    pub top_funded_projects: Vec<ProjectFunding>,
    pub funding_progress: Vec<ProjectFunding>,
    pub category_distribution: Vec<ProjectGroup>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationStats {
    pub summary: DonationTotals,
    pub payment_methods: Vec<PaymentMethodTotal>,
    pub monthly_trends: Vec<MonthlyBucket>,
    pub largest_donations: Vec<DonationView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorStats {
    pub total_donors: i64,
    pub new_donors: i64,
    pub repeat_donors: i64,
    pub top_donors: Vec<TopDonor>,
    pub location_distribution: Vec<LocationCount>,
    pub type_distribution: Vec<DonorTypeCount>,
}

/// GET /api/statistics/dashboard
pub async fn dashboard(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let pool = &state.pool;
    let since = months_ago(chrono::Utc::now(), DASHBOARD_WINDOW_MONTHS);

    let (projects, donors, donations, recent, monthly) = tokio::try_join!(
        StatisticsRepo::project_counts(pool),
        StatisticsRepo::donor_count(pool),
        StatisticsRepo::donation_amount_count(pool),
        StatisticsRepo::recent_donations(pool, RECENT_DONATIONS_LIMIT),
        StatisticsRepo::monthly_donations(pool, since),
    )?;

    let overview = Overview {
        total_projects: projects.total,
        active_projects: projects.active,
        completed_projects: projects.completed,
        completion_rate: format!("{}%", completion_rate(projects.completed, projects.total)),
        total_donors: donors,
        total_donations: donations.count,
        total_amount: donations.amount,
    };

    Ok(Json(ApiResponse::ok(DashboardStats {
        overview,
        recent_donations: recent.into_iter().map(DonationView::from).collect(),
        monthly_donations: monthly,
        chart_data: ChartData { projects },
    })))
}

/// GET /api/statistics/projects
pub async fn projects(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ProjectStats>>> {
    let pool = &state.pool;
    let (status_distribution, top_funded_projects, funding_progress, category_distribution) =
        tokio::try_join!(
            StatisticsRepo::projects_by_status(pool),
            StatisticsRepo::top_funded_projects(pool, TOP_FUNDED_LIMIT),
            StatisticsRepo::funding_progress(pool, TOP_N_LIMIT),
            StatisticsRepo::projects_by_category(pool),
        )?;

    Ok(Json(ApiResponse::ok(ProjectStats {
        status_distribution,
        top_funded_projects,
        funding_progress,
        category_distribution,
    })))
}

/// GET /api/statistics/donations
pub async fn donations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DonationStats>>> {
    let pool = &state.pool;
    let since = months_ago(chrono::Utc::now(), DONATION_TREND_MONTHS);

    let (summary, payment_methods, monthly_trends, largest) = tokio::try_join!(
        StatisticsRepo::donation_totals(pool),
        StatisticsRepo::payment_method_totals(pool),
        StatisticsRepo::monthly_donations(pool, since),
        StatisticsRepo::largest_donations(pool, TOP_N_LIMIT),
    )?;

    Ok(Json(ApiResponse::ok(DonationStats {
        summary,
        payment_methods,
        monthly_trends,
        largest_donations: largest.into_iter().map(DonationView::from).collect(),
    })))
}

/// GET /api/statistics/donors
pub async fn donors(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DonorStats>>> {
    let pool = &state.pool;
    let since = days_ago(chrono::Utc::now(), NEW_DONOR_DAYS);

    let (total_donors, new_donors, repeat_donors, top_donors, locations, types) = tokio::try_join!(
        StatisticsRepo::donor_count(pool),
        StatisticsRepo::donors_since(pool, since),
        StatisticsRepo::repeat_donor_count(pool),
        StatisticsRepo::top_donors(pool, TOP_N_LIMIT),
        StatisticsRepo::donor_locations(pool, TOP_N_LIMIT),
        StatisticsRepo::donor_types(pool),
    )?;

    Ok(Json(ApiResponse::ok(DonorStats {
        total_donors,
        new_donors,
        repeat_donors,
        top_donors,
        location_distribution: locations,
        type_distribution: types,
    })))
}
