//! Project entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use welfare_core::project::percentage_raised;
use welfare_core::types::{DbId, Timestamp};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub images: Vec<String>,
    pub category: String,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub status: String,
    pub beneficiaries: i32,
    pub target_amount: f64,
    pub raised_amount: f64,
    pub donation_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Project plus its derived funding percentage, as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub percentage_raised: i64,
}

impl From<Project> for ProjectView {
    fn from(project: Project) -> Self {
        let percentage_raised = percentage_raised(project.raised_amount, project.target_amount);
        Self {
            project,
            percentage_raised,
        }
    }
}

/// Insert DTO. Omitted optional fields take the column defaults.
#[derive(Debug, Clone, Default)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub location: String,
    pub images: Vec<String>,
    pub category: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub status: Option<String>,
    pub beneficiaries: Option<i32>,
    pub target_amount: Option<f64>,
}

/// Partial update. The funding counters are owned by the donation ledger
/// and cannot be set here.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub images: Option<Vec<String>>,
    pub category: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub status: Option<String>,
    pub beneficiaries: Option<i32>,
    pub target_amount: Option<f64>,
}

/// Public list filters.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    /// Case-insensitive substring match.
    pub location: Option<String>,
}
