//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use welfare_core::error::CoreError;
use welfare_core::project::{validate_category, validate_status, validate_target_amount, validate_title};
use welfare_core::types::{parse_timestamp, DbId, Timestamp};
use welfare_core::validation::require_non_empty;
use welfare_db::models::project::{CreateProject, ProjectFilter, ProjectView, UpdateProject};
use welfare_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::auth::RequireAdmin;
use crate::query::non_empty;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProjectListParams {
    pub status: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
}

/// Body of `POST /projects`. `image` is shorthand for a one-element
/// `images` list and `date` an alias of `startDate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: Option<String>,
    #[serde(alias = "date")]
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub beneficiaries: Option<i32>,
    pub target_amount: Option<f64>,
}

/// Body of `PUT /projects/{id}`. Funding counters are not accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub category: Option<String>,
    #[serde(alias = "date")]
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub beneficiaries: Option<i32>,
    pub target_amount: Option<f64>,
}

fn not_found() -> AppError {
    AppError::NotFound("Project not found".into())
}

fn parse_date(value: Option<&str>, field: &str) -> AppResult<Option<Timestamp>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_timestamp(raw).map(Some).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!("Invalid {field} '{raw}'")))
        }),
    }
}

fn validate_optional(
    category: Option<&str>,
    status: Option<&str>,
    target_amount: Option<f64>,
    beneficiaries: Option<i32>,
) -> Result<(), CoreError> {
    if let Some(category) = category {
        validate_category(category)?;
    }
    if let Some(status) = status {
        validate_status(status)?;
    }
    if let Some(target) = target_amount {
        validate_target_amount(target)?;
    }
    if beneficiaries.is_some_and(|b| b < 0) {
        return Err(CoreError::Validation(
            "Beneficiaries cannot be negative".into(),
        ));
    }
    Ok(())
}

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProjectListParams>,
) -> AppResult<Json<ApiResponse<Vec<ProjectView>>>> {
    let filter = ProjectFilter {
        status: non_empty(&params.status),
        category: non_empty(&params.category),
        location: non_empty(&params.location),
    };
    let projects: Vec<ProjectView> = ProjectRepo::list(&state.pool, &filter)
        .await?
        .into_iter()
        .map(ProjectView::from)
        .collect();
    let count = projects.len();
    Ok(Json(ApiResponse::ok(projects).with_count(count)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ApiResponse<ProjectView>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(ApiResponse::ok(project.into())))
}

/// POST /api/projects
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProjectView>>)> {
    let title = input.title.unwrap_or_default();
    validate_title(&title)?;
    require_non_empty(input.description.as_deref(), "Project description")?;
    require_non_empty(input.location.as_deref(), "Project location")?;
    validate_optional(
        input.category.as_deref(),
        input.status.as_deref(),
        input.target_amount,
        input.beneficiaries,
    )?;

    let images: Vec<String> = input
        .image
        .into_iter()
        .chain(input.images)
        .filter(|url| !url.trim().is_empty())
        .collect();

    let create = CreateProject {
        title: title.trim().to_string(),
        description: input.description.unwrap_or_default(),
        location: input.location.unwrap_or_default().trim().to_string(),
        images,
        category: input.category,
        start_date: parse_date(input.start_date.as_deref(), "start date")?,
        end_date: parse_date(input.end_date.as_deref(), "end date")?,
        status: input.status,
        beneficiaries: input.beneficiaries,
        target_amount: input.target_amount,
    };

    let project = ProjectRepo::create(&state.pool, &create).await?;
    tracing::info!(project_id = project.id, admin_id = admin.id, "Project created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(project.into()).with_message("Project created successfully")),
    ))
}

/// PUT /api/projects/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateProjectRequest>,
) -> AppResult<Json<ApiResponse<ProjectView>>> {
    if let Some(title) = input.title.as_deref() {
        validate_title(title)?;
    }
    if input.description.is_some() {
        require_non_empty(input.description.as_deref(), "Project description")?;
    }
    if input.location.is_some() {
        require_non_empty(input.location.as_deref(), "Project location")?;
    }
    validate_optional(
        input.category.as_deref(),
        input.status.as_deref(),
        input.target_amount,
        input.beneficiaries,
    )?;

    let images = match (input.images, input.image) {
        (Some(images), _) => Some(images),
        (None, Some(image)) => Some(vec![image]),
        (None, None) => None,
    };

    let update = UpdateProject {
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description,
        location: input.location.map(|l| l.trim().to_string()),
        images,
        category: input.category,
        start_date: parse_date(input.start_date.as_deref(), "start date")?,
        end_date: parse_date(input.end_date.as_deref(), "end date")?,
        status: input.status,
        beneficiaries: input.beneficiaries,
        target_amount: input.target_amount,
    };

    let project = ProjectRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(project_id = id, admin_id = admin.id, "Project updated");

    Ok(Json(
        ApiResponse::ok(project.into()).with_message("Project updated successfully"),
    ))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ApiResponse<Value>>> {
    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(not_found());
    }
    tracing::info!(project_id = id, admin_id = admin.id, "Project deleted");
    Ok(Json(
        ApiResponse::ok(json!({})).with_message("Project deleted successfully"),
    ))
}
