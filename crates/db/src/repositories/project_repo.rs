//! Repository for the `projects` table.

use sqlx::PgPool;
use welfare_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, location, images, category, \
    start_date, end_date, status, beneficiaries, target_amount, raised_amount, \
    donation_count, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `None` fields take the column defaults (`healthcare`, `active`, now).
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description, location, images, category,
                start_date, end_date, status, beneficiaries, target_amount)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'healthcare'), COALESCE($6, NOW()), $7,
                COALESCE($8, 'active'), COALESCE($9, 0), COALESCE($10, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.images)
            .bind(&input.category)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.status)
            .bind(input.beneficiaries)
            .bind(input.target_amount)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// List projects newest first, applying any filters present.
    pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::TEXT IS NULL OR category = $2)
               AND ($3::TEXT IS NULL OR location ILIKE '%' || $3 || '%')
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&filter.status)
            .bind(&filter.category)
            .bind(&filter.location)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                images = COALESCE($5, images),
                category = COALESCE($6, category),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date),
                status = COALESCE($9, status),
                beneficiaries = COALESCE($10, beneficiaries),
                target_amount = COALESCE($11, target_amount)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.images)
            .bind(&input.category)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.status)
            .bind(input.beneficiaries)
            .bind(input.target_amount)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project. Linked donations keep their history
    /// with `project_id` cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
