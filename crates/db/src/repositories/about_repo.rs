//! Repository for the `about_us` singleton.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::about::{AboutUs, UpdateAboutUs};

const COLUMNS: &str =
    "mission, vision, core_values, achievements, team_members, certificates, created_at, updated_at";

pub struct AboutRepo;

impl AboutRepo {
    /// Load the About Us row, inserting empty content on first access.
    pub async fn get_or_create(pool: &PgPool) -> Result<AboutUs, sqlx::Error> {
        sqlx::query("INSERT INTO about_us (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(pool)
            .await?;
        let query = format!("SELECT {COLUMNS} FROM about_us WHERE id = 1");
        sqlx::query_as::<_, AboutUs>(&query).fetch_one(pool).await
    }

    pub async fn update(pool: &PgPool, input: &UpdateAboutUs) -> Result<AboutUs, sqlx::Error> {
        Self::get_or_create(pool).await?;
        let query = format!(
            "UPDATE about_us SET
                mission = COALESCE($1, mission),
                vision = COALESCE($2, vision),
                core_values = COALESCE($3, core_values),
                achievements = COALESCE($4, achievements),
                team_members = COALESCE($5, team_members),
                certificates = COALESCE($6, certificates)
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AboutUs>(&query)
            .bind(&input.mission)
            .bind(&input.vision)
            .bind(input.core_values.as_ref().map(Json))
            .bind(input.achievements.as_ref().map(Json))
            .bind(input.team_members.as_ref().map(Json))
            .bind(input.certificates.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }
}
