//! About Us singleton model.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use welfare_core::types::Timestamp;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreValues {
    pub compassion: String,
    pub excellence: String,
    pub equity: String,
    pub transparency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Achievements {
    pub patients_treated: String,
    pub medical_camps: String,
    pub partner_hospitals: String,
    pub awards: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certificate {
    pub title: String,
    pub issuer: String,
    pub year: String,
    pub image: String,
}

/// The single row of `about_us`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutUs {
    pub mission: String,
    pub vision: String,
    #[serde(rename = "values")]
    pub core_values: Json<CoreValues>,
    pub achievements: Json<Achievements>,
    pub team_members: Json<Vec<TeamMember>>,
    pub certificates: Json<Vec<Certificate>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update. Lists replace wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAboutUs {
    pub mission: Option<String>,
    pub vision: Option<String>,
    #[serde(rename = "values")]
    pub core_values: Option<CoreValues>,
    pub achievements: Option<Achievements>,
    pub team_members: Option<Vec<TeamMember>>,
    pub certificates: Option<Vec<Certificate>>,
}
