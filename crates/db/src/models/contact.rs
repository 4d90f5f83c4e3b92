//! Contact settings singleton and contact message models.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use welfare_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfficeAddress {
    pub label: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneEntry {
    pub label: Option<String>,
    pub number: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailEntry {
    pub label: Option<String>,
    pub address: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkingHours {
    pub weekdays: Option<String>,
    pub weekends: Option<String>,
    pub holidays: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialMedia {
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub youtube: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapSettings {
    pub embed_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// The single row of `contact_settings`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSettings {
    pub organization_name: String,
    pub addresses: Json<Vec<OfficeAddress>>,
    pub phones: Json<Vec<PhoneEntry>>,
    pub emails: Json<Vec<EmailEntry>>,
    pub working_hours: Json<WorkingHours>,
    pub social_media: Json<SocialMedia>,
    pub map_settings: Json<MapSettings>,
    pub contact_form_enabled: bool,
    pub auto_reply_enabled: bool,
    pub auto_reply_message: String,
    pub notification_email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update of the contact settings. Lists replace wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactSettings {
    pub organization_name: Option<String>,
    pub addresses: Option<Vec<OfficeAddress>>,
    pub phones: Option<Vec<PhoneEntry>>,
    pub emails: Option<Vec<EmailEntry>>,
    pub working_hours: Option<WorkingHours>,
    pub social_media: Option<SocialMedia>,
    pub map_settings: Option<MapSettings>,
    pub contact_form_enabled: Option<bool>,
    pub auto_reply_enabled: Option<bool>,
    pub auto_reply_message: Option<String>,
    pub notification_email: Option<String>,
}

/// A row from `contact_messages`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct CreateContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
