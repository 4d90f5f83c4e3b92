//! Handlers for `/contact`: the settings singleton, public form
//! submission, and admin message management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use welfare_core::contact::{validate_status, DEFAULT_PAGE_SIZE};
use welfare_core::error::CoreError;
use welfare_core::types::DbId;
use welfare_core::validation::{normalize_email, validate_email, validate_request, EMAIL_REGEX};
use welfare_db::models::contact::{
    ContactMessage, ContactSettings, CreateContactMessage, UpdateContactSettings,
};
use welfare_db::repositories::{ContactMessageRepo, ContactSettingsRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery, ClientMeta};
use crate::middleware::auth::RequireAdmin;
use crate::query::{non_empty, PageParams};
use crate::response::{ApiResponse, Pagination};
use crate::state::AppState;

/// Upper bound on `?limit=` for the message list.
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ContactFormRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(regex(path = *EMAIL_REGEX, message = "Please provide a valid email"))]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessageListParams {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessageStatusRequest {
    pub status: Option<String>,
}

fn message_not_found() -> AppError {
    AppError::NotFound("Message not found".into())
}

/// GET /api/contact/settings
pub async fn get_settings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ContactSettings>>> {
    let settings = ContactSettingsRepo::get_or_create(&state.pool).await?;
    Ok(Json(ApiResponse::ok(settings)))
}

/// PUT /api/contact/settings
pub async fn update_settings(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<UpdateContactSettings>,
) -> AppResult<Json<ApiResponse<ContactSettings>>> {
    if let Some(email) = input.notification_email.as_deref().filter(|e| !e.is_empty()) {
        validate_email(email)?;
    }
    let settings = ContactSettingsRepo::update(&state.pool, &input).await?;
    tracing::info!(admin_id = admin.id, "Contact settings updated");
    Ok(Json(
        ApiResponse::ok(settings).with_message("Contact settings updated successfully"),
    ))
}

/// POST /api/contact/submit
pub async fn submit(
    meta: ClientMeta,
    State(state): State<AppState>,
    ApiJson(mut input): ApiJson<ContactFormRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ContactMessage>>)> {
    let settings = ContactSettingsRepo::get_or_create(&state.pool).await?;
    if !settings.contact_form_enabled {
        return Err(AppError::Core(CoreError::Forbidden(
            "Contact form is currently disabled".into(),
        )));
    }

    input.name = input.name.trim().to_string();
    input.email = normalize_email(&input.email);
    input.subject = input.subject.trim().to_string();
    input.message = input.message.trim().to_string();
    validate_request(&input)?;

    let create = CreateContactMessage {
        name: input.name,
        email: input.email,
        phone: input.phone.filter(|p| !p.trim().is_empty()),
        subject: input.subject,
        message: input.message,
        ip_address: meta.ip,
        user_agent: meta.user_agent,
    };
    let message = ContactMessageRepo::create(&state.pool, &create).await?;
    tracing::info!(message_id = message.id, "Contact message received");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(message).with_message(
            "Your message has been sent successfully. We will get back to you soon!",
        )),
    ))
}

/// GET /api/contact/messages
pub async fn list_messages(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<MessageListParams>,
) -> AppResult<Json<ApiResponse<Vec<ContactMessage>>>> {
    let (page, limit, offset) = PageParams {
        page: params.page,
        limit: params.limit,
    }
    .resolve(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let status = non_empty(&params.status);

    let messages = ContactMessageRepo::list(&state.pool, status.as_deref(), limit, offset).await?;
    let total = ContactMessageRepo::count(&state.pool, status.as_deref()).await?;

    Ok(Json(
        ApiResponse::ok(messages).with_pagination(Pagination::new(page, limit, total)),
    ))
}

/// PUT /api/contact/messages/{id}
pub async fn update_message_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<MessageStatusRequest>,
) -> AppResult<Json<ApiResponse<ContactMessage>>> {
    let status = input
        .status
        .ok_or_else(|| AppError::BadRequest("Status is required".into()))?;
    validate_status(&status)?;

    let message = ContactMessageRepo::update_status(&state.pool, id, &status)
        .await?
        .ok_or_else(message_not_found)?;
    Ok(Json(
        ApiResponse::ok(message).with_message("Message status updated"),
    ))
}

/// DELETE /api/contact/messages/{id}
pub async fn delete_message(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !ContactMessageRepo::delete(&state.pool, id).await? {
        return Err(message_not_found());
    }
    tracing::info!(message_id = id, admin_id = admin.id, "Contact message deleted");
    Ok(Json(ApiResponse::message("Message deleted successfully")))
}
