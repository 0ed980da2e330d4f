//! Axum route handlers for the contact form.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::contact::mailer::Mailer;
use crate::contact::validation::{validate_submission, ContactRequest};
use crate::contact::ContactError;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub status: &'static str,
    pub id: String,
}

/// Validates and delivers one submission. No retries.
pub async fn relay_contact(
    mailer: Option<&Mailer>,
    request: &ContactRequest,
) -> Result<ContactResponse, ContactError> {
    let submission = validate_submission(request)?;
    let mailer = mailer.ok_or(ContactError::Disabled)?;

    let email = mailer.compose(&submission, Utc::now());
    let id = mailer
        .send(&email)
        .await?
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Ok(ContactResponse { status: "sent", id })
}

/// POST /api/contact
pub async fn handle_contact(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    let response = relay_contact(state.mailer.as_ref(), &request).await?;
    Ok(Json(response))
}
