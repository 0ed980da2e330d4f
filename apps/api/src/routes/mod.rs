pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::chat::handlers::handle_resume_chat;
use crate::contact::handlers::handle_contact;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/resume-chat", post(handle_resume_chat))
        .route("/api/contact", post(handle_contact))
        .fallback(not_found)
        .with_state(state)
}
