use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, and which optional pieces are active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "document_loaded": state.relay.document().is_loaded(),
        "chat_backend": state.relay.backend_name(),
        "contact_enabled": state.mailer.is_some(),
    }))
}
