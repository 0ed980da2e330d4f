mod chat;
mod config;
mod contact;
mod document;
mod errors;
mod extract;
mod llm_client;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::backend::{ChatBackend, GeminiBackend, RuleBasedBackend};
use crate::chat::relay::QueryRelay;
use crate::config::{ChatBackendKind, Config};
use crate::contact::mailer::Mailer;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {config:?}");

    // Load the resume before anything can accept traffic
    info!(
        "Loading resume from {} (policy: {})",
        config.resume_path.display(),
        config.load_policy
    );
    let document = document::initialize(&config.resume_path, config.load_policy)
        .await
        .context("Resume could not be loaded; refusing to start (DOCUMENT_LOAD_POLICY=fail-fast)")?;

    // Initialize chat backend (Gemini by default, swap via CHAT_BACKEND)
    let backend: Arc<dyn ChatBackend> = match (config.chat_backend, &config.gemini) {
        (ChatBackendKind::Gemini, Some(gemini)) => {
            let llm = LlmClient::new(gemini, config.upstream_timeout)
                .context("Failed to build LLM HTTP client")?;
            info!("LLM client initialized (model: {})", llm.model());
            Arc::new(GeminiBackend(llm))
        }
        (ChatBackendKind::Gemini, None) => {
            anyhow::bail!("CHAT_BACKEND=gemini requires GEMINI_API_KEY")
        }
        (ChatBackendKind::Rules, _) => {
            info!("Using offline rule-based chat backend");
            Arc::new(RuleBasedBackend)
        }
    };

    // Initialize email relay (optional)
    let mailer = match &config.mail {
        Some(mail) => {
            let mailer = Mailer::new(mail, config.upstream_timeout)
                .context("Failed to build mail HTTP client")?;
            info!("Contact relay enabled");
            Some(mailer)
        }
        None => {
            warn!("RESEND_API_KEY not set; contact form will return 503");
            None
        }
    };

    // Build app state
    let state = AppState {
        relay: QueryRelay::new(document, backend),
        mailer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Restricts CORS to `CORS_ALLOWED_ORIGIN` when set; permissive otherwise.
fn cors_layer(config: &Config) -> Result<CorsLayer> {
    match &config.cors_allowed_origin {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .context("CORS_ALLOWED_ORIGIN must be a valid header value")?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any))
        }
        None => Ok(CorsLayer::permissive()),
    }
}
