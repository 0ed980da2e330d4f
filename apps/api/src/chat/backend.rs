//! Chat backends — pluggable, trait-based answer producers.
//!
//! `GeminiBackend` forwards the rendered prompt upstream.
//! `RuleBasedBackend` answers locally from an ordered keyword rule table.
//!
//! `AppState` holds an `Arc<dyn ChatBackend>`, chosen at startup via `CHAT_BACKEND`.

use async_trait::async_trait;

use crate::chat::prompts::Prompt;
use crate::chat::rules;
use crate::llm_client::{LlmClient, LlmError};

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short identifier reported by `/health`.
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &Prompt<'_>) -> Result<String, LlmError>;
}

pub struct GeminiBackend(pub LlmClient);

#[async_trait]
impl ChatBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, prompt: &Prompt<'_>) -> Result<String, LlmError> {
        self.0.generate(&prompt.render()).await
    }
}

/// Offline backend. Deterministic, never fails.
pub struct RuleBasedBackend;

#[async_trait]
impl ChatBackend for RuleBasedBackend {
    fn name(&self) -> &'static str {
        "rules"
    }

    async fn complete(&self, prompt: &Prompt<'_>) -> Result<String, LlmError> {
        Ok(rules::respond(prompt.question, prompt.context))
    }
}
