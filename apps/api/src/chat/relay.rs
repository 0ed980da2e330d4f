//! Query relay — validate, assemble the prompt, ask the backend once.
//!
//! Per request the relay goes `Pending → Answered | Failed` and keeps nothing
//! afterwards. The only shared data is the read-only resume text.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::chat::backend::ChatBackend;
use crate::chat::prompts::Prompt;
use crate::document::DocumentCache;
use crate::errors::AppError;
use crate::llm_client::LlmError;

pub const MAX_QUESTION_CHARS: usize = 2000;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error("upstream generation failed: {0}")]
    Upstream(#[from] LlmError),
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Validation(msg) => AppError::Validation(msg),
            ChatError::Upstream(e) => AppError::Upstream(e.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct QueryRelay {
    document: DocumentCache,
    backend: Arc<dyn ChatBackend>,
}

impl QueryRelay {
    pub fn new(document: DocumentCache, backend: Arc<dyn ChatBackend>) -> Self {
        Self { document, backend }
    }

    pub fn document(&self) -> &DocumentCache {
        &self.document
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Answers `question` using the resume as context.
    pub async fn answer(&self, question: &str) -> Result<String, ChatError> {
        let question = validate_question(question)?;
        let prompt = Prompt::new(self.document.text(), question);

        debug!(
            "Relaying question ({} chars) to '{}' backend",
            question.chars().count(),
            self.backend.name()
        );

        let answer = self.backend.complete(&prompt).await?;
        if answer.trim().is_empty() {
            return Err(ChatError::Upstream(LlmError::EmptyContent));
        }
        Ok(answer)
    }
}

fn validate_question(question: &str) -> Result<&str, ChatError> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err(ChatError::Validation("question is required".to_string()));
    }
    if trimmed.chars().count() > MAX_QUESTION_CHARS {
        return Err(ChatError::Validation(format!(
            "question must be at most {MAX_QUESTION_CHARS} characters"
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::chat::backend::{GeminiBackend, RuleBasedBackend};
    use crate::config::GeminiConfig;
    use crate::llm_client::LlmClient;

    /// Records every rendered prompt and echoes the question back.
    #[derive(Default)]
    pub(crate) struct RecordingBackend {
        pub prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatBackend for RecordingBackend {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn complete(&self, prompt: &Prompt<'_>) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.render());
            // Yield so concurrent calls interleave.
            tokio::task::yield_now().await;
            Ok(format!("answer to: {}", prompt.question))
        }
    }

    pub(crate) struct FailingBackend;

    #[async_trait]
    impl ChatBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn complete(&self, _prompt: &Prompt<'_>) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 403,
                message: "API key not valid: AIzaSy-secret".to_string(),
            })
        }
    }

    struct BlankBackend;

    #[async_trait]
    impl ChatBackend for BlankBackend {
        fn name(&self) -> &'static str {
            "blank"
        }

        async fn complete(&self, _prompt: &Prompt<'_>) -> Result<String, LlmError> {
            Ok("   ".to_string())
        }
    }

    fn resume() -> DocumentCache {
        DocumentCache::new("Jane Doe\nCompleted 4 internships", 1)
    }

    #[tokio::test]
    async fn test_empty_question_is_validation_error() {
        let relay = QueryRelay::new(resume(), Arc::new(RecordingBackend::default()));
        assert!(matches!(relay.answer("").await, Err(ChatError::Validation(_))));
        assert!(matches!(relay.answer("   ").await, Err(ChatError::Validation(_))));
    }

    #[tokio::test]
    async fn test_validation_message() {
        let relay = QueryRelay::new(resume(), Arc::new(RecordingBackend::default()));
        let err = relay.answer("\n\t").await.unwrap_err();
        assert_eq!(err.to_string(), "question is required");
    }

    #[tokio::test]
    async fn test_overlong_question_rejected() {
        let relay = QueryRelay::new(resume(), Arc::new(RecordingBackend::default()));
        let question = "a".repeat(MAX_QUESTION_CHARS + 1);
        assert!(matches!(relay.answer(&question).await, Err(ChatError::Validation(_))));
    }

    #[tokio::test]
    async fn test_prompt_carries_document_and_question() {
        let backend = Arc::new(RecordingBackend::default());
        let relay = QueryRelay::new(resume(), backend.clone());

        relay.answer("  How many internships?  ").await.unwrap();

        let prompts = backend.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Jane Doe\nCompleted 4 internships"));
        assert!(prompts[0].contains("How many internships?"));
    }

    #[tokio::test]
    async fn test_answer_returned_verbatim() {
        let relay = QueryRelay::new(resume(), Arc::new(RecordingBackend::default()));
        let answer = relay.answer("Where?").await.unwrap();
        assert_eq!(answer, "answer to: Where?");
    }

    #[tokio::test]
    async fn test_backend_failure_is_upstream_error() {
        let relay = QueryRelay::new(resume(), Arc::new(FailingBackend));
        assert!(matches!(relay.answer("Where?").await, Err(ChatError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_blank_answer_is_upstream_error() {
        let relay = QueryRelay::new(resume(), Arc::new(BlankBackend));
        assert!(matches!(
            relay.answer("Where?").await,
            Err(ChatError::Upstream(LlmError::EmptyContent))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_gemini_is_upstream_error() {
        let config = GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-test".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
        };
        let client = LlmClient::new(&config, Duration::from_secs(2)).unwrap();
        let relay = QueryRelay::new(resume(), Arc::new(GeminiBackend(client)));
        let err = relay.answer("How many internships?").await.unwrap_err();
        assert!(matches!(err, ChatError::Upstream(LlmError::Http(_))));
    }

    #[tokio::test]
    async fn test_concurrent_answers_do_not_cross() {
        let relay = QueryRelay::new(resume(), Arc::new(RecordingBackend::default()));

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let relay = relay.clone();
                tokio::spawn(async move {
                    let question = format!("question number {i}");
                    let answer = relay.answer(&question).await.unwrap();
                    (question, answer)
                })
            })
            .collect();

        for handle in handles {
            let (question, answer) = handle.await.unwrap();
            assert_eq!(answer, format!("answer to: {question}"));
        }
    }

    #[tokio::test]
    async fn test_rules_backend_answers_from_document() {
        let relay = QueryRelay::new(resume(), Arc::new(RuleBasedBackend));
        let answer = relay.answer("Tell me about your internships").await.unwrap();
        assert!(answer.contains("Completed 4 internships"));
    }

    #[tokio::test]
    async fn test_degraded_document_still_answers() {
        let backend = Arc::new(RecordingBackend::default());
        let relay = QueryRelay::new(DocumentCache::empty(), backend.clone());
        relay.answer("Where did she study?").await.unwrap();
        let prompts = backend.prompts.lock().unwrap();
        assert!(prompts[0].contains(crate::chat::prompts::NO_DOCUMENT_MARKER));
    }
}
