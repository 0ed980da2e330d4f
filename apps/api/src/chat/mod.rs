// Resume chat: question validation, prompt assembly, and the pluggable
// backends that turn a prompt into an answer.
// Network generation goes through llm_client; no direct API calls here.

pub mod backend;
pub mod handlers;
pub mod prompts;
pub mod relay;
pub mod rules;
