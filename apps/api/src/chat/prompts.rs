// Resume chat prompt templates.

use crate::llm_client::prompts::{BREVITY_INSTRUCTION, GROUNDING_INSTRUCTION};

pub const CHAT_ROLE_INSTRUCTION: &str = "\
You are the assistant on a personal portfolio website. \
Visitors ask you about the site owner's background, and you answer on the owner's behalf \
in a friendly, professional tone, referring to the owner in the third person.";

/// Placed in the resume section when no document could be loaded at startup.
pub const NO_DOCUMENT_MARKER: &str = "(No resume document is available. \
Say that the details are unavailable right now and suggest the contact form.)";

/// A single chat prompt. Sections are always rendered in the same order:
/// instructions, resume, question.
#[derive(Debug, Clone, Copy)]
pub struct Prompt<'a> {
    pub context: &'a str,
    pub question: &'a str,
}

impl<'a> Prompt<'a> {
    pub fn new(context: &'a str, question: &'a str) -> Self {
        Self { context, question }
    }

    pub fn render(&self) -> String {
        let context = if self.context.trim().is_empty() {
            NO_DOCUMENT_MARKER
        } else {
            self.context
        };

        let mut prompt = String::with_capacity(
            CHAT_ROLE_INSTRUCTION.len() + context.len() + self.question.len() + 512,
        );
        prompt.push_str("## Instructions\n\n");
        prompt.push_str(CHAT_ROLE_INSTRUCTION);
        prompt.push(' ');
        prompt.push_str(GROUNDING_INSTRUCTION);
        prompt.push(' ');
        prompt.push_str(BREVITY_INSTRUCTION);
        prompt.push_str("\n\n## Resume\n\n");
        prompt.push_str(context);
        prompt.push_str("\n\n## Question\n\n");
        prompt.push_str(self.question);
        prompt.push('\n');
        prompt
    }
}
