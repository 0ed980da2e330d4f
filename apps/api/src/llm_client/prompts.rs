// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file holds the pieces they all reuse.

/// Keeps answers tied to the supplied document.
pub const GROUNDING_INSTRUCTION: &str = "\
    Answer ONLY from the resume text provided. \
    If the resume does not contain the answer, say that the information is not listed \
    and suggest using the contact form. \
    Do NOT invent employers, dates, numbers, or skills.";

/// Keeps replies short enough for a chat bubble.
pub const BREVITY_INSTRUCTION: &str = "\
    Reply in plain text, at most a few short sentences. \
    Do not use markdown headings or code fences.";
