//! Prompt text for the paraphrase round trip.
//!
//! Centralising the fixed strings here keeps the client focused on transport
//! concerns and lets tests inspect the exact message composition without a
//! network call.

/// Fixed system instruction sent with every request.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that paraphrases documents into LaTeX format.";

/// Literal label separating the instruction prompt from the document text in
/// the user message.
pub const DOCUMENT_LABEL: &str = "Here is the document content:";

/// Build the user message: the configurable instruction prompt, a blank line,
/// the document label, a blank line, and the source text.
pub fn compose_user_message(instruction_prompt: &str, source_text: &str) -> String {
    format!("{instruction_prompt}\n\n{DOCUMENT_LABEL}\n\n{source_text}")
}
