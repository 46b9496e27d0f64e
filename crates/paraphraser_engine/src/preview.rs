const TRUNCATED_MARKER: &str = "\n.[truncated]";
pub const MAX_PREVIEW_CONTENT: usize = 8_192;

/// Bound the textual preview for terminal display. The exported artifact is
/// never truncated, only what is printed.
pub fn prepare_preview_content(artifact: &str) -> String {
    if artifact.len() <= MAX_PREVIEW_CONTENT {
        return artifact.to_string();
    }
    let mut end = MAX_PREVIEW_CONTENT;
    while end > 0 && !artifact.is_char_boundary(end) {
        end -= 1;
    }
    let truncated = &artifact[..end];
    format!("{truncated}{TRUNCATED_MARKER}")
}
