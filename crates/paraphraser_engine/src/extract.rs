use once_cell::sync::Lazy;
use regex::Regex;

// First environment-open marker to the first subsequent close marker,
// spanning line breaks. Intentionally permissive: no well-formedness,
// nesting, or balance validation.
static LATEX_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\begin\{[^}]*\}.*?\\end\{[^}]*\}").unwrap());

/// Best-effort extraction of a LaTeX fragment from a model reply.
///
/// Returns the first `\begin{...}`..`\end{...}` span verbatim, markers
/// included. When no span is present the reply is returned unchanged.
pub fn extract_latex_fragment(reply: &str) -> &str {
    match LATEX_FRAGMENT.find(reply) {
        Some(found) => found.as_str(),
        None => reply,
    }
}
