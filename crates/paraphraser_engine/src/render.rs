use once_cell::sync::Lazy;
use regex::Regex;

/// Visual preview failures. Never fatal for the pipeline: the caller logs
/// the error and keeps the textual preview.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("environment '{name}' is never closed")]
    UnclosedEnvironment { name: String },
    #[error("\\end{{{name}}} has no matching \\begin")]
    UnmatchedEnd { name: String },
    #[error("\\end{{{found}}} closes environment '{expected}'")]
    MismatchedEnd { expected: String, found: String },
}

static ENV_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(begin|end)\{([A-Za-z@*]+)\}").unwrap());
static VERBATIM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\begin\{verbatim\}(.*?)\\end\{verbatim\}").unwrap());
static TITLE_ARG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\title\{([^}]*)\}").unwrap());
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n").unwrap());
static SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\\(section|subsection|subsubsection)\*?\{([^}]*)\}\s*").unwrap()
});
static DISPLAY_MATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\$\$(.+?)\$\$").unwrap());
static INLINE_MATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([^$\n]+)\$").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\textbf\{([^{}]*)\}").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(?:textit|emph)\{([^{}]*)\}").unwrap());
static MONO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\texttt\{([^{}]*)\}").unwrap());
static RESIDUAL_COMMAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[A-Za-z]+\*?").unwrap());
static VERBATIM_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new("^\u{1}([0-9]+)\u{1}$").unwrap());

/// Render a LaTeX fragment into a standalone HTML document, best effort.
///
/// A small subset is interpreted (sectioning, emphasis, lists, verbatim,
/// math passthrough, paragraphing); everything unrecognized is dropped
/// rather than rejected. Only structurally broken environment markers are
/// reported as errors.
pub fn render_html(latex: &str) -> Result<String, RenderError> {
    let source = strip_comments(latex);
    let (preamble, body) = split_document(&source);
    let title = TITLE_ARG
        .captures(&preamble)
        .map(|caps| caps[1].to_string());
    let rendered = render_body(&body, title.as_deref())?;
    Ok(wrap_document(&rendered))
}

/// Drop `%` comments to end of line; `\%` is a literal percent, not a
/// comment start.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for line in source.lines() {
        let mut kept = line;
        let mut search_from = 0;
        while let Some(at) = kept[search_from..].find('%') {
            let absolute = search_from + at;
            if absolute > 0 && kept.as_bytes()[absolute - 1] == b'\\' {
                search_from = absolute + 1;
                continue;
            }
            kept = &kept[..absolute];
            break;
        }
        out.push_str(kept);
        out.push('\n');
    }
    out
}

/// Split off the preamble when the fragment is a full document; otherwise
/// the whole input is the body.
fn split_document(source: &str) -> (String, String) {
    const OPEN: &str = "\\begin{document}";
    const CLOSE: &str = "\\end{document}";
    if let Some(open_at) = source.find(OPEN) {
        let after = &source[open_at + OPEN.len()..];
        if let Some(close_at) = after.rfind(CLOSE) {
            return (
                source[..open_at].to_string(),
                after[..close_at].to_string(),
            );
        }
    }
    (String::new(), source.to_string())
}

enum Segment<'a> {
    Text(&'a str),
    Begin(&'a str),
    End(&'a str),
}

fn segments(body: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;
    for caps in ENV_MARKER.captures_iter(body) {
        let whole = caps.get(0).expect("whole match");
        if whole.start() > last {
            out.push(Segment::Text(&body[last..whole.start()]));
        }
        let name = caps.get(2).expect("env name").as_str();
        if &caps[1] == "begin" {
            out.push(Segment::Begin(name));
        } else {
            out.push(Segment::End(name));
        }
        last = whole.end();
    }
    if last < body.len() {
        out.push(Segment::Text(&body[last..]));
    }
    out
}

struct EnvFrame {
    name: String,
    item_open: bool,
}

fn render_body(body: &str, title: Option<&str>) -> Result<String, RenderError> {
    // Verbatim content must not reach the markup passes; lift it out first
    // and restore it at the end. An unterminated \begin{verbatim} survives
    // this pass and is reported below.
    let mut verbatims: Vec<String> = Vec::new();
    let body = VERBATIM
        .replace_all(body, |caps: &regex::Captures| {
            let idx = verbatims.len();
            verbatims.push(caps[1].to_string());
            format!("\n\n\u{1}{idx}\u{1}\n\n")
        })
        .into_owned();

    let mut out = String::new();
    let mut envs: Vec<EnvFrame> = Vec::new();
    for segment in segments(&body) {
        match segment {
            Segment::Begin("verbatim") => {
                return Err(RenderError::UnclosedEnvironment {
                    name: "verbatim".to_string(),
                });
            }
            Segment::Begin(name) => {
                match name {
                    "itemize" => out.push_str("<ul>\n"),
                    "enumerate" => out.push_str("<ol>\n"),
                    _ => out.push_str(&format!("<div class=\"env env-{name}\">\n")),
                }
                envs.push(EnvFrame {
                    name: name.to_string(),
                    item_open: false,
                });
            }
            Segment::End(name) => {
                let frame = envs.pop().ok_or_else(|| RenderError::UnmatchedEnd {
                    name: name.to_string(),
                })?;
                if frame.name != name {
                    return Err(RenderError::MismatchedEnd {
                        expected: frame.name,
                        found: name.to_string(),
                    });
                }
                if frame.item_open {
                    out.push_str("</li>\n");
                }
                match name {
                    "itemize" => out.push_str("</ul>\n"),
                    "enumerate" => out.push_str("</ol>\n"),
                    _ => out.push_str("</div>\n"),
                }
            }
            Segment::Text(text) => {
                if let Some(frame) = envs.last_mut() {
                    if frame.name == "itemize" || frame.name == "enumerate" {
                        render_items(&mut out, frame, text);
                        continue;
                    }
                }
                render_blocks(&mut out, text, title);
            }
        }
    }
    if let Some(frame) = envs.pop() {
        return Err(RenderError::UnclosedEnvironment { name: frame.name });
    }

    let mut html = out;
    for (idx, content) in verbatims.iter().enumerate() {
        let placeholder = format!("\u{1}{idx}\u{1}");
        let pre = format!("<pre>{}</pre>", escape_html(content.trim_matches('\n')));
        html = html.replace(&placeholder, &pre);
    }
    Ok(html)
}

fn render_items(out: &mut String, frame: &mut EnvFrame, text: &str) {
    let mut pieces = text.split("\\item");
    if let Some(lead) = pieces.next() {
        let lead = lead.trim();
        if !lead.is_empty() {
            out.push_str(&inline_html(lead));
            out.push('\n');
        }
    }
    for piece in pieces {
        if frame.item_open {
            out.push_str("</li>\n");
        }
        out.push_str("<li>");
        out.push_str(&inline_html(piece.trim()));
        frame.item_open = true;
    }
}

fn render_blocks(out: &mut String, text: &str, title: Option<&str>) {
    for paragraph in PARAGRAPH_BREAK.split(text) {
        let mut rest = paragraph.trim();
        if rest.is_empty() {
            continue;
        }
        if VERBATIM_PLACEHOLDER.is_match(rest) {
            // Restored to a <pre> block at the end of render_body.
            out.push_str(rest);
            out.push('\n');
            continue;
        }
        while let Some(caps) = SECTION.captures(rest) {
            let level = match &caps[1] {
                "section" => "h2",
                "subsection" => "h3",
                _ => "h4",
            };
            out.push_str(&format!("<{level}>{}</{level}>\n", inline_html(&caps[2])));
            rest = &rest[caps.get(0).expect("section match").end()..];
        }
        let owned: String;
        if rest.contains("\\maketitle") {
            if let Some(title) = title {
                out.push_str(&format!("<h1>{}</h1>\n", inline_html(title)));
            }
            owned = rest.replace("\\maketitle", "");
            rest = owned.trim();
        }
        if !rest.is_empty() {
            out.push_str("<p>");
            out.push_str(&inline_html(rest));
            out.push_str("</p>\n");
        }
    }
}

/// Inline pass: HTML-escape, lift math spans out, interpret emphasis, drop
/// what remains unrecognized.
fn inline_html(text: &str) -> String {
    let mut s = escape_html(text);

    // Literal \$ must not open a math span.
    s = s.replace("\\$", "\u{3}");

    let mut math_spans: Vec<String> = Vec::new();
    s = DISPLAY_MATH
        .replace_all(&s, |caps: &regex::Captures| {
            let idx = math_spans.len();
            math_spans.push(format!(
                "<span class=\"math display\">{}</span>",
                caps[1].trim()
            ));
            format!("\u{2}{idx}\u{2}")
        })
        .into_owned();
    s = INLINE_MATH
        .replace_all(&s, |caps: &regex::Captures| {
            let idx = math_spans.len();
            math_spans.push(format!("<span class=\"math\">{}</span>", caps[1].trim()));
            format!("\u{2}{idx}\u{2}")
        })
        .into_owned();

    // Emphasis commands, innermost first; two passes cover one nesting level.
    for _ in 0..2 {
        s = BOLD.replace_all(&s, "<strong>$1</strong>").into_owned();
        s = ITALIC.replace_all(&s, "<em>$1</em>").into_owned();
        s = MONO.replace_all(&s, "<code>$1</code>").into_owned();
    }

    s = s.replace("\\\\", "<br>");
    s = s.replace("\\&amp;", "&amp;");
    s = s.replace("\\%", "%");
    s = s.replace("\\#", "#");
    s = s.replace("\\_", "_");
    s = s.replace("\\{", "\u{4}").replace("\\}", "\u{5}");

    s = RESIDUAL_COMMAND.replace_all(&s, "").into_owned();
    // Remaining braces are grouping, not content.
    s = s.replace(['{', '}'], "");
    s = s.replace('\u{4}', "{").replace('\u{5}', "}");
    s = s.replace('\u{3}', "$");

    for (idx, span) in math_spans.iter().enumerate() {
        s = s.replace(&format!("\u{2}{idx}\u{2}"), span);
    }
    s
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn wrap_document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Paraphrased document</title>\n\
         <style>\n\
         body {{ font-family: Georgia, serif; max-width: 42rem; margin: 2rem auto; line-height: 1.5; }}\n\
         .math {{ font-family: monospace; }}\n\
         pre {{ background: #f4f4f4; padding: .75rem; overflow-x: auto; }}\n\
         </style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::{render_html, RenderError};

    #[test]
    fn sections_emphasis_and_paragraphs() {
        let latex = "\\section{Intro}\nSome \\textbf{bold} and \\emph{fine} text.\n\n\
                     Second paragraph with $x^2$ math.";
        let html = render_html(latex).unwrap();
        assert!(html.contains("<h2>Intro</h2>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>fine</em>"));
        assert!(html.contains("<span class=\"math\">x^2</span>"));
        assert!(html.contains("<p>Second paragraph"));
    }

    #[test]
    fn document_environment_is_transparent_and_title_renders() {
        let latex = "\\documentclass{article}\n\\title{A Study}\n\
                     \\begin{document}\n\\maketitle\nBody text.\n\\end{document}";
        let html = render_html(latex).unwrap();
        assert!(html.contains("<h1>A Study</h1>"));
        assert!(html.contains("<p>Body text.</p>"));
        assert!(!html.contains("documentclass"));
    }

    #[test]
    fn itemize_renders_list_items() {
        let latex = "\\begin{itemize}\n\\item First\n\\item Second\n\\end{itemize}";
        let html = render_html(latex).unwrap();
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>First</li>"));
        assert!(html.contains("<li>Second</li>"));
        assert!(html.contains("</ul>"));
    }

    #[test]
    fn verbatim_content_is_escaped_not_interpreted() {
        let latex = "\\begin{verbatim}\n<b>raw</b> \\textbf{kept}\n\\end{verbatim}";
        let html = render_html(latex).unwrap();
        assert!(html.contains("<pre>&lt;b&gt;raw&lt;/b&gt; \\textbf{kept}</pre>"));
    }

    #[test]
    fn unbalanced_environment_is_an_error() {
        let err = render_html("\\begin{itemize}\\item never closed").unwrap_err();
        assert_eq!(
            err,
            RenderError::UnclosedEnvironment {
                name: "itemize".to_string()
            }
        );

        let err = render_html("text \\end{center}").unwrap_err();
        assert_eq!(
            err,
            RenderError::UnmatchedEnd {
                name: "center".to_string()
            }
        );
    }

    #[test]
    fn comments_are_stripped_but_escaped_percent_stays() {
        let html = render_html("Fifty \\% done % a comment").unwrap();
        assert!(html.contains("Fifty % done"));
        assert!(!html.contains("a comment"));
    }
}
