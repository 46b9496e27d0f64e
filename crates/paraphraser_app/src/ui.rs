//! Terminal rendering of the view model.

use paraphraser_core::{AppViewModel, SessionStatus, KNOWN_MODELS};
use paraphraser_engine::prepare_preview_content;

pub const HELP_TEXT: &str = "Commands:
  open <path>      load a Word document (.doc/.docx)
  key <value>      set the API key (persisted)
  model [<name>]   set the model, or list the known ones
  prompt [<text>]  set the instruction prompt, or show it
  submit           paraphrase the loaded document
  save             export the result as paraphrased-document.tex
  overleaf         write the Overleaf hand-off page
  show             reprint the current view
  help             show this help
  quit             exit";

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    out.push_str("== Document Paraphraser ==\n");
    out.push_str(&format!("Status: {}\n", status_label(&view.session)));

    out.push_str(&format!(
        "API key: {}\n",
        view.masked_api_key.as_deref().unwrap_or("(not set)")
    ));
    out.push_str(&format!("Model: {}\n", view.model));
    out.push_str(&format!("Prompt: {}\n", summarize(&view.prompt, 72)));
    out.push_str(&format!(
        "Document: {}\n",
        view.file_name.as_deref().unwrap_or("(none loaded)")
    ));

    match &view.artifact {
        Some(artifact) => {
            out.push_str("\n-- Paraphrased Document (LaTeX) --\n");
            out.push_str(&prepare_preview_content(artifact));
            out.push('\n');
            if view.rendering {
                out.push_str("(rendering visual preview...)\n");
            } else if view.has_visual_preview {
                out.push_str("(visual preview rendered)\n");
            }
        }
        None => {
            if view.original_content.is_some() {
                out.push_str("\nNo paraphrased content yet; type 'submit' to start.\n");
            } else {
                out.push_str("\nUpload a document to see the preview: open <path>\n");
            }
        }
    }

    if let SessionStatus::Error(message) = &view.session {
        out.push_str(&format!("\n{message}\n"));
    }
    out
}

pub fn list_models(current: &str) -> String {
    let mut out = String::from("Known models:\n");
    for model in KNOWN_MODELS {
        if model == current {
            out.push_str(&format!("  * {model} (current)\n"));
        } else {
            out.push_str(&format!("    {model}\n"));
        }
    }
    out.push_str("Any other identifier is accepted as a custom model.");
    out
}

fn status_label(session: &SessionStatus) -> &'static str {
    match session {
        SessionStatus::Idle => "Idle",
        SessionStatus::InFlight => "Processing...",
        SessionStatus::Error(_) => "Error",
    }
}

fn summarize(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max {
        return flat;
    }
    let truncated: String = flat.chars().take(max).collect();
    format!("{truncated}...")
}
