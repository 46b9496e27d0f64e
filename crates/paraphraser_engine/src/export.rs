use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};

use crate::persist::{AtomicFileWriter, PersistError};

/// Fixed suggested name for the LaTeX download.
pub const TEX_EXPORT_FILENAME: &str = "paraphrased-document.tex";

/// Fixed name for the rendered visual preview.
pub const PREVIEW_EXPORT_FILENAME: &str = "paraphrased-preview.html";

/// Fixed name for the external hand-off page.
pub const OVERLEAF_HANDOFF_FILENAME: &str = "overleaf-handoff.html";

/// Collaborative-editor endpoint the hand-off form posts to.
pub const OVERLEAF_DOCS_URL: &str = "https://www.overleaf.com/docs";

/// Write the artifact as `paraphrased-document.tex` under `dir`.
pub fn write_tex(dir: &Path, latex: &str) -> Result<PathBuf, PersistError> {
    AtomicFileWriter::new(dir.to_path_buf()).write(TEX_EXPORT_FILENAME, latex)
}

/// Write the rendered HTML preview under `dir`.
pub fn write_preview_html(dir: &Path, html: &str) -> Result<PathBuf, PersistError> {
    AtomicFileWriter::new(dir.to_path_buf()).write(PREVIEW_EXPORT_FILENAME, html)
}

/// Build the hand-off page: the artifact base64-encoded into a `data:` URI,
/// embedded as a hidden `snip_uri` field in a form posting to the editor.
/// The page submits itself when opened in a browser; nothing about the
/// external service's acceptance is observed.
pub fn build_overleaf_handoff(latex: &str) -> String {
    let encoded = general_purpose::STANDARD.encode(latex.as_bytes());
    let data_uri = format!("data:application/x-tex;base64,{encoded}");
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Open in Overleaf</title></head>\n\
         <body onload=\"document.forms[0].submit()\">\n\
         <form method=\"POST\" action=\"{OVERLEAF_DOCS_URL}\" target=\"_blank\">\n\
         <input type=\"hidden\" name=\"snip_uri\" value=\"{data_uri}\">\n\
         <noscript><button type=\"submit\">Open in Overleaf</button></noscript>\n\
         </form>\n</body>\n</html>\n"
    )
}

/// Write the hand-off page under `dir` and return its path.
pub fn write_overleaf_handoff(dir: &Path, latex: &str) -> Result<PathBuf, PersistError> {
    AtomicFileWriter::new(dir.to_path_buf()).write(OVERLEAF_HANDOFF_FILENAME, &build_overleaf_handoff(latex))
}
