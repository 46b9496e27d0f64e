use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

/// Raw text decoded from an uploaded document, together with the file name
/// it came from. Replaced wholesale on re-load; the caller stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentContent {
    pub content: String,
    pub file_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("unsupported document format '{extension}': expected a Word document (.doc or .docx)")]
    UnsupportedFormat { extension: String },
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode document: {message}")]
    Decode { message: String },
}

/// Load a Word document from disk and decode it to raw text.
///
/// The format check is an extension gate only, no content sniffing. Decoding
/// keeps text runs and drops formatting, images, and structure.
pub fn load_document(path: &Path) -> Result<DocumentContent, IngestError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if extension != "doc" && extension != "docx" {
        return Err(IngestError::UnsupportedFormat { extension });
    }

    let bytes = fs::read(path)?;
    let content = decode_docx(&bytes)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    Ok(DocumentContent { content, file_name })
}

/// Decode a `.docx` payload: an OPC zip archive whose main part is
/// `word/document.xml`. Legacy `.doc` binaries are not a zip archive and
/// fail here with a decode error.
pub fn decode_docx(bytes: &[u8]) -> Result<String, IngestError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|err| IngestError::Decode {
            message: format!("not a Word archive: {err}"),
        })?;
    let mut part = archive
        .by_name("word/document.xml")
        .map_err(|err| IngestError::Decode {
            message: format!("word/document.xml missing: {err}"),
        })?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|err| IngestError::Decode {
            message: err.to_string(),
        })?;
    extract_text_runs(&xml)
}

/// Collect the document's text runs (`w:t`), with a blank line between
/// paragraphs, a tab for `w:tab`, and a line break for `w:br`.
fn extract_text_runs(xml: &str) -> Result<String, IngestError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => match element.local_name().as_ref() {
                b"t" => in_text_run = true,
                b"tab" => current.push('\t'),
                b"br" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(element)) => match element.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" => current.push('\n'),
                _ => {}
            },
            Ok(Event::End(element)) => match element.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Text(text)) if in_text_run => {
                let unescaped = text.unescape().map_err(|err| IngestError::Decode {
                    message: err.to_string(),
                })?;
                current.push_str(&unescaped);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(IngestError::Decode {
                    message: err.to_string(),
                })
            }
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs.join("\n\n"))
}
