//! Paraphraser engine: IO pipeline and effect execution.
mod client;
mod engine;
mod export;
mod extract;
mod ingest;
mod persist;
mod preview;
mod prompts;
mod render;
mod types;

pub use client::{ClientSettings, Generator, OpenAiGenerator, DEFAULT_ENDPOINT};
pub use engine::EngineHandle;
pub use export::{
    build_overleaf_handoff, write_overleaf_handoff, write_preview_html, write_tex,
    OVERLEAF_DOCS_URL, OVERLEAF_HANDOFF_FILENAME, PREVIEW_EXPORT_FILENAME, TEX_EXPORT_FILENAME,
};
pub use extract::extract_latex_fragment;
pub use ingest::{decode_docx, load_document, DocumentContent, IngestError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use preview::{prepare_preview_content, MAX_PREVIEW_CONTENT};
pub use prompts::{compose_user_message, DOCUMENT_LABEL, SYSTEM_PROMPT};
pub use render::{render_html, RenderError};
pub use types::{
    EngineEvent, FailureKind, GenerateError, GenerationOutcome, GenerationRequest, RequestId,
};
