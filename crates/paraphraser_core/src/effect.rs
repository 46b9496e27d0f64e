use crate::PrefKey;

/// Data for one outbound chat-completion call. Constructed fresh per
/// submission and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub instruction_prompt: String,
    pub source_text: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    IssueGeneration(GenerationRequest),
    RenderPreview { latex: String },
    SavePreference { key: PrefKey, value: String },
    WriteTexFile { latex: String },
    ExportPreviewHtml { html: String },
    OverleafHandoff { latex: String },
}
