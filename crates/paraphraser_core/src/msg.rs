/// Payload of a successful round trip: the raw model reply and the LaTeX
/// fragment extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContent {
    pub raw_reply: String,
    pub latex: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the API key; persisted on every edit.
    ApiKeyChanged(String),
    /// User selected or typed a model identifier.
    ModelChanged(String),
    /// User edited the instruction prompt.
    PromptChanged(String),
    /// Preferences read from the store at startup. Emits no save effects.
    PreferencesRestored {
        api_key: Option<String>,
        model: Option<String>,
        prompt: Option<String>,
    },
    /// A document was decoded successfully.
    DocumentLoaded { content: String, file_name: String },
    /// User triggered a paraphrase round trip.
    SubmitClicked,
    /// Engine completion for the in-flight request. `Err` carries the
    /// user-facing failure description.
    GenerationFinished {
        result: Result<GeneratedContent, String>,
    },
    /// Engine completion for a visual preview render.
    PreviewRendered { result: Result<String, String> },
    /// User asked for the `.tex` download export.
    DownloadClicked,
    /// User asked for the external editor hand-off.
    OverleafClicked,
    /// UI tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
