use crate::view_model::AppViewModel;

/// Model used when the stored preference is absent.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Instruction prompt used when the stored preference is absent.
pub const DEFAULT_INSTRUCTION_PROMPT: &str = "Paraphrase the following document into academic \
language, maintaining the structure and formatting. Return the result in LaTeX format.";

/// Models offered by the front end; any other identifier is accepted as a
/// custom model.
pub const KNOWN_MODELS: [&str; 4] = ["gpt-4o", "gpt-4-turbo", "gpt-3.5-turbo", "gpt-4o-mini"];

/// Form-level message shown when a submission lacks a document or credential.
pub const MISSING_INPUT_MESSAGE: &str = "Please upload a document and provide an API key";

/// Round-trip status. `Error` keeps the trigger enabled; only `InFlight`
/// blocks a new submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    InFlight,
    Error(String),
}

/// Decoded text of the loaded document. Replaced wholesale on re-load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentContent {
    pub content: String,
    pub file_name: String,
}

/// Key under which a preference is persisted. One file per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKey {
    ApiKey,
    Model,
    Prompt,
}

impl PrefKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PrefKey::ApiKey => "api_key",
            PrefKey::Model => "model",
            PrefKey::Prompt => "prompt",
        }
    }
}

/// The three persisted preferences, last written value wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub api_key: String,
    pub model: String,
    pub prompt: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            prompt: DEFAULT_INSTRUCTION_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    prefs: Preferences,
    document: Option<DocumentContent>,
    raw_reply: Option<String>,
    artifact: Option<String>,
    preview_html: Option<String>,
    session: SessionStatus,
    rendering: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session.clone(),
            file_name: self.document.as_ref().map(|d| d.file_name.clone()),
            original_content: self.document.as_ref().map(|d| d.content.clone()),
            artifact: self.artifact.clone(),
            has_visual_preview: self.preview_html.is_some(),
            rendering: self.rendering,
            api_key_set: !self.prefs.api_key.is_empty(),
            masked_api_key: mask_api_key(&self.prefs.api_key),
            model: self.prefs.model.clone(),
            prompt: self.prefs.prompt.clone(),
            can_submit: self.document.is_some()
                && !self.prefs.api_key.is_empty()
                && self.session != SessionStatus::InFlight,
            dirty: self.dirty,
        }
    }

    pub fn session(&self) -> &SessionStatus {
        &self.session
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn document(&self) -> Option<&DocumentContent> {
        self.document.as_ref()
    }

    pub fn artifact(&self) -> Option<&str> {
        self.artifact.as_deref()
    }

    pub fn raw_reply(&self) -> Option<&str> {
        self.raw_reply.as_deref()
    }

    pub fn preview_html(&self) -> Option<&str> {
        self.preview_html.as_deref()
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering
    }

    /// Returns the dirty flag and clears it. The front end uses this to
    /// coalesce rendering.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_api_key(&mut self, value: String) {
        self.prefs.api_key = value;
        self.mark_dirty();
    }

    pub(crate) fn set_model(&mut self, value: String) {
        self.prefs.model = value;
        self.mark_dirty();
    }

    pub(crate) fn set_prompt(&mut self, value: String) {
        self.prefs.prompt = value;
        self.mark_dirty();
    }

    pub(crate) fn set_document(&mut self, document: DocumentContent) {
        self.document = Some(document);
        self.mark_dirty();
    }

    /// Clears a standing error. Called at the start of a submission attempt;
    /// no other event clears it.
    pub(crate) fn clear_error(&mut self) {
        if matches!(self.session, SessionStatus::Error(_)) {
            self.session = SessionStatus::Idle;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.session = SessionStatus::Error(message.into());
        self.mark_dirty();
    }

    pub(crate) fn begin_generation(&mut self) {
        self.session = SessionStatus::InFlight;
        self.mark_dirty();
    }

    /// Stores a successful round trip and returns to `Idle`. The artifact is
    /// only ever overwritten here, so a failed request leaves the previous
    /// result intact.
    pub(crate) fn store_generated(&mut self, raw_reply: String, artifact: String) {
        self.raw_reply = Some(raw_reply);
        self.artifact = Some(artifact);
        self.preview_html = None;
        self.session = SessionStatus::Idle;
        self.mark_dirty();
    }

    pub(crate) fn begin_rendering(&mut self) {
        self.rendering = true;
        self.mark_dirty();
    }

    pub(crate) fn finish_rendering(&mut self, html: Option<String>) {
        self.rendering = false;
        self.preview_html = html;
        self.mark_dirty();
    }
}

/// Keeps enough of the credential visible to recognize it without ever
/// echoing the whole secret.
fn mask_api_key(api_key: &str) -> Option<String> {
    if api_key.is_empty() {
        return None;
    }
    let visible: String = api_key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    Some(format!("****{visible}"))
}
