use crate::SessionStatus;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionStatus,
    pub file_name: Option<String>,
    pub original_content: Option<String>,
    /// Plain preview: the extracted artifact shown as text regardless of
    /// whether visual rendering succeeded.
    pub artifact: Option<String>,
    pub has_visual_preview: bool,
    pub rendering: bool,
    pub api_key_set: bool,
    pub masked_api_key: Option<String>,
    pub model: String,
    pub prompt: String,
    pub can_submit: bool,
    pub dirty: bool,
}
