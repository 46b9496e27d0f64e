//! Paraphraser core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, GenerationRequest};
pub use msg::{GeneratedContent, Msg};
pub use state::{
    AppState, DocumentContent, PrefKey, Preferences, SessionStatus, DEFAULT_INSTRUCTION_PROMPT,
    DEFAULT_MODEL, KNOWN_MODELS, MISSING_INPUT_MESSAGE,
};
pub use update::update;
pub use view_model::AppViewModel;
