use std::fmt;

use crate::render::RenderError;

pub type RequestId = u64;

/// One outbound chat-completion call. Constructed fresh per submission and
/// never persisted; the credential lives only here for the duration of the
/// call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub instruction_prompt: String,
    pub source_text: String,
    pub api_key: String,
}

/// Result of a successful round trip: the raw model reply plus the LaTeX
/// fragment extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub raw_reply: String,
    pub artifact: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerateError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport-level failure reaching the endpoint, including timeouts.
    Network,
    /// Non-success response status.
    HttpStatus(u16),
    /// The reply payload could not be parsed.
    InvalidReply,
    /// The reply parsed but carried no completion text.
    EmptyReply,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::InvalidReply => write!(f, "malformed reply"),
            FailureKind::EmptyReply => write!(f, "empty reply"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    GenerationCompleted {
        request_id: RequestId,
        result: Result<GenerationOutcome, GenerateError>,
    },
    PreviewRendered {
        request_id: RequestId,
        result: Result<String, RenderError>,
    },
}
