use std::time::Duration;

use serde::Deserialize;

use crate::prompts::{compose_user_message, SYSTEM_PROMPT};
use crate::{FailureKind, GenerateError, GenerationRequest};

/// Chat-completion endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Sampling temperature sent with every request.
const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    /// Issue exactly one chat-completion call and return the reply text.
    /// There is no retry at this layer.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError>;
}

#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    settings: ClientSettings,
}

impl OpenAiGenerator {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, GenerateError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        let client = self.build_client()?;

        let body = serde_json::json!({
            "model": request.model,
            "messages": [
                {
                    "role": "system",
                    "content": SYSTEM_PROMPT,
                },
                {
                    "role": "user",
                    "content": compose_user_message(
                        &request.instruction_prompt,
                        &request.source_text,
                    ),
                },
            ],
            "temperature": TEMPERATURE,
        });

        let response = client
            .post(&self.settings.endpoint)
            .header("Authorization", format!("Bearer {}", request.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("API request failed with status {}", status.as_u16()),
            ));
        }

        let completion: ChatCompletion = response.json().await.map_err(|err| {
            GenerateError::new(
                FailureKind::InvalidReply,
                format!("API returned a malformed reply: {err}"),
            )
        })?;

        // Only the first choice is read.
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        if content.is_empty() {
            return Err(GenerateError::new(
                FailureKind::EmptyReply,
                "API returned no response text",
            ));
        }

        Ok(content)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
