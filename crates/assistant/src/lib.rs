//! Language-model fallback assistant.
//!
//! Free-text questions about the space are answered by a hosted model behind
//! an OpenAI-compatible `/chat/completions` endpoint (Groq by default). Every
//! call carries the same fixed system preamble — the space's knowledge text —
//! and exactly one user message; there is no conversation memory.

mod preamble;

pub use preamble::DEFAULT_PREAMBLE;

use async_trait::async_trait;
use rewaqbot_core::assistant::Assistant;
use rewaqbot_core::error::AssistantError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Chat-completions client for the hosted model.
pub struct GroqAssistant {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    preamble: String,
    client: reqwest::Client,
}

impl GroqAssistant {
    /// Create a new assistant with the default endpoint, model, and preamble.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "groq".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            preamble: DEFAULT_PREAMBLE.into(),
            client,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the knowledge preamble.
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }
}

#[async_trait]
impl Assistant for GroqAssistant {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_reply(&self, user_text: &str) -> Result<String, AssistantError> {
        if self.api_key.is_empty() {
            return Err(AssistantError::NotConfigured(
                "No assistant API key configured".into(),
            ));
        }

        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.preamble,
                },
                ChatMessage {
                    role: "user",
                    content: user_text,
                },
            ],
        };

        debug!(model = %self.model, "Sending fallback completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(AssistantError::RateLimited { retry_after_secs: 5 });
        }
        if status == 401 || status == 403 {
            return Err(AssistantError::AuthenticationFailed(
                "Invalid assistant API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Assistant API error");
            return Err(AssistantError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: ChatCompletionResponse =
            response.json().await.map_err(|e| AssistantError::ApiError {
                status_code: 200,
                message: format!("Failed to parse completion response: {e}"),
            })?;

        api_resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AssistantError::ApiError {
                status_code: 200,
                message: "Completion response contained no choices".into(),
            })
    }
}

// --- Chat completions wire types ---

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}
