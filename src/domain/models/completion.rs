use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how completion requests are sent.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    base_url: String,
    model: String,
    temperature: f64,
    timeout: Duration,
}

impl CompletionSettings {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read settings from the environment, falling back to the public endpoint:
    ///
    /// | Variable          | Default                  |
    /// |-------------------|--------------------------|
    /// | `OPENAI_BASE_URL` | `https://api.openai.com` |
    /// | `OPENAI_MODEL`    | `gpt-3.5-turbo`          |
    pub fn from_env() -> Self {
        let base = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(base, model)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full endpoint URL (base + `/v1/chat/completions`).
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), COMPLETIONS_PATH)
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestMessage {
    pub role: String,
    pub content: String,
}

/// Chat-completion request body. Only the current message is ever sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<RequestMessage>,
    pub temperature: f64,
}

impl CompletionRequest {
    pub fn single_turn(model: impl Into<String>, text: impl Into<String>, temperature: f64) -> Self {
        Self {
            model: model.into(),
            messages: vec![RequestMessage {
                role: super::Role::User.as_str().to_string(),
                content: text.into(),
            }],
            temperature,
        }
    }
}

/// Subset of the completion response we read.
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
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

impl CompletionResponse {
    /// `choices[0].message.content`, if the endpoint produced one.
    pub fn into_first_content(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|c| c.message.content)
    }
}

/// Status and body as received, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}
