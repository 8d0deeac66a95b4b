use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::application::CompletionTransport;
use crate::domain::{ChatError, CompletionRequest, CompletionSettings, RawResponse};

/// HTTP transport for the OpenAI chat-completions API (and compatible servers).
///
/// One POST per call, bearer-token auth, no retries. The request timeout is
/// enforced by the underlying client; when it elapses the call fails with
/// [`ChatError::Transport`].
///
/// Point it at any compatible server by overriding the base URL:
///
/// ```text
/// OPENAI_BASE_URL=http://localhost:1234
/// OPENAI_MODEL=llama-3.2-3b-instruct
/// ```
#[derive(Debug)]
pub struct OpenAiTransport {
    client: reqwest::Client,
    /// Full endpoint URL (base + `/v1/chat/completions`).
    url: String,
    timeout: Duration,
}

impl OpenAiTransport {
    pub fn new(settings: &CompletionSettings) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ChatError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: settings.endpoint_url(),
            timeout: settings.timeout(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl CompletionTransport for OpenAiTransport {
    async fn post(
        &self,
        request: &CompletionRequest,
        credential: &SecretString,
    ) -> Result<RawResponse, ChatError> {
        debug!(url = %self.url, model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", credential.expose_secret()))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let detail = describe(&e);
                if e.is_timeout() {
                    warn!("Completion request timed out after {:?}", self.timeout);
                    return ChatError::transport(format!(
                        "request timed out after {:?} ({detail})",
                        self.timeout
                    ));
                }
                if e.is_connect() {
                    warn!("Could not connect to {}", self.url);
                }
                ChatError::transport(detail)
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| {
                ChatError::transport(format!("failed to read response body: {}", describe(&e)))
            })?;

        debug!(status, bytes = body.len(), "Completion response received");

        Ok(RawResponse::new(status, body))
    }
}

/// Error text including its source chain; reqwest keeps the useful part
/// (e.g. "connection refused") in the sources.
fn describe(error: &reqwest::Error) -> String {
    let mut text = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    text
}
