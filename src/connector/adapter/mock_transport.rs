use async_trait::async_trait;
use secrecy::SecretString;
use tracing::debug;

use crate::application::CompletionTransport;
use crate::domain::{ChatError, CompletionRequest, RawResponse};

/// Offline transport that echoes the user's message back as the reply.
pub struct MockTransport;

impl MockTransport {
    pub fn new() -> Self {
        Self
    }

    fn echo_body(text: &str) -> String {
        serde_json::json!({
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": format!("Echo: {text}") },
                "finish_reason": "stop"
            }]
        })
        .to_string()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionTransport for MockTransport {
    async fn post(
        &self,
        request: &CompletionRequest,
        _credential: &SecretString,
    ) -> Result<RawResponse, ChatError> {
        let text = request
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        debug!("Generated mock completion for {} chars", text.chars().count());

        Ok(RawResponse::new(200, Self::echo_body(text)))
    }
}
