use std::sync::Arc;
use std::time::Instant;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::application::CompletionTransport;
use crate::domain::{
    ChatError, CompletionRequest, CompletionResponse, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};

/// Turns one piece of user text into the assistant's reply.
///
/// Stateless: every call sends a fresh single-message conversation, so the
/// use case is safe to share and call concurrently.
pub struct FetchReplyUseCase {
    transport: Arc<dyn CompletionTransport>,
    model: String,
    temperature: f64,
}

impl FetchReplyUseCase {
    pub fn new(transport: Arc<dyn CompletionTransport>) -> Self {
        Self {
            transport,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Reply text, or the user-facing description of a recoverable failure.
    ///
    /// `Err` is reserved for unmet preconditions (missing credential, empty
    /// text); in those cases no request is sent.
    pub async fn execute(&self, text: &str, credential: &SecretString) -> Result<String, ChatError> {
        match self.try_execute(text, credential).await {
            Ok(reply) => Ok(reply),
            Err(e) if e.is_recoverable() => Ok(e.to_string()),
            Err(e) => Err(e),
        }
    }

    /// Like [`execute`](Self::execute) but keeps recoverable failures typed.
    pub async fn try_execute(
        &self,
        text: &str,
        credential: &SecretString,
    ) -> Result<String, ChatError> {
        Self::check_preconditions(text, credential)?;

        let request = CompletionRequest::single_turn(&self.model, text, self.temperature);
        let start_time = Instant::now();
        let response = self.transport.post(&request, credential).await;
        let elapsed = start_time.elapsed();

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!("Completion request failed after {:?}: {}", elapsed, e);
                return Err(e);
            }
        };

        if !response.is_ok() {
            warn!(
                status = response.status,
                "Completion endpoint returned a non-success status"
            );
            return Err(ChatError::remote(response.status, response.body));
        }

        let parsed: CompletionResponse = serde_json::from_str(&response.body).map_err(|e| {
            warn!("Failed to parse completion response: {e}");
            ChatError::malformed(e.to_string())
        })?;

        let reply = parsed
            .into_first_content()
            .ok_or_else(|| ChatError::malformed("response has no choices[0].message.content"))?;

        info!(model = %self.model, "Received reply in {:?}", elapsed);
        debug!("Reply length: {} chars", reply.chars().count());

        Ok(reply)
    }

    pub(crate) fn check_preconditions(text: &str, credential: &SecretString) -> Result<(), ChatError> {
        if credential.expose_secret().trim().is_empty() {
            return Err(ChatError::MissingCredential);
        }
        if text.trim().is_empty() {
            return Err(ChatError::invalid_input("message text is empty"));
        }
        Ok(())
    }
}
