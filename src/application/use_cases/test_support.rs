use std::sync::Mutex;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::application::CompletionTransport;
use crate::domain::{ChatError, CompletionRequest, RawResponse};

/// Transport double that records every request and answers with a fixed outcome.
pub(crate) struct StubTransport {
    outcome: Result<RawResponse, ChatError>,
    calls: Mutex<Vec<(CompletionRequest, String)>>,
}

impl StubTransport {
    pub(crate) fn replying(response: RawResponse) -> Self {
        Self {
            outcome: Ok(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(error: ChatError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(CompletionRequest, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionTransport for StubTransport {
    async fn post(
        &self,
        request: &CompletionRequest,
        credential: &SecretString,
    ) -> Result<RawResponse, ChatError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.clone(), credential.expose_secret().to_string()));
        self.outcome.clone()
    }
}
