use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::{ChatError, CompletionRequest, RawResponse};

/// Sends one completion request to the remote endpoint.
///
/// Implementors own transport, headers and timeouts. Any HTTP status comes
/// back as `Ok`; interpreting it is the caller's job. Only failures where no
/// response arrived at all (timeout, DNS, connection reset) are `Err`, as
/// [`ChatError::Transport`].
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn post(
        &self,
        request: &CompletionRequest,
        credential: &SecretString,
    ) -> Result<RawResponse, ChatError>;
}
