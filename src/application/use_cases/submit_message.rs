use secrecy::SecretString;
use tracing::{debug, info};

use crate::application::FetchReplyUseCase;
use crate::domain::{ChatError, ChatSession, Turn};

/// One chat interaction: record the question, wait for the reply, record it.
pub struct SubmitMessageUseCase {
    fetch_reply: FetchReplyUseCase,
}

impl SubmitMessageUseCase {
    pub fn new(fetch_reply: FetchReplyUseCase) -> Self {
        Self { fetch_reply }
    }

    pub fn fetch_reply(&self) -> &FetchReplyUseCase {
        &self.fetch_reply
    }

    /// Appends the user turn and then the assistant turn, returning the latter.
    ///
    /// When the credential or the text is missing the session is left as it
    /// was and nothing is sent.
    pub async fn execute<'s>(
        &self,
        session: &'s mut ChatSession,
        text: &str,
        credential: &SecretString,
    ) -> Result<&'s Turn, ChatError> {
        FetchReplyUseCase::check_preconditions(text, credential)?;

        session.push(Turn::user(text));
        debug!(session_id = %session.id(), "Recorded user turn #{}", session.len());

        // Preconditions were checked above, so an Err here cannot leave the
        // user turn unanswered.
        let reply = match self.fetch_reply.execute(text, credential).await {
            Ok(reply) => reply,
            Err(e) => e.to_string(),
        };

        info!(
            session_id = %session.id(),
            exchanges = session.exchange_count() + 1,
            "Exchange complete"
        );
        Ok(session.push(Turn::assistant(reply)))
    }
}
