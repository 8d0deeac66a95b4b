use thiserror::Error;

/// Everything that can go wrong between a submitted message and its reply.
///
/// The first three variants are recoverable: their `Display` text is what the
/// user sees in place of the assistant's answer, and the session carries on.
/// The rest are preconditions or setup failures and never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("❌ Error {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("⚠️ API connection failed. Details: {0}")]
    Transport(String),

    #[error("⚠️ Unexpected response from the completion endpoint. Details: {0}")]
    MalformedResponse(String),

    #[error("Please enter your OpenAI API key to continue.")]
    MissingCredential,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ChatError {
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::Remote {
            status,
            body: body.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Failures that are shown to the user as the assistant's reply.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Remote { .. } | Self::Transport(_) | Self::MalformedResponse(_)
        )
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_embeds_status_and_body() {
        let err = ChatError::remote(429, "rate limited");
        let text = err.to_string();

        assert!(text.contains("429"));
        assert!(text.contains("rate limited"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_transport_error_embeds_detail() {
        let err = ChatError::transport("operation timed out");

        assert_eq!(
            err.to_string(),
            "⚠️ API connection failed. Details: operation timed out"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_preconditions_are_not_recoverable() {
        assert!(!ChatError::MissingCredential.is_recoverable());
        assert!(ChatError::MissingCredential.is_precondition());
        assert!(ChatError::invalid_input("empty").is_precondition());
        assert!(!ChatError::configuration("tls").is_precondition());
    }
}
