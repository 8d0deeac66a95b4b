pub mod application;
pub mod connector;
pub mod domain;

pub use application::{CompletionTransport, FetchReplyUseCase, SubmitMessageUseCase};

pub use connector::{MockTransport, OpenAiTransport};

pub use domain::{
    ChatError, ChatSession, CompletionRequest, CompletionSettings, RawResponse, Role, Turn,
};
