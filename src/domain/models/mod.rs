mod chat_session;
mod completion;
mod turn;

pub use chat_session::*;
pub use completion::*;
pub use turn::*;
