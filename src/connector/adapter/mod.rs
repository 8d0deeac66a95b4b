mod mock_transport;
mod openai_transport;

pub use mock_transport::*;
pub use openai_transport::*;
