//! # Application Layer
//!
//! Use cases coordinating the chat session with a completion transport.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
