//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completion transports (OpenAI-compatible HTTP, offline mock)
//! - The terminal chat surface

pub mod adapter;
pub mod tui;

pub use adapter::*;
