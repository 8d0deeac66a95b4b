//! # Domain Layer
//!
//! Chat history, completion wire types and the error model.
//! This layer is independent of transports and the terminal surface.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
