//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`ChatTransport`] - starts the streamed reply for a chat message

pub mod transport;

pub use transport::{ByteStream, ChatTransport, HttpError, StreamResponse};
