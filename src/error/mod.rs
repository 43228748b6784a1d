//! Error handling for the chat client.
//!
//! - **Categories**: `ErrorCategory` decides retry affordances
//! - **Chat errors**: `ChatError` is the taxonomy of send-cycle failures
//!   (protocol, transport, network, missing body, malformed frame)
//! - **Stream errors**: `StreamError` covers the reader loop losing its bytes
//!
//! | Kind | Slot text | Retryable |
//! |------|-----------|-----------|
//! | Protocol | server message, verbatim | No |
//! | Transport | "Request failed with status N" | No |
//! | Network | "Connection lost. Click to retry." | Yes |
//! | MissingBody | "No response stream available" | No |
//! | MalformedFrame | logged, frame skipped | No |

mod category;
mod chat;
mod stream;

pub use category::ErrorCategory;
pub use chat::{ChatError, ChatErrorKind, CONNECTION_LOST_MESSAGE, NO_STREAM_MESSAGE};
pub use stream::StreamError;

/// Result alias for fallible chat operations.
pub type ChatResult<T> = Result<T, ChatError>;
