//! Failures of a single send cycle.
//!
//! Every failure mode of `ChatSession::send_message` ends up as one of these
//! variants, and each variant knows the text it puts in the session's error
//! slot.

use thiserror::Error;

use super::category::ErrorCategory;
use super::stream::StreamError;
use crate::sse::SseParseError;
use crate::traits::HttpError;

/// Shown when the request or the stream read fails at the network level.
pub const CONNECTION_LOST_MESSAGE: &str = "Connection lost. Click to retry.";

/// Shown when a successful response carries no readable body.
pub const NO_STREAM_MESSAGE: &str = "No response stream available";

/// Coarse kind of a chat failure, cheap to copy into snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatErrorKind {
    Protocol,
    Transport,
    Network,
    MissingBody,
    MalformedFrame,
}

/// A chat send-cycle failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChatError {
    /// The server emitted an `error` event mid-stream.
    #[error("Backend error [{}]: {message}", .code.as_deref().unwrap_or("unknown"))]
    Protocol {
        code: Option<String>,
        message: String,
    },

    /// The message endpoint answered with a non-success status.
    #[error("Request failed with status {status}")]
    Transport { status: u16 },

    /// The request or a stream read failed (connectivity, abrupt close).
    #[error("Network error: {message}")]
    Network { message: String },

    /// Success status but no body to read.
    #[error("Response has no body stream")]
    MissingBody,

    /// A frame's data did not match its declared event type.
    #[error("Malformed {event_type} frame: {message}")]
    MalformedFrame { event_type: String, message: String },
}

impl ChatError {
    pub fn kind(&self) -> ChatErrorKind {
        match self {
            ChatError::Protocol { .. } => ChatErrorKind::Protocol,
            ChatError::Transport { .. } => ChatErrorKind::Transport,
            ChatError::Network { .. } => ChatErrorKind::Network,
            ChatError::MissingBody => ChatErrorKind::MissingBody,
            ChatError::MalformedFrame { .. } => ChatErrorKind::MalformedFrame,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::Network { .. } => ErrorCategory::Network,
            ChatError::Protocol { .. } | ChatError::Transport { .. } => ErrorCategory::Server,
            ChatError::MissingBody | ChatError::MalformedFrame { .. } => ErrorCategory::Client,
        }
    }

    /// Whether resending the same message is a sensible recovery.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Text placed in the session's error slot.
    ///
    /// Protocol errors are surfaced verbatim; everything else gets a fixed
    /// or status-describing message.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Protocol { message, .. } => message.clone(),
            ChatError::Transport { status } => format!("Request failed with status {}", status),
            ChatError::Network { .. } => CONNECTION_LOST_MESSAGE.to_string(),
            ChatError::MissingBody => NO_STREAM_MESSAGE.to_string(),
            ChatError::MalformedFrame { event_type, .. } => {
                format!("Received an unreadable {} event from the server.", event_type)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Protocol { .. } => "E_CHAT_PROTOCOL",
            ChatError::Transport { .. } => "E_CHAT_STATUS",
            ChatError::Network { .. } => "E_CHAT_NETWORK",
            ChatError::MissingBody => "E_CHAT_NO_BODY",
            ChatError::MalformedFrame { .. } => "E_CHAT_FRAME",
        }
    }
}

impl From<HttpError> for ChatError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status, .. } => ChatError::Transport { status },
            other => ChatError::Network {
                message: other.to_string(),
            },
        }
    }
}

impl From<StreamError> for ChatError {
    fn from(err: StreamError) -> Self {
        ChatError::Network {
            message: err.to_string(),
        }
    }
}

impl From<SseParseError> for ChatError {
    fn from(err: SseParseError) -> Self {
        match err {
            SseParseError::InvalidJson { event_type, source } => ChatError::MalformedFrame {
                event_type,
                message: source,
            },
            SseParseError::MissingData { event_type } => ChatError::MalformedFrame {
                event_type,
                message: "missing data line".to_string(),
            },
        }
    }
}
