//! Errors raised by the stream reader loop.

use thiserror::Error;

use crate::traits::HttpError;

/// Stream reader failures.
///
/// Protocol-level problems (bad frames, server `error` events) are not
/// reader failures; only losing the byte stream itself ends the loop with
/// an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    /// Pulling the next chunk failed.
    #[error("Stream read failed: {message}")]
    Read { message: String },
}

impl StreamError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Read { .. } => "E_STREAM_READ",
        }
    }
}

impl From<HttpError> for StreamError {
    fn from(err: HttpError) -> Self {
        StreamError::Read {
            message: err.to_string(),
        }
    }
}
