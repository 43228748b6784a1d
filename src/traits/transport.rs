//! Chat transport trait abstraction.
//!
//! The session only needs one thing from the network: "start streaming the
//! assistant's reply to this message". Implementations return the HTTP status
//! and, when there is one, the response body as a byte stream. Headers,
//! authentication and connection management stay behind this seam.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::fmt;
use std::pin::Pin;
use thiserror::Error;

use crate::models::SendMessageRequest;

/// Incrementally delivered response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Response to a stream-start request.
pub struct StreamResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, if the transport could expose one
    pub body: Option<ByteStream>,
}

impl StreamResponse {
    /// Create a response with a body stream.
    pub fn new(status: u16, body: ByteStream) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Create a response that carries no readable body.
    pub fn without_body(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamResponse")
            .field("status", &self.status)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// HTTP transport errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
    /// Server returned an error status where a transport treats that as a failure
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },
    /// IO error while reading the body
    #[error("IO error: {0}")]
    Io(String),
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Other error
    #[error("HTTP error: {0}")]
    Other(String),
}

/// Trait for the "send a message and stream the reply" operation.
///
/// # Example
///
/// ```ignore
/// use chatstream::models::SendMessageRequest;
/// use chatstream::traits::ChatTransport;
///
/// async fn start<T: ChatTransport>(transport: &T) {
///     let request = SendMessageRequest::new("Hi");
///     let response = transport.start_stream("conv-1", &request).await?;
///     println!("status {}", response.status);
/// }
/// ```
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Issue the message request for `conversation_id`.
    ///
    /// Returns `Err` only when no response was obtained at all (connection
    /// refused, DNS failure, timeout). Non-success statuses come back as
    /// `Ok` with the status set so the caller can report them.
    async fn start_stream(
        &self,
        conversation_id: &str,
        request: &SendMessageRequest,
    ) -> Result<StreamResponse, HttpError>;
}
