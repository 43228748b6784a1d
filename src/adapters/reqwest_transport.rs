//! Reqwest-based chat transport adapter.
//!
//! Production implementation of [`ChatTransport`]: POSTs the message as JSON
//! to the conversation's message endpoint and hands back the status code and
//! the body as a byte stream.

use async_trait::async_trait;
use futures_util::StreamExt;

use crate::config::ClientConfig;
use crate::models::SendMessageRequest;
use crate::traits::{ByteStream, ChatTransport, HttpError, StreamResponse};

/// Chat transport implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use chatstream::adapters::ReqwestTransport;
/// use chatstream::config::ClientConfig;
///
/// let transport = ReqwestTransport::new(ClientConfig::from_env())?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    /// Build a transport with a client configured from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(Self::convert_error)?;
        Ok(Self { client, config })
    }

    /// Create a transport around a pre-built reqwest::Client.
    ///
    /// This allows for advanced configuration like proxies, connection
    /// pools, or TLS settings.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Convert reqwest error to HttpError.
    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    /// Convert a mid-body read error.
    fn convert_read_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else {
            HttpError::Io(err.to_string())
        }
    }

    fn build_request(
        &self,
        conversation_id: &str,
        request: &SendMessageRequest,
    ) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .post(self.config.messages_url(conversation_id))
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(request);

        match &self.config.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl ChatTransport for ReqwestTransport {
    async fn start_stream(
        &self,
        conversation_id: &str,
        request: &SendMessageRequest,
    ) -> Result<StreamResponse, HttpError> {
        let response = self
            .build_request(conversation_id, request)
            .send()
            .await
            .map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        tracing::debug!(status, conversation_id, "Message endpoint responded");

        if !response.status().is_success() {
            return Ok(StreamResponse::without_body(status));
        }

        let body: ByteStream = Box::pin(
            response
                .bytes_stream()
                .map(|chunk| chunk.map_err(Self::convert_read_error)),
        );
        Ok(StreamResponse::new(status, body))
    }
}
