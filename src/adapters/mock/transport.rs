//! Mock chat transport for testing.
//!
//! Responses are scripted up front and handed out one per `start_stream`
//! call, in order. Every request is recorded for later verification.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::models::SendMessageRequest;
use crate::session::SessionSnapshot;
use crate::traits::{ByteStream, ChatTransport, HttpError, StreamResponse};

/// A recorded stream-start request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub conversation_id: String,
    pub request: SendMessageRequest,
}

/// Scripted outcome of one `start_stream` call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 with a body that yields these chunks, then ends
    Stream(Vec<Bytes>),
    /// 200 with a body that yields these chunks, then fails
    StreamThenError(Vec<Bytes>, HttpError),
    /// 200 with a body that yields these chunks, then never ends
    StreamThenHang(Vec<Bytes>),
    /// Response with this status and no body
    Status(u16),
    /// The request itself fails
    Error(HttpError),
}

impl MockResponse {
    /// Convenience: a body made of string chunks.
    pub fn chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockResponse::Stream(
            chunks
                .into_iter()
                .map(|c| Bytes::from(c.into()))
                .collect(),
        )
    }
}

/// Render one wire frame: `event: <name>\ndata: <json>\n\n`.
pub fn sse_frame(event: &str, data: &str) -> String {
    format!("event: {}\ndata: {}\n\n", event, data)
}

/// Mock chat transport.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    observer: Arc<Mutex<Option<watch::Receiver<SessionSnapshot>>>>,
    observed_errors: Arc<Mutex<Vec<Option<String>>>>,
}

impl MockTransport {
    /// Create a new mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response for the next unanswered call.
    pub fn push_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Builder form of `push_response`.
    pub fn with_response(self, response: MockResponse) -> Self {
        self.push_response(response);
        self
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Watch a session so each call records the session's error slot as it
    /// was at the moment the request went out.
    pub fn observe(&self, receiver: watch::Receiver<SessionSnapshot>) {
        *self.observer.lock().unwrap() = Some(receiver);
    }

    /// Error slot values seen at each `start_stream` call (needs `observe`).
    pub fn observed_errors(&self) -> Vec<Option<String>> {
        self.observed_errors.lock().unwrap().clone()
    }

    fn record(&self, conversation_id: &str, request: &SendMessageRequest) {
        self.requests.lock().unwrap().push(RecordedRequest {
            conversation_id: conversation_id.to_string(),
            request: request.clone(),
        });

        if let Some(receiver) = self.observer.lock().unwrap().as_ref() {
            let error = receiver.borrow().error.clone();
            self.observed_errors.lock().unwrap().push(error);
        }
    }
}

fn chunk_stream(chunks: Vec<Bytes>) -> impl futures::Stream<Item = Result<Bytes, HttpError>> {
    futures::stream::iter(chunks.into_iter().map(Ok))
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn start_stream(
        &self,
        conversation_id: &str,
        request: &SendMessageRequest,
    ) -> Result<StreamResponse, HttpError> {
        use futures::StreamExt;

        self.record(conversation_id, request);

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Stream(chunks)) => {
                let body: ByteStream = Box::pin(chunk_stream(chunks));
                Ok(StreamResponse::new(200, body))
            }
            Some(MockResponse::StreamThenError(chunks, err)) => {
                let body: ByteStream =
                    Box::pin(chunk_stream(chunks).chain(futures::stream::once(async { Err(err) })));
                Ok(StreamResponse::new(200, body))
            }
            Some(MockResponse::StreamThenHang(chunks)) => {
                let body: ByteStream =
                    Box::pin(chunk_stream(chunks).chain(futures::stream::pending()));
                Ok(StreamResponse::new(200, body))
            }
            Some(MockResponse::Status(status)) => Ok(StreamResponse::without_body(status)),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "No mock response for conversation: {}",
                conversation_id
            ))),
        }
    }
}
