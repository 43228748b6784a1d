//! Chat session state machine.
//!
//! A [`ChatSession`] owns the message list, the tool tracker and the error
//! slot for one conversation view. Each send walks the phases
//! `Idle -> Sending -> Streaming -> Settled -> Idle`; every server event goes
//! through [`ChatSession::apply`], and every send ends in the same
//! finalization step no matter how it stopped. A send whose future is
//! dropped midway (timeout, lost `select!` race, aborted task) is wound down
//! by a drop guard, so the session never stays stuck in a streaming phase.

mod snapshot;

pub use snapshot::{SessionPhase, SessionSnapshot, Usage};

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::error::{ChatError, ChatErrorKind, ChatResult};
use crate::models::{ChatMessage, SendMessageRequest};
use crate::sse::SseEvent;
use crate::state::{ToolCallState, ToolTracker};
use crate::stream::{read_stream, EventSink, ReadOutcome};
use crate::traits::ChatTransport;

/// Error message given to tool calls abandoned by a cancelled send.
pub const CANCELLED_TOOL_MESSAGE: &str = "Cancelled";

/// How a send ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The reply streamed without any error being recorded
    Completed,
    /// The caller cancelled; content received so far is kept
    Cancelled,
    /// The error slot was set during this send
    Failed(ChatErrorKind),
}

/// Client-side state of one chat conversation.
pub struct ChatSession {
    transport: Arc<dyn ChatTransport>,
    allow_write_operations: Option<bool>,
    messages: Vec<Arc<ChatMessage>>,
    tools: ToolTracker,
    phase: SessionPhase,
    is_streaming: bool,
    error: Option<ChatError>,
    status_line: Option<String>,
    last_usage: Option<Usage>,
    /// Assistant message of the current send cycle, once the first token arrived
    assistant_id: Option<String>,
    /// (conversation id, content) of the last send, for `retry`
    last_request: Option<(String, String)>,
    updates: watch::Sender<SessionSnapshot>,
    snapshots_published: u64,
}

impl ChatSession {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        let (updates, _) = watch::channel(SessionSnapshot::default());
        Self {
            transport,
            allow_write_operations: None,
            messages: Vec::new(),
            tools: ToolTracker::new(),
            phase: SessionPhase::Idle,
            is_streaming: false,
            error: None,
            status_line: None,
            last_usage: None,
            assistant_id: None,
            last_request: None,
            updates,
            snapshots_published: 0,
        }
    }

    /// Send `allowWriteOperations` with every message (omitted when None).
    pub fn with_allow_write_operations(mut self, allow: Option<bool>) -> Self {
        self.allow_write_operations = allow;
        self
    }

    /// Send a message and stream the reply into the session.
    ///
    /// Failures never escape: they land in the error slot and are reflected
    /// in the returned outcome.
    pub async fn send_message(&mut self, conversation_id: &str, content: &str) -> SendOutcome {
        self.send_message_with_cancel(conversation_id, content, &CancellationToken::new())
            .await
    }

    /// Same as [`send_message`](Self::send_message), stoppable through `cancel`.
    ///
    /// Cancellation is not an error: the partial assistant message stays as
    /// the final content and running tool calls are marked failed.
    pub async fn send_message_with_cancel(
        &mut self,
        conversation_id: &str,
        content: &str,
        cancel: &CancellationToken,
    ) -> SendOutcome {
        self.messages.push(Arc::new(ChatMessage::user(content)));
        self.dispatch(conversation_id, content, cancel).await
    }

    /// Resend the last message after a retryable (network) failure.
    ///
    /// Returns `None` without doing anything when the last send did not fail
    /// in a retryable way. The original user message is reused rather than
    /// appended again, and the failed attempt's partial reply is dropped so
    /// the turn ends up with a single assistant message.
    pub async fn retry(&mut self) -> Option<SendOutcome> {
        if !self.error.as_ref().is_some_and(ChatError::is_retryable) {
            tracing::debug!("Nothing to retry");
            return None;
        }
        let (conversation_id, content) = self.last_request.clone()?;
        tracing::info!(conversation_id = %conversation_id, "Retrying last message");
        self.discard_partial_reply();
        Some(
            self.dispatch(&conversation_id, &content, &CancellationToken::new())
                .await,
        )
    }

    async fn dispatch(
        &mut self,
        conversation_id: &str,
        content: &str,
        cancel: &CancellationToken,
    ) -> SendOutcome {
        let mut guard = self.begin_send(conversation_id, content);
        let result = guard.session.run_send(conversation_id, content, cancel).await;
        guard.settle(result)
    }

    fn discard_partial_reply(&mut self) {
        if let Some(id) = self.assistant_id.take() {
            let before = self.messages.len();
            self.messages.retain(|m| m.id != id);
            tracing::debug!(
                removed = before - self.messages.len(),
                "Discarding partial reply of failed attempt"
            );
        }
    }

    fn begin_send(&mut self, conversation_id: &str, content: &str) -> SendGuard<'_> {
        tracing::info!(conversation_id, chars = content.chars().count(), "Sending message");

        self.error = None;
        self.is_streaming = true;
        self.tools.clear();
        self.status_line = None;
        self.assistant_id = None;
        self.last_request = Some((conversation_id.to_string(), content.to_string()));
        self.phase = SessionPhase::Sending;
        self.publish();
        SendGuard {
            session: self,
            settled: false,
        }
    }

    async fn run_send(
        &mut self,
        conversation_id: &str,
        content: &str,
        cancel: &CancellationToken,
    ) -> ChatResult<ReadOutcome> {
        let mut request = SendMessageRequest::new(content);
        if let Some(allow) = self.allow_write_operations {
            request = request.with_write_operations(allow);
        }

        let transport = Arc::clone(&self.transport);
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(ReadOutcome::Cancelled),
            response = transport.start_stream(conversation_id, &request) => response?,
        };

        if !response.is_success() {
            return Err(ChatError::Transport {
                status: response.status,
            });
        }
        let body = response.body.ok_or(ChatError::MissingBody)?;

        self.phase = SessionPhase::Streaming;
        self.publish();

        Ok(read_stream(body, self, cancel).await?)
    }

    /// The one place a completed send is wound down. Runs exactly once per
    /// send, through `SendGuard::settle`.
    fn finish_send(&mut self, result: ChatResult<ReadOutcome>) -> SendOutcome {
        let cancelled = matches!(result, Ok(ReadOutcome::Cancelled));
        match result {
            Ok(ReadOutcome::Cancelled) => {
                let abandoned = self.tools.fail_running(CANCELLED_TOOL_MESSAGE);
                tracing::info!(abandoned, "Send cancelled");
            }
            Ok(outcome) => {
                tracing::debug!(?outcome, "Stream finished");
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.error_code(), "Send failed");
                self.tools.fail_running(&e.user_message());
                self.error = Some(e);
            }
        }

        self.is_streaming = false;
        self.status_line = None;
        self.phase = SessionPhase::Settled;
        self.publish();
        self.phase = SessionPhase::Idle;
        self.publish();

        let outcome = match &self.error {
            Some(e) => SendOutcome::Failed(e.kind()),
            None if cancelled => SendOutcome::Cancelled,
            None => SendOutcome::Completed,
        };
        tracing::info!(?outcome, messages = self.messages.len(), "Send settled");
        outcome
    }

    /// Wind down a send whose future was dropped before it settled.
    fn abandon_send(&mut self) {
        let abandoned = self.tools.fail_running(CANCELLED_TOOL_MESSAGE);
        tracing::warn!(
            abandoned,
            phase = self.phase.as_str(),
            "Send dropped before settling"
        );
        self.is_streaming = false;
        self.status_line = None;
        self.phase = SessionPhase::Idle;
        self.publish();
    }

    /// Apply one server event. Returns `Break` once the reply is complete.
    pub fn apply(&mut self, event: SseEvent) -> ControlFlow<()> {
        tracing::debug!(event_type = event.event_type_name(), "Applying event");

        let flow = match event {
            SseEvent::Token { content } => {
                self.append_token(&content);
                ControlFlow::Continue(())
            }
            SseEvent::ToolCallStart {
                tool_call_id,
                name,
                arguments,
            } => {
                self.tools.start(&tool_call_id, &name, arguments);
                ControlFlow::Continue(())
            }
            SseEvent::ToolCallResult {
                tool_call_id,
                name,
                result_preview,
            } => {
                self.tools.complete(&tool_call_id, &name, result_preview);
                ControlFlow::Continue(())
            }
            SseEvent::Thinking { message } => {
                self.status_line = Some(message);
                ControlFlow::Continue(())
            }
            SseEvent::Done {
                message_id,
                tokens_used,
            } => {
                if let (Some(server_id), Some(message)) = (&message_id, self.assistant_mut()) {
                    message.server_id = Some(server_id.clone());
                }
                self.last_usage = Some(Usage {
                    message_id,
                    tokens_used,
                });
                self.status_line = None;
                ControlFlow::Break(())
            }
            SseEvent::Error { code, message } => {
                tracing::warn!(
                    code = code.as_deref().unwrap_or("unknown"),
                    "Server reported error: {}",
                    message
                );
                self.tools.fail_running(&message);
                self.error = Some(ChatError::Protocol { code, message });
                ControlFlow::Continue(())
            }
        };

        self.publish();
        flow
    }

    fn append_token(&mut self, content: &str) {
        match self.assistant_mut() {
            Some(message) => message.content.push_str(content),
            None => {
                let message = ChatMessage::assistant(content);
                self.assistant_id = Some(message.id.clone());
                self.messages.push(Arc::new(message));
            }
        }
    }

    fn assistant_mut(&mut self) -> Option<&mut ChatMessage> {
        let id = self.assistant_id.as_deref()?;
        self.messages
            .iter_mut()
            .rev()
            .find(|m| m.id == id)
            .map(Arc::make_mut)
    }

    /// Text assembled from this send cycle's tokens so far.
    pub fn assembled_content(&self) -> &str {
        self.assistant_id
            .as_deref()
            .and_then(|id| self.messages.iter().rev().find(|m| m.id == id))
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }

    pub fn messages(&self) -> &[Arc<ChatMessage>] {
        &self.messages
    }

    pub fn is_streaming(&self) -> bool {
        self.is_streaming
    }

    /// User-facing text of the current error, if any.
    pub fn error(&self) -> Option<String> {
        self.error.as_ref().map(ChatError::user_message)
    }

    pub fn error_kind(&self) -> Option<ChatErrorKind> {
        self.error.as_ref().map(ChatError::kind)
    }

    /// The underlying error value, for logging or matching.
    pub fn last_error(&self) -> Option<&ChatError> {
        self.error.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn tool_calls(&self) -> impl Iterator<Item = &ToolCallState> {
        self.tools.iter()
    }

    pub fn tool_tracker(&self) -> &ToolTracker {
        &self.tools
    }

    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    pub fn last_usage(&self) -> Option<&Usage> {
        self.last_usage.as_ref()
    }

    /// Current state as an owned snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.messages.clone(),
            is_streaming: self.is_streaming,
            error: self.error(),
            error_kind: self.error_kind(),
            phase: self.phase,
            tool_calls: self.tools.to_vec(),
            status_line: self.status_line.clone(),
            last_usage: self.last_usage.clone(),
        }
    }

    /// Receive a snapshot after every state change.
    ///
    /// The receiver starts out holding the current state.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        // Nothing is published while nobody listens, so refresh first
        self.updates.send_replace(self.snapshot());
        self.updates.subscribe()
    }

    /// Number of snapshots sent to subscribers so far.
    pub fn snapshots_published(&self) -> u64 {
        self.snapshots_published
    }

    fn publish(&mut self) {
        if self.updates.receiver_count() == 0 {
            return;
        }
        self.updates.send_replace(self.snapshot());
        self.snapshots_published += 1;
    }
}

/// Live send on a session. Dropping it unsettled winds the send down.
struct SendGuard<'a> {
    session: &'a mut ChatSession,
    settled: bool,
}

impl SendGuard<'_> {
    fn settle(mut self, result: ChatResult<ReadOutcome>) -> SendOutcome {
        self.settled = true;
        self.session.finish_send(result)
    }
}

impl Drop for SendGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.session.abandon_send();
        }
    }
}

impl EventSink for ChatSession {
    fn on_event(&mut self, event: SseEvent) -> ControlFlow<()> {
        self.apply(event)
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("phase", &self.phase)
            .field("messages", &self.messages.len())
            .field("tool_calls", &self.tools.len())
            .field("error", &self.error)
            .finish()
    }
}
