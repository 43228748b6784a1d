//! Observable session state.

use std::sync::Arc;

use crate::error::ChatErrorKind;
use crate::models::ChatMessage;
use crate::state::ToolCallState;

/// Where a session is in its send cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No send in progress
    #[default]
    Idle,
    /// Request issued, waiting for the response status
    Sending,
    /// Reading the event stream
    Streaming,
    /// Send finished; bookkeeping done, about to return to Idle
    Settled,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Sending => "sending",
            SessionPhase::Streaming => "streaming",
            SessionPhase::Settled => "settled",
        }
    }
}

/// Completion data reported by the server's `done` event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Usage {
    /// Server-side id of the assistant message
    pub message_id: Option<String>,
    /// Tokens consumed by the reply, when reported
    pub tokens_used: Option<u64>,
}

/// Point-in-time copy of everything a session exposes.
///
/// A fresh snapshot is published to subscribers after every mutation.
/// Messages are shared with the session, so taking a snapshot copies
/// pointers rather than the conversation history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    pub messages: Vec<Arc<ChatMessage>>,
    pub is_streaming: bool,
    /// User-facing error text of the last failure in this send cycle
    pub error: Option<String>,
    pub error_kind: Option<ChatErrorKind>,
    pub phase: SessionPhase,
    pub tool_calls: Vec<ToolCallState>,
    /// Transient progress text from `thinking` events
    pub status_line: Option<String>,
    pub last_usage: Option<Usage>,
}

impl SessionSnapshot {
    /// Content of the newest assistant message, if any.
    pub fn assistant_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_assistant())
            .map(|m| m.content.as_str())
    }
}
