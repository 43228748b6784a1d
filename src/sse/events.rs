//! SSE event types and definitions
//!
//! Contains the SseEvent enum with every event variant the assistant chat
//! endpoint streams, plus the line and error types used while parsing.

use serde::{Deserialize, Serialize};

/// Typed SSE events from the chat message endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SseEvent {
    /// Incremental fragment of assistant text
    Token { content: String },
    /// The assistant started a tool invocation
    ToolCallStart {
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        name: String,
        /// Opaque argument payload, never validated
        #[serde(default)]
        arguments: serde_json::Value,
    },
    /// A tool invocation finished
    ToolCallResult {
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        name: String,
        #[serde(rename = "resultPreview", default)]
        result_preview: String,
    },
    /// Informational status line ("Searching documents...")
    Thinking { message: String },
    /// Stream completed successfully
    Done {
        #[serde(rename = "messageId")]
        message_id: Option<String>,
        #[serde(rename = "tokensUsed")]
        tokens_used: Option<u64>,
    },
    /// Error reported by the backend mid-stream
    Error {
        code: Option<String>,
        message: String,
    },
}

impl SseEvent {
    /// Returns the wire event name for this variant.
    pub fn event_type_name(&self) -> &'static str {
        match self {
            SseEvent::Token { .. } => "token",
            SseEvent::ToolCallStart { .. } => "tool_call_start",
            SseEvent::ToolCallResult { .. } => "tool_call_result",
            SseEvent::Thinking { .. } => "thinking",
            SseEvent::Done { .. } => "done",
            SseEvent::Error { .. } => "error",
        }
    }

    /// True for the events that end a send cycle on the server side.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SseEvent::Done { .. })
    }
}

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: token")
    Event(String),
    /// Data payload (e.g., "data: {\"content\": \"hello\"}")
    Data(String),
    /// Empty line
    Empty,
    /// Comment line (starts with ':')
    Comment(String),
}

/// Errors that can occur while turning one frame into an event
#[derive(Debug, Clone, PartialEq)]
pub enum SseParseError {
    /// Invalid JSON in data payload
    InvalidJson { event_type: String, source: String },
    /// Frame carried an event line but no data line
    MissingData { event_type: String },
}

impl std::fmt::Display for SseParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SseParseError::InvalidJson { event_type, source } => {
                write!(f, "Invalid JSON for event '{}': {}", event_type, source)
            }
            SseParseError::MissingData { event_type } => {
                write!(f, "Missing data for event type: {}", event_type)
            }
        }
    }
}

impl std::error::Error for SseParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sse_event_type_name() {
        assert_eq!(
            SseEvent::Token {
                content: String::new()
            }
            .event_type_name(),
            "token"
        );
        assert_eq!(
            SseEvent::Done {
                message_id: None,
                tokens_used: None
            }
            .event_type_name(),
            "done"
        );
        assert_eq!(
            SseEvent::Thinking {
                message: "x".to_string()
            }
            .event_type_name(),
            "thinking"
        );
    }

    #[test]
    fn test_only_done_is_terminal() {
        assert!(SseEvent::Done {
            message_id: Some("m1".to_string()),
            tokens_used: Some(3)
        }
        .is_terminal());
        assert!(!SseEvent::Error {
            code: None,
            message: "boom".to_string()
        }
        .is_terminal());
    }

    #[test]
    fn test_sse_parse_error_display() {
        let err = SseParseError::InvalidJson {
            event_type: "token".to_string(),
            source: "expected value".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Invalid JSON for event 'token': expected value"
        );

        let err = SseParseError::MissingData {
            event_type: "token".to_string(),
        };
        assert!(format!("{}", err).contains("Missing data"));
    }

    #[test]
    fn test_event_serializes_with_wire_field_names() {
        let event = SseEvent::ToolCallResult {
            tool_call_id: "call-1".to_string(),
            name: "search".to_string(),
            result_preview: "3 hits".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "tool_call_result");
        assert_eq!(json["toolCallId"], "call-1");
        assert_eq!(json["resultPreview"], "3 hits");
    }
}
