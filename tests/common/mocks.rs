//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock transport from `chatstream::adapters::mock`
//! and provides a builder for scripted SSE wire text.

pub use chatstream::adapters::mock::{sse_frame, MockResponse, MockTransport, RecordedRequest};
pub use chatstream::traits::HttpError;

use serde_json::json;

/// Builder for SSE wire text as the backend would send it.
#[derive(Debug, Default)]
pub struct SseScript {
    wire: String,
}

#[allow(dead_code)]
impl SseScript {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a raw frame.
    pub fn frame(mut self, event: &str, data: &str) -> Self {
        self.wire.push_str(&sse_frame(event, data));
        self
    }

    pub fn token(self, content: &str) -> Self {
        let data = json!({ "content": content }).to_string();
        self.frame("token", &data)
    }

    pub fn thinking(self, message: &str) -> Self {
        let data = json!({ "message": message }).to_string();
        self.frame("thinking", &data)
    }

    pub fn ping(self) -> Self {
        self.frame("ping", "{}")
    }

    pub fn tool_start(self, id: &str, name: &str, arguments: serde_json::Value) -> Self {
        let data = json!({ "toolCallId": id, "name": name, "arguments": arguments }).to_string();
        self.frame("tool_call_start", &data)
    }

    pub fn tool_result(self, id: &str, name: &str, preview: &str) -> Self {
        let data = json!({ "toolCallId": id, "name": name, "resultPreview": preview }).to_string();
        self.frame("tool_call_result", &data)
    }

    pub fn error(self, code: &str, message: &str) -> Self {
        let data = json!({ "code": code, "message": message }).to_string();
        self.frame("error", &data)
    }

    pub fn done(self, message_id: Option<&str>, tokens_used: Option<u64>) -> Self {
        let mut data = serde_json::Map::new();
        if let Some(id) = message_id {
            data.insert("messageId".to_string(), json!(id));
        }
        if let Some(tokens) = tokens_used {
            data.insert("tokensUsed".to_string(), json!(tokens));
        }
        let data = serde_json::Value::Object(data).to_string();
        self.frame("done", &data)
    }

    /// Appends text verbatim (partial frames, junk).
    pub fn raw(mut self, text: &str) -> Self {
        self.wire.push_str(text);
        self
    }

    pub fn build(self) -> String {
        self.wire
    }
}
