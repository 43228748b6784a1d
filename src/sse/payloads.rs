//! SSE payload deserialization structs
//!
//! Internal structs used to deserialize the JSON carried on `data:` lines.
//! Field names follow the server's camelCase wire format.

use serde::Deserialize;

/// token payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenPayload {
    pub content: String,
}

/// tool_call_start payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ToolCallStartPayload {
    pub tool_call_id: String,
    pub name: String,
    /// Servers send either an object or a JSON-encoded string here
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// tool_call_result payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ToolCallResultPayload {
    pub tool_call_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub result_preview: Option<String>,
}

/// thinking payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ThinkingPayload {
    pub message: String,
}

/// done payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DonePayload {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub tokens_used: Option<u64>,
}

/// error payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorPayload {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}
