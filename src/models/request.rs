use serde::{Deserialize, Serialize};

/// Body of `POST /api/conversations/{id}/messages`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// The user's message
    pub content: String,
    /// Lets the assistant run tools that modify data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_write_operations: Option<bool>,
}

impl SendMessageRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            allow_write_operations: None,
        }
    }

    /// Set the write-operations flag. `false` is sent explicitly.
    pub fn with_write_operations(mut self, allow: bool) -> Self {
        self.allow_write_operations = Some(allow);
        self
    }
}
