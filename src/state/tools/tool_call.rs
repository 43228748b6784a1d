//! Tool call state and tracking
//!
//! ToolCallState represents a single tool invocation made by the assistant
//! while it streams a reply. ToolTracker keeps those invocations for the
//! current send, in the order they first started.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Status of a tool call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ToolCallStatus {
    /// Tool is currently running
    #[default]
    Running,
    /// Tool completed and reported a result
    Completed,
    /// Tool failed or was abandoned
    Error,
}

/// State of a single tool call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallState {
    /// Server-assigned tool call id
    pub id: String,
    /// Name of the tool being executed
    pub name: String,
    /// Status of the tool call
    pub status: ToolCallStatus,
    /// Arguments as sent by the server, never validated
    pub arguments: serde_json::Value,
    /// Short preview of the tool's output (populated on completion)
    pub result_preview: Option<String>,
    /// Error message if the tool failed
    pub error_message: Option<String>,
}

impl ToolCallState {
    /// Create a running tool call state
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: ToolCallStatus::Running,
            arguments,
            result_preview: None,
            error_message: None,
        }
    }

    /// Mark the tool as completed with a result preview
    pub fn complete(&mut self, preview: String) {
        self.status = ToolCallStatus::Completed;
        self.result_preview = Some(preview);
        self.error_message = None;
    }

    /// Mark the tool as failed with error
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = ToolCallStatus::Error;
        self.error_message = Some(message.into());
    }

    pub fn is_running(&self) -> bool {
        self.status == ToolCallStatus::Running
    }

    /// Check if the tool has finished (completed or failed)
    pub fn is_finished(&self) -> bool {
        matches!(
            self.status,
            ToolCallStatus::Completed | ToolCallStatus::Error
        )
    }
}

/// Tracks tool calls for the current send
///
/// Entries are keyed by tool call id and iterate in first-start order. A
/// repeated start for the same id replaces the entry in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolTracker {
    tools: Vec<ToolCallState>,
    index: HashMap<String, usize>,
}

impl ToolTracker {
    /// Create a new empty ToolTracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a running tool call.
    ///
    /// A duplicate id overwrites the existing entry but keeps its position.
    pub fn start(&mut self, id: &str, name: &str, arguments: serde_json::Value) {
        let state = ToolCallState::new(id, name, arguments);
        match self.index.get(id) {
            Some(&position) => {
                tracing::debug!(tool_call_id = id, "Duplicate tool call start, replacing entry");
                self.tools[position] = state;
            }
            None => {
                self.index.insert(id.to_string(), self.tools.len());
                self.tools.push(state);
            }
        }
    }

    /// Record a tool result.
    ///
    /// A result with no matching start gets a synthesized Completed entry.
    pub fn complete(&mut self, id: &str, name: &str, preview: String) {
        if let Some(state) = self.get_mut(id) {
            state.complete(preview);
            return;
        }

        tracing::debug!(
            tool_call_id = id,
            tool = name,
            "Tool result without start, synthesizing entry"
        );
        let mut state = ToolCallState::new(id, name, serde_json::Value::Null);
        state.complete(preview);
        self.index.insert(id.to_string(), self.tools.len());
        self.tools.push(state);
    }

    /// Fail one tool call. Returns false if the id is unknown.
    pub fn fail(&mut self, id: &str, message: &str) -> bool {
        match self.get_mut(id) {
            Some(state) => {
                state.fail(message);
                true
            }
            None => false,
        }
    }

    /// Fail every tool call still running; returns how many were failed.
    pub fn fail_running(&mut self, message: &str) -> usize {
        let mut failed = 0;
        for state in self.tools.iter_mut().filter(|s| s.is_running()) {
            state.fail(message);
            failed += 1;
        }
        failed
    }

    /// Get a tool call state by ID
    pub fn get(&self, id: &str) -> Option<&ToolCallState> {
        self.index.get(id).map(|&position| &self.tools[position])
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut ToolCallState> {
        let position = *self.index.get(id)?;
        self.tools.get_mut(position)
    }

    /// Iterate tool calls in first-start order
    pub fn iter(&self) -> impl Iterator<Item = &ToolCallState> {
        self.tools.iter()
    }

    /// Owned copy of all entries, in order
    pub fn to_vec(&self) -> Vec<ToolCallState> {
        self.tools.clone()
    }

    pub fn running_count(&self) -> usize {
        self.tools.iter().filter(|s| s.is_running()).count()
    }

    pub fn has_running(&self) -> bool {
        self.tools.iter().any(|s| s.is_running())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Drop all tracked tools (called at the start of each send)
    pub fn clear(&mut self) {
        self.tools.clear();
        self.index.clear();
    }
}
