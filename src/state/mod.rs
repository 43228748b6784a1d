//! State containers updated by the session's event path.
//!
//! - ToolTracker: per-send ephemeral tool execution states

pub mod tools;

pub use tools::{ToolCallState, ToolCallStatus, ToolTracker};
