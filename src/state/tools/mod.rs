//! Tool execution state tracking
//!
//! - `tool_call` - ToolCallState and ToolTracker for tool call management
//!
//! The tracker holds ephemeral state that is cleared at the start of each
//! send.

mod tool_call;

pub use tool_call::{ToolCallState, ToolCallStatus, ToolTracker};
