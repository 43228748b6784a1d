//! SSE (Server-Sent Events) frame parser
//!
//! Parses the text/event-stream format the chat message endpoint emits.
//! Each frame looks like:
//! - `event: <type>` - event type line
//! - `data: <json>` - data payload line
//! - Empty line - ends the frame
//! - Lines starting with `:` - comments (ignored)
//!
//! # Module structure
//! - `events` - Event type definitions (SseEvent enum, SseLine, SseParseError)
//! - `payloads` - Internal payload deserialization structs
//! - `parser` - Parsing logic (parse_frames, parse_frame, parse_sse_line, parse_sse_event)

mod events;
mod parser;
mod payloads;

// Re-export public types
pub use events::{SseEvent, SseLine, SseParseError};
pub use parser::{
    parse_frame, parse_frames, parse_sse_event, parse_sse_line, ParsedFrames, FRAME_DELIMITER,
};
