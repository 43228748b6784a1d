//! SSE frame parsing logic
//!
//! `parse_frames` is the entry point: it takes the reader's rolling text
//! buffer and returns every event found in complete (blank-line terminated)
//! frames, together with how many bytes of the buffer those frames covered.
//! It keeps no state between calls.

mod content;
mod lifecycle;
mod tools;

use serde::de::DeserializeOwned;

use crate::sse::events::{SseEvent, SseLine, SseParseError};

use content::{parse_thinking_event, parse_token_event};
use lifecycle::{parse_done_event, parse_error_event};
use tools::{parse_tool_call_result_event, parse_tool_call_start_event};

/// Blank line separating two frames.
pub const FRAME_DELIMITER: &str = "\n\n";

/// Result of one `parse_frames` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFrames {
    /// Events from complete frames, in frame order
    pub events: Vec<SseEvent>,
    /// Byte length of the buffer prefix resolved into frames
    pub consumed: usize,
    /// Recognized frames whose data could not be decoded, in frame order
    pub rejected: Vec<SseParseError>,
}

impl ParsedFrames {
    /// The unresolved suffix of `buffer` (an incomplete trailing frame).
    pub fn remainder<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.consumed..]
    }

    /// True when at least one complete frame was found, even if it produced
    /// no event (ping, unknown type, malformed data).
    pub fn consumed_any(&self) -> bool {
        self.consumed > 0
    }
}

/// Parse every complete frame in `buffer`.
///
/// Text after the last frame delimiter is an incomplete frame and is left
/// for the next call. Pings, unknown event types, frames missing an `event:`
/// or `data:` line and frames with malformed JSON produce no event; a bad
/// frame never affects its neighbours. Malformed frames are reported in
/// `rejected` for the caller to log.
pub fn parse_frames(buffer: &str) -> ParsedFrames {
    let Some(last_delimiter) = buffer.rfind(FRAME_DELIMITER) else {
        return ParsedFrames::default();
    };

    let mut events = Vec::new();
    let mut rejected = Vec::new();
    for segment in buffer[..last_delimiter].split(FRAME_DELIMITER) {
        match parse_frame(segment) {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {}
            Err(SseParseError::MissingData { event_type }) => {
                tracing::debug!(event_type = %event_type, "Skipping SSE frame without data line");
            }
            Err(e) => rejected.push(e),
        }
    }

    ParsedFrames {
        events,
        consumed: last_delimiter + FRAME_DELIMITER.len(),
        rejected,
    }
}

/// Parse one frame (the text between two delimiters) into an event.
///
/// Returns `Ok(None)` for frames that carry nothing actionable: no event
/// line, a ping, or an event name this client does not know.
pub fn parse_frame(segment: &str) -> Result<Option<SseEvent>, SseParseError> {
    let mut event_type: Option<String> = None;
    let mut data_lines: Vec<String> = Vec::new();

    for line in segment.split('\n') {
        match parse_sse_line(line) {
            SseLine::Event(name) => event_type = Some(name),
            SseLine::Data(data) => data_lines.push(data),
            SseLine::Empty | SseLine::Comment(_) => {}
        }
    }

    let Some(event_type) = event_type else {
        return Ok(None);
    };
    if data_lines.is_empty() {
        if is_known_event_type(&event_type) {
            return Err(SseParseError::MissingData { event_type });
        }
        return Ok(None);
    }

    parse_sse_event(&event_type, &data_lines.join("\n"))
}

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    let line = line.trim_end_matches('\r');
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    // Unknown line format - treat as comment
    SseLine::Comment(line.to_string())
}

/// Parse SSE event type and data into a typed SseEvent.
///
/// `Ok(None)` means the frame is deliberately ignored (ping or an event
/// type added to the server after this client was built).
pub fn parse_sse_event(event_type: &str, data: &str) -> Result<Option<SseEvent>, SseParseError> {
    let event = match event_type {
        "token" => parse_token_event(event_type, data)?,
        "tool_call_start" => parse_tool_call_start_event(event_type, data)?,
        "tool_call_result" => parse_tool_call_result_event(event_type, data)?,
        "thinking" => parse_thinking_event(event_type, data)?,
        "done" => parse_done_event(event_type, data)?,
        "error" => parse_error_event(event_type, data)?,
        "ping" => return Ok(None),
        other => {
            tracing::debug!(event_type = %other, "Ignoring unknown SSE event type");
            return Ok(None);
        }
    };
    Ok(Some(event))
}

fn is_known_event_type(event_type: &str) -> bool {
    matches!(
        event_type,
        "token" | "tool_call_start" | "tool_call_result" | "thinking" | "done" | "error"
    )
}

/// Deserialize a data payload, tagging failures with the event name.
pub(super) fn decode_payload<T: DeserializeOwned>(
    event_type: &str,
    data: &str,
) -> Result<T, SseParseError> {
    serde_json::from_str(data).map_err(|e| SseParseError::InvalidJson {
        event_type: event_type.to_string(),
        source: e.to_string(),
    })
}
