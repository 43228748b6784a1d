//! Tool-related event parsers

use crate::sse::events::{SseEvent, SseParseError};
use crate::sse::payloads::{ToolCallResultPayload, ToolCallStartPayload};

use super::decode_payload;

/// Parse tool_call_start event
pub(super) fn parse_tool_call_start_event(
    event_type: &str,
    data: &str,
) -> Result<SseEvent, SseParseError> {
    let payload: ToolCallStartPayload = decode_payload(event_type, data)?;
    Ok(SseEvent::ToolCallStart {
        tool_call_id: payload.tool_call_id,
        name: payload.name,
        arguments: payload.arguments,
    })
}

/// Parse tool_call_result event
pub(super) fn parse_tool_call_result_event(
    event_type: &str,
    data: &str,
) -> Result<SseEvent, SseParseError> {
    let payload: ToolCallResultPayload = decode_payload(event_type, data)?;
    Ok(SseEvent::ToolCallResult {
        tool_call_id: payload.tool_call_id,
        name: payload.name,
        result_preview: payload.result_preview.unwrap_or_default(),
    })
}
