//! Text-bearing event parsers

use crate::sse::events::{SseEvent, SseParseError};
use crate::sse::payloads::{ThinkingPayload, TokenPayload};

use super::decode_payload;

/// Parse token event
pub(super) fn parse_token_event(event_type: &str, data: &str) -> Result<SseEvent, SseParseError> {
    let payload: TokenPayload = decode_payload(event_type, data)?;
    Ok(SseEvent::Token {
        content: payload.content,
    })
}

/// Parse thinking event
pub(super) fn parse_thinking_event(
    event_type: &str,
    data: &str,
) -> Result<SseEvent, SseParseError> {
    let payload: ThinkingPayload = decode_payload(event_type, data)?;
    Ok(SseEvent::Thinking {
        message: payload.message,
    })
}
