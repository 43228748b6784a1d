//! Stream lifecycle event parsers (done, error)

use crate::sse::events::{SseEvent, SseParseError};
use crate::sse::payloads::{DonePayload, ErrorPayload};

use super::decode_payload;

/// Parse done event
pub(super) fn parse_done_event(event_type: &str, data: &str) -> Result<SseEvent, SseParseError> {
    let payload: DonePayload = decode_payload(event_type, data)?;
    Ok(SseEvent::Done {
        message_id: payload.message_id,
        tokens_used: payload.tokens_used,
    })
}

/// Parse error event
pub(super) fn parse_error_event(event_type: &str, data: &str) -> Result<SseEvent, SseParseError> {
    let payload: ErrorPayload = decode_payload(event_type, data)?;
    Ok(SseEvent::Error {
        code: payload.code,
        message: payload.message,
    })
}

#[cfg(test)]
mod tests {
    use crate::sse::events::SseEvent;
    use crate::sse::parser::parse_sse_event;

    #[test]
    fn test_parse_done_event() {
        let result = parse_sse_event("done", r#"{"messageId": "m1", "tokensUsed": 10}"#);
        assert_eq!(
            result.unwrap(),
            Some(SseEvent::Done {
                message_id: Some("m1".to_string()),
                tokens_used: Some(10),
            })
        );
    }

    #[test]
    fn test_parse_done_event_empty_payload() {
        let result = parse_sse_event("done", "{}");
        assert_eq!(
            result.unwrap(),
            Some(SseEvent::Done {
                message_id: None,
                tokens_used: None,
            })
        );
    }

    #[test]
    fn test_parse_error_event() {
        let result = parse_sse_event(
            "error",
            r#"{"code": "llm_error", "message": "Service unavailable"}"#,
        );
        assert_eq!(
            result.unwrap(),
            Some(SseEvent::Error {
                code: Some("llm_error".to_string()),
                message: "Service unavailable".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_error_event_requires_message() {
        assert!(parse_sse_event("error", r#"{"code": "x"}"#).is_err());
    }
}
