//! Frame parser and stream reader properties.

mod common;

use std::ops::ControlFlow;

use bytes::Bytes;
use chatstream::sse::{parse_frames, SseEvent};
use chatstream::stream::{read_stream, ReadOutcome, StreamReader};
use common::{split_every, HttpError, SseScript};
use tokio_util::sync::CancellationToken;

fn token(content: &str) -> SseEvent {
    SseEvent::Token {
        content: content.to_string(),
    }
}

#[test]
fn test_two_frames_in_one_chunk() {
    let buffer = "event: token\ndata: {\"content\":\"A\"}\n\nevent: token\ndata: {\"content\":\"B\"}\n\n";
    let parsed = parse_frames(buffer);
    assert_eq!(parsed.events, vec![token("A"), token("B")]);
    assert_eq!(parsed.remainder(buffer), "");
}

#[test]
fn test_chunk_ending_mid_frame_yields_nothing() {
    let buffer = "event: token\ndata: {\"content\":\"partial\"}";
    let parsed = parse_frames(buffer);
    assert!(parsed.events.is_empty());
    assert_eq!(parsed.consumed, 0);
    assert_eq!(parsed.remainder(buffer), buffer);
}

#[test]
fn test_ping_yields_nothing() {
    assert!(parse_frames("event: ping\ndata: {}\n\n").events.is_empty());
}

#[test]
fn test_parser_is_pure() {
    let buffer = SseScript::new()
        .token("x")
        .thinking("hmm")
        .raw("event: tok")
        .build();
    let first = parse_frames(&buffer);
    let second = parse_frames(&buffer);
    assert_eq!(first, second);
    assert_eq!(first.remainder(&buffer), "event: tok");
}

#[test]
fn test_reader_matches_whole_buffer_parse_at_any_chunking() {
    let wire = SseScript::new()
        .token("naïve ")
        .tool_start("t1", "search", serde_json::json!({"q": "✓"}))
        .ping()
        .tool_result("t1", "search", "ok")
        .token("café")
        .done(Some("m1"), Some(4))
        .build();
    let expected = parse_frames(&wire).events;
    assert_eq!(expected.len(), 5);

    for size in 1..=wire.len() {
        let mut reader = StreamReader::new();
        let mut events = Vec::new();
        for chunk in split_every(&wire, size) {
            events.extend(reader.feed(&chunk));
        }
        assert_eq!(events, expected, "chunk size {}", size);
        assert_eq!(reader.remainder(), "");
    }
}

#[test]
fn test_reader_never_truncates_without_delimiter() {
    let mut reader = StreamReader::new();
    reader.feed(b"event: token\n");
    reader.feed(b"data: {\"content\":");
    assert_eq!(reader.remainder(), "event: token\ndata: {\"content\":");
}

#[tokio::test]
async fn test_read_stream_concatenates_tokens_in_order() {
    let wire = SseScript::new()
        .token("one ")
        .token("two ")
        .token("three")
        .build();
    let body = futures::stream::iter(
        split_every(&wire, 5)
            .into_iter()
            .map(Ok::<Bytes, HttpError>),
    );

    let mut assembled = String::new();
    let mut sink = |event: SseEvent| {
        if let SseEvent::Token { content } = event {
            assembled.push_str(&content);
        }
        ControlFlow::Continue(())
    };
    let outcome = read_stream(body, &mut sink, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, ReadOutcome::Completed);
    assert_eq!(assembled, "one two three");
}
