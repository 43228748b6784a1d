//! The stream reader loop.
//!
//! `StreamReader` owns the rolling text buffer and the UTF-8 decoder; each
//! chunk goes in, complete events come out, and whatever is left is the
//! start of a frame still in flight. `read_stream` drives a reader from an
//! async byte stream and hands every event, in order, to an [`EventSink`].

use std::ops::ControlFlow;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use super::decoder::Utf8Decoder;
use crate::error::{ChatError, StreamError};
use crate::sse::{parse_frames, SseEvent};
use crate::traits::HttpError;

/// Consumer of parsed events.
///
/// Returning `ControlFlow::Break` stops the loop after this event.
pub trait EventSink {
    fn on_event(&mut self, event: SseEvent) -> ControlFlow<()>;
}

impl<F> EventSink for F
where
    F: FnMut(SseEvent) -> ControlFlow<()>,
{
    fn on_event(&mut self, event: SseEvent) -> ControlFlow<()> {
        self(event)
    }
}

/// How a read loop ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The byte stream ended
    Completed,
    /// The sink asked to stop (the server's `done` event)
    Stopped,
    /// The caller cancelled the read
    Cancelled,
}

/// Incremental frame reader with an explicit rolling buffer.
#[derive(Debug, Default)]
pub struct StreamReader {
    decoder: Utf8Decoder,
    buffer: String,
    malformed_frames: usize,
}

impl StreamReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of bytes and return the events it completed.
    ///
    /// The buffer is trimmed past the last complete frame whenever one was
    /// found; an incomplete trailing frame stays buffered untouched. Frames
    /// with undecodable data are logged, counted and skipped.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        let text = self.decoder.decode(chunk);
        if text.is_empty() {
            return Vec::new();
        }
        self.buffer.push_str(&text);

        let parsed = parse_frames(&self.buffer);
        if parsed.consumed_any() {
            self.buffer.drain(..parsed.consumed);
        }
        for rejected in parsed.rejected {
            let err = ChatError::from(rejected);
            tracing::warn!(
                code = err.error_code(),
                error = %err,
                "Skipping malformed SSE frame"
            );
            self.malformed_frames += 1;
        }
        parsed.events
    }

    /// Frames skipped so far because their data could not be decoded.
    pub fn malformed_frames(&self) -> usize {
        self.malformed_frames
    }

    /// Text received but not yet resolved into a complete frame.
    pub fn remainder(&self) -> &str {
        &self.buffer
    }

    /// End of input: returns any unterminated frame text and resets.
    pub fn finish(&mut self) -> Option<String> {
        self.buffer.push_str(&self.decoder.finish());
        if self.buffer.trim().is_empty() {
            self.buffer.clear();
            return None;
        }
        Some(std::mem::take(&mut self.buffer))
    }
}

/// Read `stream` to completion, applying every event to `sink` in order.
///
/// Ends with `Completed` when the stream is exhausted, `Stopped` when the
/// sink breaks, or `Cancelled` when `cancel` fires. A failed chunk read ends
/// the loop with `StreamError::Read`; events already applied stay applied.
pub async fn read_stream<S, K>(
    mut stream: S,
    sink: &mut K,
    cancel: &CancellationToken,
) -> Result<ReadOutcome, StreamError>
where
    S: Stream<Item = Result<Bytes, HttpError>> + Unpin,
    K: EventSink + ?Sized,
{
    let mut reader = StreamReader::new();
    let mut bytes_read = 0usize;
    let mut events_applied = 0usize;

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(bytes_read, events_applied, "Stream read cancelled");
                return Ok(ReadOutcome::Cancelled);
            }
            next = stream.next() => next,
        };

        let chunk = match next {
            Some(Ok(chunk)) => chunk,
            Some(Err(e)) => {
                let err = StreamError::from(e);
                tracing::warn!(
                    code = err.error_code(),
                    error = %err,
                    bytes_read,
                    events_applied,
                    "Stream read failed"
                );
                return Err(err);
            }
            None => break,
        };
        bytes_read += chunk.len();

        let mut events = reader.feed(&chunk).into_iter();
        while let Some(event) = events.next() {
            tracing::trace!(event_type = event.event_type_name(), "Applying SSE event");
            events_applied += 1;
            if sink.on_event(event).is_break() {
                let discarded = events.count();
                if discarded > 0 {
                    tracing::debug!(discarded, "Discarding events received after stop");
                }
                tracing::debug!(bytes_read, events_applied, "Stream read stopped by sink");
                return Ok(ReadOutcome::Stopped);
            }
        }
    }

    if let Some(rest) = reader.finish() {
        tracing::debug!(bytes = rest.len(), "Dropping unterminated frame at end of stream");
    }
    tracing::debug!(
        bytes_read,
        events_applied,
        malformed_frames = reader.malformed_frames(),
        "Stream ended"
    );
    Ok(ReadOutcome::Completed)
}
