//! Common test utilities for integration tests.
//!
//! This module provides wire-script builders, scripted sessions and chunking
//! helpers shared by the integration tests.
//!
//! # Example
//!
//! ```ignore
//! use common::{scripted_session, SseScript};
//!
//! let wire = SseScript::new().token("Hello").done(Some("m1"), None).build();
//! let (mut session, transport) = scripted_session(vec![MockResponse::chunks([wire])]);
//! ```

pub mod mocks;

pub use mocks::*;

use bytes::Bytes;
use std::sync::Arc;

use chatstream::session::ChatSession;

/// Creates a session backed by a mock transport answering with `responses`.
///
/// The transport is returned too, for request inspection.
#[allow(dead_code)]
pub fn scripted_session(responses: Vec<MockResponse>) -> (ChatSession, MockTransport) {
    let transport = MockTransport::new();
    for response in responses {
        transport.push_response(response);
    }
    let session = ChatSession::new(Arc::new(transport.clone()));
    (session, transport)
}

/// Cuts `wire` into chunks of at most `size` bytes, ignoring char boundaries.
pub fn split_every(wire: &str, size: usize) -> Vec<Bytes> {
    wire.as_bytes()
        .chunks(size.max(1))
        .map(Bytes::copy_from_slice)
        .collect()
}

/// Cuts `wire` into two chunks at byte offset `at`.
#[allow(dead_code)]
pub fn split_at(wire: &str, at: usize) -> Vec<Bytes> {
    let bytes = wire.as_bytes();
    vec![
        Bytes::copy_from_slice(&bytes[..at]),
        Bytes::copy_from_slice(&bytes[at..]),
    ]
}
