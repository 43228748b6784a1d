//! Mock implementations for testing.
//!
//! - [`MockTransport`] - chat transport with scripted responses

pub mod transport;

pub use transport::{sse_frame, MockResponse, MockTransport, RecordedRequest};
