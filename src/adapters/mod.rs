//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestTransport`] - chat transport using reqwest
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides a scripted [`mock::MockTransport`] used by
//! the unit and integration tests.

pub mod mock;
pub mod reqwest_transport;

pub use mock::{MockResponse, MockTransport};
pub use reqwest_transport::ReqwestTransport;
