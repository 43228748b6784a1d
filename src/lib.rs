//! Chatstream - client-side core for streaming AI chat replies over SSE
//!
//! This library exposes modules for use in integration tests and by the
//! `chatstream` binary.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod sse;
pub mod state;
pub mod stream;
pub mod traits;
