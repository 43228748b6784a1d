//! Incremental byte-stream reading.
//!
//! - `decoder` - UTF-8 decoding that survives characters split across chunks
//! - `reader` - rolling buffer, frame extraction and the async read loop

mod decoder;
mod reader;

pub use decoder::Utf8Decoder;
pub use reader::{read_stream, EventSink, ReadOutcome, StreamReader};
