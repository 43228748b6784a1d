//! Conversation data types shared by the session and the transport.

mod message;
mod request;

pub use message::{ChatMessage, MessageRole};
pub use request::SendMessageRequest;
