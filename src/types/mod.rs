//! Canonical, vendor-neutral message model.
//!
//! Everything here is plain serde-derived data with structural equality.
//! Construction validates the invariants the wire codecs rely on; once
//! built, a message is immutable and safe to share across threads.

mod content;
mod message;
mod tools;

pub use content::ContentPart;
pub use message::{AssistantContent, ChatMessage, MessageRole, UserContent};
pub use tools::{ToolCall, ToolResult};
