//! Canonical chat message types.
//!
//! One closed sum type per conversation turn, tagged by role. Every
//! consumption site matches exhaustively, so adding a role is a
//! compile-time event, not a runtime surprise.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::content::ContentPart;
use super::tools::{ToolCall, ToolResult};
use crate::error::CodecError;

/// Message role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    System,
    Assistant,
    Tool,
}

/// User message content: plain text or an ordered sequence of parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// Assistant message content: text XOR a nonempty sequence of tool calls.
///
/// The mutual exclusion is carried by the sum type itself; no vendor's
/// native shape is trusted to guarantee it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AssistantContent {
    Text(String),
    ToolCalls(Vec<ToolCall>),
}

/// A canonical conversation turn.
///
/// A history is an ordered `&[ChatMessage]` owned by the conversation
/// session; messages are immutable once appended.
///
/// ```rust
/// use chatwire::types::{ChatMessage, ToolCall};
/// use serde_json::json;
///
/// let question = ChatMessage::user("What's the weather in Boston?");
/// let call = ToolCall::new("c1", "get_weather", json!({"city": "Boston"}))?;
/// let turn = ChatMessage::assistant_tool_calls(vec![call])?;
/// assert!(turn.has_tool_calls());
/// # Ok::<(), chatwire::CodecError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    User { content: UserContent },
    System { content: String },
    Assistant { content: AssistantContent },
    Tool { results: Vec<ToolResult> },
}

impl ChatMessage {
    /// Creates a user message from plain text.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: UserContent::Text(content.into()),
        }
    }

    /// Creates a user message from an ordered sequence of content parts.
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self::User {
            content: UserContent::Parts(parts),
        }
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    /// Creates a text-only assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: AssistantContent::Text(content.into()),
        }
    }

    /// Creates a tool-calling assistant message.
    ///
    /// Fails with [`CodecError::MalformedToolCall`] when `calls` is empty
    /// or two calls share an id within the turn.
    pub fn assistant_tool_calls(calls: Vec<ToolCall>) -> Result<Self, CodecError> {
        if calls.is_empty() {
            return Err(CodecError::MalformedToolCall(
                "assistant message requires at least one tool call".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for call in &calls {
            if !seen.insert(call.id.as_str()) {
                return Err(CodecError::MalformedToolCall(format!(
                    "duplicate tool call id `{}` within one assistant turn",
                    call.id
                )));
            }
        }
        Ok(Self::Assistant {
            content: AssistantContent::ToolCalls(calls),
        })
    }

    /// Creates a tool-result message. Reference and coverage invariants
    /// are checked against the surrounding history by
    /// [`crate::validation::validate`], not here.
    pub fn tool_results(results: Vec<ToolResult>) -> Self {
        Self::Tool { results }
    }

    /// Role of this message.
    pub fn role(&self) -> MessageRole {
        match self {
            Self::User { .. } => MessageRole::User,
            Self::System { .. } => MessageRole::System,
            Self::Assistant { .. } => MessageRole::Assistant,
            Self::Tool { .. } => MessageRole::Tool,
        }
    }

    /// Gets the text content of the message, if any. For multipart user
    /// content this is the first text part.
    pub fn content_text(&self) -> Option<&str> {
        match self {
            Self::User {
                content: UserContent::Text(text),
            } => Some(text),
            Self::User {
                content: UserContent::Parts(parts),
            } => parts.iter().find_map(ContentPart::as_text),
            Self::System { content } => Some(content),
            Self::Assistant {
                content: AssistantContent::Text(text),
            } => Some(text),
            Self::Assistant {
                content: AssistantContent::ToolCalls(_),
            } => None,
            Self::Tool { .. } => None,
        }
    }

    /// Tool calls issued by this message (empty unless a tool-calling
    /// assistant turn).
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Self::Assistant {
                content: AssistantContent::ToolCalls(calls),
            } => calls,
            _ => &[],
        }
    }

    /// Check if this message issues tool calls.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls().is_empty()
    }
}
