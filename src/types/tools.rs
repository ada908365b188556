//! Tool call and tool result value types.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// A structured function invocation proposed by an assistant turn.
///
/// `arguments` stays a vendor-neutral [`serde_json::Value`]; each adapter
/// applies its own vendor's argument-serialization convention (JSON-text
/// string vs. structured object) at the wire boundary. Every supported
/// vendor requires a JSON object at the top level, so construction does
/// too.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// Id correlating this call with its result. Unique within the
    /// assistant turn that produced it.
    pub id: String,
    /// Tool/function name.
    pub name: String,
    /// Arguments as an opaque structured value.
    pub arguments: serde_json::Value,
}

impl ToolCall {
    /// Build a tool call, rejecting empty `id` or `name`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: serde_json::Value,
    ) -> Result<Self, CodecError> {
        let id = id.into();
        let name = name.into();
        if id.is_empty() {
            return Err(CodecError::MalformedToolCall(
                "tool call id is empty".to_string(),
            ));
        }
        if name.is_empty() {
            return Err(CodecError::MalformedToolCall(format!(
                "tool call `{id}` has an empty name"
            )));
        }
        if !arguments.is_object() {
            return Err(CodecError::MalformedToolCall(format!(
                "tool call `{id}` arguments must be a JSON object"
            )));
        }
        Ok(Self {
            id,
            name,
            arguments,
        })
    }
}

/// The resolved output of a tool call, correlated by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolResult {
    /// Id of the tool call this result resolves.
    pub tool_call_id: String,
    /// Result payload as text.
    pub content: String,
}

impl ToolResult {
    /// Build a tool result, rejecting an empty `tool_call_id`.
    pub fn new(
        tool_call_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, CodecError> {
        let tool_call_id = tool_call_id.into();
        if tool_call_id.is_empty() {
            return Err(CodecError::MalformedToolCall(
                "tool result references an empty call id".to_string(),
            ));
        }
        Ok(Self {
            tool_call_id,
            content: content.into(),
        })
    }
}
