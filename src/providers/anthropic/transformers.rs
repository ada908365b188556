//! Conversions between the canonical model and the Anthropic wire schema.
//!
//! Argument-serialization convention: tool-call arguments travel as a
//! structured object (`tool_use.input`). Tool results fan in to one
//! `role:"user"` message carrying one `tool_result` block per result,
//! correlated via `tool_use_id`. System messages land in the top-level
//! `system` field, which only exists at the head of a request.

use serde_json::json;

use super::types::{AnthropicMessage, MessagesRequestBody, MessagesResponseBody};
use crate::error::CodecError;
use crate::types::{AssistantContent, ChatMessage, ContentPart, ToolCall, UserContent};

/// Image MIME types the Anthropic Messages API accepts.
const SUPPORTED_IMAGE_MIME: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Convert a canonical history into the `/v1/messages` request fragment.
pub fn convert_messages(history: &[ChatMessage]) -> Result<MessagesRequestBody, CodecError> {
    let mut messages = Vec::new();
    let mut system_blocks: Vec<serde_json::Value> = Vec::new();
    let mut system_phase = true;

    for message in history {
        match message {
            ChatMessage::System { content } => {
                if !system_phase {
                    return Err(CodecError::UnsupportedContentType {
                        provider: "anthropic",
                        detail: "system message after the start of the conversation".to_string(),
                    });
                }
                if !content.trim().is_empty() {
                    system_blocks.push(json!({ "type": "text", "text": content }));
                }
            }
            ChatMessage::User { content } => {
                system_phase = false;
                messages.push(AnthropicMessage {
                    role: "user".to_string(),
                    content: convert_user_content(content)?,
                });
            }
            ChatMessage::Assistant { content } => {
                system_phase = false;
                messages.push(AnthropicMessage {
                    role: "assistant".to_string(),
                    content: convert_assistant_content(content),
                });
            }
            ChatMessage::Tool { results } => {
                system_phase = false;
                // One user message carrying one tool_result block per
                // result.
                let blocks: Vec<serde_json::Value> = results
                    .iter()
                    .map(|result| {
                        json!({
                            "type": "tool_result",
                            "tool_use_id": result.tool_call_id,
                            "content": result.content,
                            "is_error": false
                        })
                    })
                    .collect();
                messages.push(AnthropicMessage {
                    role: "user".to_string(),
                    content: serde_json::Value::Array(blocks),
                });
            }
        }
    }

    let system = if system_blocks.is_empty() {
        None
    } else if system_blocks.len() == 1 {
        // A lone system message keeps the plain-string form.
        system_blocks[0].get("text").cloned()
    } else {
        Some(serde_json::Value::Array(system_blocks))
    };

    Ok(MessagesRequestBody { system, messages })
}

fn convert_user_content(content: &UserContent) -> Result<serde_json::Value, CodecError> {
    match content {
        UserContent::Text(text) => Ok(serde_json::Value::Array(vec![json!({
            "type": "text",
            "text": text
        })])),
        UserContent::Parts(parts) => {
            let mut blocks = Vec::with_capacity(parts.len());
            for part in parts {
                match part {
                    ContentPart::Text { text } => {
                        blocks.push(json!({ "type": "text", "text": text }));
                    }
                    ContentPart::Image { mime, data } => {
                        if !SUPPORTED_IMAGE_MIME.contains(&mime.as_str()) {
                            return Err(CodecError::UnsupportedContentType {
                                provider: "anthropic",
                                detail: format!("image MIME type `{mime}`"),
                            });
                        }
                        blocks.push(json!({
                            "type": "image",
                            "source": {
                                "type": "base64",
                                "media_type": mime,
                                "data": data
                            }
                        }));
                    }
                }
            }
            Ok(serde_json::Value::Array(blocks))
        }
    }
}

fn convert_assistant_content(content: &AssistantContent) -> serde_json::Value {
    match content {
        AssistantContent::Text(text) => {
            serde_json::Value::Array(vec![json!({ "type": "text", "text": text })])
        }
        AssistantContent::ToolCalls(calls) => serde_json::Value::Array(
            calls
                .iter()
                .map(|call| {
                    json!({
                        "type": "tool_use",
                        "id": call.id,
                        "name": call.name,
                        "input": call.arguments
                    })
                })
                .collect(),
        ),
    }
}

/// Decode a `/v1/messages` response into one assistant message.
pub fn convert_response(body: &serde_json::Value) -> Result<ChatMessage, CodecError> {
    let response: MessagesResponseBody = serde_json::from_value(body.clone())
        .map_err(|e| CodecError::ParseError(format!("invalid Anthropic response: {e}")))?;

    let mut text = String::new();
    let mut calls = Vec::new();

    for block in response.content {
        match block.r#type.as_str() {
            "text" => {
                if let Some(chunk) = block.text {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(&chunk);
                }
            }
            "tool_use" => {
                let id = block.id.ok_or_else(|| {
                    CodecError::ParseError("tool_use block missing id".to_string())
                })?;
                let name = block.name.ok_or_else(|| {
                    CodecError::ParseError(format!("tool_use block `{id}` missing name"))
                })?;
                let input = match block.input {
                    Some(input) if input.is_object() => input,
                    Some(other) => {
                        return Err(CodecError::MalformedToolArguments {
                            id,
                            reason: format!("tool_use input is not a JSON object: {other}"),
                        });
                    }
                    None => {
                        return Err(CodecError::MalformedToolArguments {
                            id,
                            reason: "tool_use block missing input".to_string(),
                        });
                    }
                };
                calls.push(ToolCall::new(id, name, input)?);
            }
            // Thinking and other block kinds carry no canonical content.
            _ => {}
        }
    }

    if calls.is_empty() {
        Ok(ChatMessage::assistant(text))
    } else {
        ChatMessage::assistant_tool_calls(calls)
    }
}
