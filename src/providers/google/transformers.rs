//! Conversions between the canonical model and the Gemini wire schema.
//!
//! Argument-serialization convention: function-call arguments travel as a
//! structured object (`functionCall.args`). Tool results fan in to one
//! `role:"user"` content carrying one `functionResponse` part per result;
//! the function name is resolved from the immediately preceding assistant
//! turn, which a validated history guarantees is present.

use std::collections::HashMap;

use serde_json::json;

use super::types::{
    Blob, Content, FunctionCall, FunctionResponse, GenerateContentRequest,
    GenerateContentResponse, Part,
};
use crate::error::CodecError;
use crate::types::{AssistantContent, ChatMessage, ContentPart, ToolCall, UserContent};

/// Image MIME types the Gemini API accepts.
const SUPPORTED_IMAGE_MIME: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/heic",
    "image/heif",
];

/// Build the `generateContent` request fragment from a canonical history.
pub fn build_request_body(history: &[ChatMessage]) -> Result<GenerateContentRequest, CodecError> {
    let mut contents = Vec::new();
    let mut system_texts: Vec<&str> = Vec::new();
    let mut system_phase = true;

    for (index, message) in history.iter().enumerate() {
        match message {
            ChatMessage::System { content } => {
                // Gemini has a single systemInstruction slot; a system turn
                // landing mid-conversation has no faithful wire position.
                if !system_phase {
                    return Err(CodecError::UnsupportedContentType {
                        provider: "google",
                        detail: "system message after the start of the conversation".to_string(),
                    });
                }
                if !content.trim().is_empty() {
                    system_texts.push(content);
                }
            }
            ChatMessage::User { content } => {
                system_phase = false;
                contents.push(Content {
                    role: Some("user".to_string()),
                    parts: convert_user_parts(content)?,
                });
            }
            ChatMessage::Assistant { content } => {
                system_phase = false;
                contents.push(Content {
                    role: Some("model".to_string()),
                    parts: convert_assistant_parts(content),
                });
            }
            ChatMessage::Tool { results } => {
                system_phase = false;
                let names = preceding_call_names(history, index);
                let mut parts = Vec::with_capacity(results.len());
                for result in results {
                    let name = names
                        .get(result.tool_call_id.as_str())
                        .copied()
                        .ok_or_else(|| CodecError::ToolResultMismatch {
                            id: result.tool_call_id.clone(),
                        })?;
                    parts.push(Part::FunctionResponse {
                        function_response: FunctionResponse {
                            id: Some(result.tool_call_id.clone()),
                            name: name.to_string(),
                            response: json!({ "name": name, "content": result.content }),
                        },
                    });
                }
                contents.push(Content {
                    role: Some("user".to_string()),
                    parts,
                });
            }
        }
    }

    let system_instruction = if system_texts.is_empty() {
        None
    } else {
        Some(Content {
            role: None,
            parts: vec![Part::Text {
                text: system_texts.join("\n\n"),
            }],
        })
    };

    Ok(GenerateContentRequest {
        contents,
        system_instruction,
    })
}

/// Call-id to function-name mapping from the assistant turn directly
/// before `index`.
fn preceding_call_names(history: &[ChatMessage], index: usize) -> HashMap<&str, &str> {
    let Some(ChatMessage::Assistant {
        content: AssistantContent::ToolCalls(calls),
    }) = index.checked_sub(1).map(|i| &history[i])
    else {
        return HashMap::new();
    };
    calls
        .iter()
        .map(|call| (call.id.as_str(), call.name.as_str()))
        .collect()
}

fn convert_user_parts(content: &UserContent) -> Result<Vec<Part>, CodecError> {
    match content {
        UserContent::Text(text) => Ok(vec![Part::Text { text: text.clone() }]),
        UserContent::Parts(parts) => {
            let mut out = Vec::with_capacity(parts.len());
            for part in parts {
                match part {
                    ContentPart::Text { text } => out.push(Part::Text { text: text.clone() }),
                    ContentPart::Image { mime, data } => {
                        if !SUPPORTED_IMAGE_MIME.contains(&mime.as_str()) {
                            return Err(CodecError::UnsupportedContentType {
                                provider: "google",
                                detail: format!("image MIME type `{mime}`"),
                            });
                        }
                        out.push(Part::InlineData {
                            inline_data: Blob {
                                mime_type: mime.clone(),
                                data: data.clone(),
                            },
                        });
                    }
                }
            }
            Ok(out)
        }
    }
}

fn convert_assistant_parts(content: &AssistantContent) -> Vec<Part> {
    match content {
        AssistantContent::Text(text) => vec![Part::Text { text: text.clone() }],
        AssistantContent::ToolCalls(calls) => calls
            .iter()
            .map(|call| Part::FunctionCall {
                function_call: FunctionCall {
                    id: Some(call.id.clone()),
                    name: call.name.clone(),
                    args: Some(call.arguments.clone()),
                },
            })
            .collect(),
    }
}

/// Decode a `generateContent` response into one assistant message.
pub fn convert_response(body: &serde_json::Value) -> Result<ChatMessage, CodecError> {
    let response: GenerateContentResponse = serde_json::from_value(body.clone())
        .map_err(|e| CodecError::ParseError(format!("invalid Gemini response: {e}")))?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| CodecError::ParseError("no candidates in Gemini response".to_string()))?;
    let content = candidate
        .content
        .ok_or_else(|| CodecError::ParseError("no content in Gemini candidate".to_string()))?;

    let mut text = String::new();
    let mut calls = Vec::new();

    for part in content.parts {
        match part {
            Part::Text { text: chunk } => {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&chunk);
            }
            Part::FunctionCall { function_call } => {
                let id = function_call
                    .id
                    .unwrap_or_else(|| format!("call_{}", uuid::Uuid::new_v4()));
                let arguments = match function_call.args {
                    Some(args) if args.is_object() => args,
                    // Absent args mean a zero-argument function.
                    None => json!({}),
                    Some(other) => {
                        return Err(CodecError::MalformedToolArguments {
                            id,
                            reason: format!("functionCall.args is not a JSON object: {other}"),
                        });
                    }
                };
                calls.push(ToolCall::new(id, function_call.name, arguments)?);
            }
            // Media and functionResponse parts are not assistant output in
            // this model.
            Part::InlineData { .. } | Part::FunctionResponse { .. } => {}
        }
    }

    if calls.is_empty() {
        Ok(ChatMessage::assistant(text))
    } else {
        ChatMessage::assistant_tool_calls(calls)
    }
}
