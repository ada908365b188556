//! Conversions between the canonical model and the OpenAI wire schema.
//!
//! Argument-serialization convention: tool-call arguments travel as a
//! JSON-encoded string (`function.arguments`), unlike the structured
//! objects Google and Anthropic carry. Tool results fan out to one
//! `role:"tool"` message per result.

use serde_json::json;

use super::types::{ChatResponseBody, OpenAiFunction, OpenAiMessage, OpenAiToolCall};
use crate::error::CodecError;
use crate::types::{AssistantContent, ChatMessage, ContentPart, ToolCall, UserContent};

/// Image MIME types the OpenAI chat API accepts.
const SUPPORTED_IMAGE_MIME: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Convert a canonical history into OpenAI wire messages.
pub fn convert_messages(history: &[ChatMessage]) -> Result<Vec<OpenAiMessage>, CodecError> {
    let mut messages = Vec::with_capacity(history.len());

    for message in history {
        match message {
            ChatMessage::System { content } => messages.push(OpenAiMessage {
                role: "system".to_string(),
                content: Some(serde_json::Value::String(content.clone())),
                tool_calls: None,
                tool_call_id: None,
            }),
            ChatMessage::User { content } => messages.push(OpenAiMessage {
                role: "user".to_string(),
                content: Some(convert_user_content(content)?),
                tool_calls: None,
                tool_call_id: None,
            }),
            ChatMessage::Assistant { content } => messages.push(match content {
                AssistantContent::Text(text) => OpenAiMessage {
                    role: "assistant".to_string(),
                    content: Some(serde_json::Value::String(text.clone())),
                    tool_calls: None,
                    tool_call_id: None,
                },
                AssistantContent::ToolCalls(calls) => OpenAiMessage {
                    role: "assistant".to_string(),
                    content: None,
                    tool_calls: Some(
                        calls
                            .iter()
                            .map(convert_tool_call)
                            .collect::<Result<Vec<_>, _>>()?,
                    ),
                    tool_call_id: None,
                },
            }),
            ChatMessage::Tool { results } => {
                // One OpenAI `tool` message per result, correlated via
                // `tool_call_id`.
                for result in results {
                    messages.push(OpenAiMessage {
                        role: "tool".to_string(),
                        content: Some(serde_json::Value::String(result.content.clone())),
                        tool_calls: None,
                        tool_call_id: Some(result.tool_call_id.clone()),
                    });
                }
            }
        }
    }

    Ok(messages)
}

fn convert_user_content(content: &UserContent) -> Result<serde_json::Value, CodecError> {
    match content {
        UserContent::Text(text) => Ok(serde_json::Value::String(text.clone())),
        UserContent::Parts(parts) => {
            // A single text part collapses to the plain-string form.
            if let [ContentPart::Text { text }] = parts.as_slice() {
                return Ok(serde_json::Value::String(text.clone()));
            }

            let mut content_parts = Vec::with_capacity(parts.len());
            for part in parts {
                match part {
                    ContentPart::Text { text } => {
                        content_parts.push(json!({ "type": "text", "text": text }));
                    }
                    ContentPart::Image { mime, data } => {
                        if !SUPPORTED_IMAGE_MIME.contains(&mime.as_str()) {
                            return Err(CodecError::UnsupportedContentType {
                                provider: "openai",
                                detail: format!("image MIME type `{mime}`"),
                            });
                        }
                        content_parts.push(json!({
                            "type": "image_url",
                            "image_url": { "url": format!("data:{mime};base64,{data}") }
                        }));
                    }
                }
            }
            Ok(serde_json::Value::Array(content_parts))
        }
    }
}

fn convert_tool_call(call: &ToolCall) -> Result<OpenAiToolCall, CodecError> {
    Ok(OpenAiToolCall {
        id: call.id.clone(),
        r#type: "function".to_string(),
        function: Some(OpenAiFunction {
            name: call.name.clone(),
            arguments: serde_json::to_string(&call.arguments)?,
        }),
    })
}

/// Decode an OpenAI chat-completion response into one assistant message.
pub fn convert_response(body: &serde_json::Value) -> Result<ChatMessage, CodecError> {
    let response: ChatResponseBody = serde_json::from_value(body.clone())
        .map_err(|e| CodecError::ParseError(format!("invalid OpenAI chat response: {e}")))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CodecError::ParseError("no choices in OpenAI response".to_string()))?;

    // Tool calls take precedence over any text riding alongside them.
    if let Some(calls) = choice.message.tool_calls
        && !calls.is_empty()
    {
        let mut tool_calls = Vec::with_capacity(calls.len());
        for call in calls {
            let function = call.function.ok_or_else(|| {
                CodecError::ParseError(format!("tool call `{}` has no function payload", call.id))
            })?;
            let arguments: serde_json::Value =
                serde_json::from_str(&function.arguments).map_err(|e| {
                    CodecError::MalformedToolArguments {
                        id: call.id.clone(),
                        reason: e.to_string(),
                    }
                })?;
            if !arguments.is_object() {
                return Err(CodecError::MalformedToolArguments {
                    id: call.id,
                    reason: "arguments did not decode to a JSON object".to_string(),
                });
            }
            tool_calls.push(ToolCall::new(call.id, function.name, arguments)?);
        }
        return ChatMessage::assistant_tool_calls(tool_calls);
    }

    let text = match choice.message.content {
        Some(serde_json::Value::String(text)) => text,
        Some(serde_json::Value::Array(parts)) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join(""),
        _ => String::new(),
    };
    Ok(ChatMessage::assistant(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolResult;

    #[test]
    fn system_and_user_text_map_to_plain_strings() {
        let history = vec![
            ChatMessage::system("You build slides."),
            ChatMessage::user("hi"),
        ];
        let messages = convert_messages(&history).expect("convert");

        assert_eq!(messages[0].role, "system");
        assert_eq!(
            messages[0].content,
            Some(serde_json::Value::String("You build slides.".to_string()))
        );
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn user_image_becomes_a_data_url_part() {
        let history = vec![ChatMessage::user_parts(vec![
            ContentPart::text("describe this"),
            ContentPart::image("image/png", "iVBORw0KGgo=").expect("image"),
        ])];
        let messages = convert_messages(&history).expect("convert");

        let parts = messages[0].content.as_ref().expect("content");
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(
            parts[1]["image_url"]["url"],
            "data:image/png;base64,iVBORw0KGgo="
        );
    }

    #[test]
    fn unsupported_image_mime_is_rejected_not_dropped() {
        let history = vec![ChatMessage::user_parts(vec![
            ContentPart::text("hi"),
            ContentPart::image("image/heic", "aGVsbG8=").expect("image"),
        ])];

        let err = convert_messages(&history).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnsupportedContentType {
                provider: "openai",
                ..
            }
        ));
    }

    #[test]
    fn assistant_tool_calls_serialize_arguments_as_json_text() {
        let history = vec![
            ChatMessage::assistant_tool_calls(vec![
                ToolCall::new("c1", "get_weather", serde_json::json!({"city": "Boston"}))
                    .expect("call"),
            ])
            .expect("assistant"),
        ];
        let messages = convert_messages(&history).expect("convert");

        assert!(messages[0].content.is_none());
        let calls = messages[0].tool_calls.as_ref().expect("tool calls");
        assert_eq!(calls[0].id, "c1");
        assert_eq!(calls[0].r#type, "function");
        let function = calls[0].function.as_ref().expect("function");
        assert_eq!(function.name, "get_weather");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&function.arguments).expect("json"),
            serde_json::json!({"city": "Boston"})
        );
    }

    #[test]
    fn tool_results_fan_out_to_one_message_each() {
        let history = vec![ChatMessage::tool_results(vec![
            ToolResult::new("c1", "72F, sunny").expect("result"),
            ToolResult::new("c2", "09:30").expect("result"),
        ])];
        let messages = convert_messages(&history).expect("convert");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "tool");
        assert_eq!(messages[0].tool_call_id.as_deref(), Some("c1"));
        assert_eq!(messages[1].tool_call_id.as_deref(), Some("c2"));
    }

    #[test]
    fn decodes_text_response() {
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "Hello!" } }]
        });
        let message = convert_response(&body).expect("decode");
        assert_eq!(message, ChatMessage::assistant("Hello!"));
    }

    #[test]
    fn decodes_tool_call_response_and_parses_argument_string() {
        let body = serde_json::json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "c1",
                        "type": "function",
                        "function": { "name": "get_weather", "arguments": "{\"city\":\"Boston\"}" }
                    }]
                }
            }]
        });

        let message = convert_response(&body).expect("decode");
        let calls = message.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "c1");
        assert_eq!(calls[0].arguments, serde_json::json!({"city": "Boston"}));
    }

    #[test]
    fn tool_calls_win_over_text_riding_alongside() {
        let body = serde_json::json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Let me check...",
                    "tool_calls": [{
                        "id": "c1",
                        "type": "function",
                        "function": { "name": "get_weather", "arguments": "{}" }
                    }]
                }
            }]
        });

        let message = convert_response(&body).expect("decode");
        assert!(message.has_tool_calls());
        assert_eq!(message.content_text(), None);
    }

    #[test]
    fn unparseable_argument_string_is_malformed_tool_arguments() {
        let body = serde_json::json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "tool_calls": [{
                        "id": "c1",
                        "type": "function",
                        "function": { "name": "get_weather", "arguments": "{not json" }
                    }]
                }
            }]
        });

        let err = convert_response(&body).unwrap_err();
        assert!(matches!(
            err,
            CodecError::MalformedToolArguments { ref id, .. } if id == "c1"
        ));
    }

    #[test]
    fn non_object_argument_payload_is_malformed_tool_arguments() {
        let body = serde_json::json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "tool_calls": [{
                        "id": "c1",
                        "type": "function",
                        "function": { "name": "get_weather", "arguments": "\"just a string\"" }
                    }]
                }
            }]
        });

        let err = convert_response(&body).unwrap_err();
        assert!(matches!(
            err,
            CodecError::MalformedToolArguments { ref id, .. } if id == "c1"
        ));
    }

    #[test]
    fn empty_response_decodes_to_empty_text_not_an_error() {
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        });
        let message = convert_response(&body).expect("decode");
        assert_eq!(message, ChatMessage::assistant(""));
    }

    #[test]
    fn missing_choices_is_a_parse_error() {
        let err = convert_response(&serde_json::json!({ "choices": [] })).unwrap_err();
        assert!(matches!(err, CodecError::ParseError(_)));
    }
}
