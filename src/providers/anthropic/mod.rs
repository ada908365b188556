//! Anthropic-style Messages API adapter.

pub mod transformers;
pub mod types;

use crate::error::CodecError;
use crate::providers::{Provider, ProviderAdapter};
use crate::types::ChatMessage;

/// Stateless adapter for the Anthropic Messages schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicAdapter;

impl ProviderAdapter for AnthropicAdapter {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    fn encode(&self, history: &[ChatMessage]) -> Result<serde_json::Value, CodecError> {
        let body = transformers::convert_messages(history)?;
        Ok(serde_json::to_value(body)?)
    }

    fn decode(&self, body: &serde_json::Value) -> Result<ChatMessage, CodecError> {
        transformers::convert_response(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_produces_a_messages_fragment() {
        let history = vec![ChatMessage::user("hi")];
        let body = AnthropicAdapter.encode(&history).expect("encode");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"][0]["text"], "hi");
    }

    #[test]
    fn text_round_trip_reproduces_the_assistant_message() {
        let original = ChatMessage::assistant("It is 72F in Boston.");
        let encoded = AnthropicAdapter.encode(std::slice::from_ref(&original)).expect("encode");
        let response = serde_json::json!({
            "content": encoded["messages"][0]["content"]
        });
        assert_eq!(AnthropicAdapter.decode(&response).expect("decode"), original);
    }

    #[test]
    fn tool_call_round_trip_reproduces_the_assistant_message() {
        use crate::types::ToolCall;

        let original = ChatMessage::assistant_tool_calls(vec![
            ToolCall::new("c1", "get_weather", serde_json::json!({"city": "Boston"}))
                .expect("call"),
        ])
        .expect("assistant");

        let encoded = AnthropicAdapter.encode(std::slice::from_ref(&original)).expect("encode");
        let response = serde_json::json!({
            "content": encoded["messages"][0]["content"]
        });

        assert_eq!(AnthropicAdapter.decode(&response).expect("decode"), original);
    }
}
