//! Google/Gemini-style chat adapter.

pub mod transformers;
pub mod types;

use crate::error::CodecError;
use crate::providers::{Provider, ProviderAdapter};
use crate::types::ChatMessage;

/// Stateless adapter for the Gemini `generateContent` schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleAdapter;

impl ProviderAdapter for GoogleAdapter {
    fn provider(&self) -> Provider {
        Provider::Google
    }

    fn encode(&self, history: &[ChatMessage]) -> Result<serde_json::Value, CodecError> {
        let body = transformers::build_request_body(history)?;
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
    fn encode_produces_a_contents_fragment() {
        let history = vec![ChatMessage::user("hi")];
        let body = GoogleAdapter.encode(&history).expect("encode");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn text_round_trip_reproduces_the_assistant_message() {
        let original = ChatMessage::assistant("It is 72F in Boston.");
        let encoded = GoogleAdapter.encode(std::slice::from_ref(&original)).expect("encode");
        let response = serde_json::json!({
            "candidates": [{ "content": encoded["contents"][0] }]
        });
        assert_eq!(GoogleAdapter.decode(&response).expect("decode"), original);
    }

    #[test]
    fn tool_call_round_trip_reproduces_the_assistant_message() {
        use crate::types::ToolCall;

        let original = ChatMessage::assistant_tool_calls(vec![
            ToolCall::new("c1", "get_weather", serde_json::json!({"city": "Boston"}))
                .expect("call"),
        ])
        .expect("assistant");

        let encoded = GoogleAdapter.encode(std::slice::from_ref(&original)).expect("encode");
        let response = serde_json::json!({
            "candidates": [{ "content": encoded["contents"][0] }]
        });

        assert_eq!(GoogleAdapter.decode(&response).expect("decode"), original);
    }
}
