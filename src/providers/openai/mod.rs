//! OpenAI-style chat-completion adapter.

pub mod transformers;
pub mod types;

use crate::error::CodecError;
use crate::providers::{Provider, ProviderAdapter};
use crate::types::ChatMessage;

/// Stateless adapter for the OpenAI chat-completion schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiAdapter;

impl ProviderAdapter for OpenAiAdapter {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    fn encode(&self, history: &[ChatMessage]) -> Result<serde_json::Value, CodecError> {
        let body = types::ChatRequestBody {
            messages: transformers::convert_messages(history)?,
        };
        Ok(serde_json::to_value(body)?)
    }

    fn decode(&self, body: &serde_json::Value) -> Result<ChatMessage, CodecError> {
        transformers::convert_response(body)
    }
}
