//! chatwire - vendor-neutral chat messages with per-vendor wire codecs.
//!
//! A canonical message model for one conversation turn, plus bidirectional
//! adapters for the OpenAI, Google/Gemini, and Anthropic chat-completion
//! schemas, and a sequence validator that checks tool-call/tool-result
//! ordering before a history goes on the wire.
//!
//! The crate is synchronous and performs no I/O; transport, retries, and
//! model selection belong to the calling layer.
//!
//! ```rust
//! use chatwire::{encode_for_provider, validate_history, ChatMessage, Provider, ToolCall, ToolResult};
//! use serde_json::json;
//!
//! let history = vec![
//!     ChatMessage::user("What's the weather in Boston?"),
//!     ChatMessage::assistant_tool_calls(vec![
//!         ToolCall::new("c1", "get_weather", json!({"city": "Boston"}))?,
//!     ])?,
//!     ChatMessage::tool_results(vec![ToolResult::new("c1", "72F, sunny")?]),
//! ];
//!
//! assert!(validate_history(&history).is_empty());
//! let body = encode_for_provider(&history, Provider::Anthropic)?;
//! assert_eq!(body["messages"][2]["content"][0]["tool_use_id"], "c1");
//! # Ok::<(), chatwire::CodecError>(())
//! ```

pub mod error;
pub mod providers;
pub mod types;
pub mod validation;

pub use error::CodecError;
pub use providers::{
    Provider, ProviderAdapter, adapter_for, anthropic::AnthropicAdapter, google::GoogleAdapter,
    openai::OpenAiAdapter,
};
pub use types::{
    AssistantContent, ChatMessage, ContentPart, MessageRole, ToolCall, ToolResult, UserContent,
};
pub use validation::SequenceViolation;

/// Encode `history` into `provider`'s request body fragment.
///
/// The history is validated first; any sequence violation fails the call
/// with [`CodecError::SequenceViolations`] carrying every finding.
pub fn encode_for_provider(
    history: &[ChatMessage],
    provider: Provider,
) -> Result<serde_json::Value, CodecError> {
    let violations = validation::validate(history);
    if !violations.is_empty() {
        tracing::debug!(
            provider = provider.as_str(),
            violations = violations.len(),
            "history failed sequence validation"
        );
        return Err(CodecError::SequenceViolations(violations));
    }

    tracing::debug!(
        provider = provider.as_str(),
        messages = history.len(),
        "encoding history"
    );
    adapter_for(provider).encode(history)
}

/// Decode a raw vendor response body into exactly one assistant message.
pub fn decode_from_provider(
    body: &serde_json::Value,
    provider: Provider,
) -> Result<ChatMessage, CodecError> {
    tracing::debug!(provider = provider.as_str(), "decoding response");
    adapter_for(provider).decode(body)
}

/// Check ordering and reference invariants over `history`; an empty list
/// means the history is valid.
pub fn validate_history(history: &[ChatMessage]) -> Vec<SequenceViolation> {
    validation::validate(history)
}
