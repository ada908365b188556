//! Provider adapters: bidirectional translators between the canonical
//! message model and each vendor's chat-completion wire schema.
//!
//! Adapters are stateless pure functions over their inputs; any number of
//! encode/decode calls may run in parallel across independent histories.

pub mod anthropic;
pub mod google;
pub mod openai;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::types::ChatMessage;

/// The supported chat-completion vendors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Google,
    Anthropic,
}

impl Provider {
    /// Stable provider id.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Google => "google",
            Self::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Self::OpenAi),
            "google" | "gemini" => Ok(Self::Google),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(CodecError::UnknownProvider(other.to_string())),
        }
    }
}

/// Bidirectional translator between canonical messages and one vendor's
/// wire schema. Implementations hold no state and are safe to share
/// across concurrent requests.
pub trait ProviderAdapter: Send + Sync {
    /// Which vendor this adapter speaks for.
    fn provider(&self) -> Provider;

    /// Encode a history into this vendor's request body fragment.
    ///
    /// The history must already have passed
    /// [`crate::validation::validate`]; encoders still reject unmatched
    /// tool results they encounter rather than emitting a broken body.
    fn encode(&self, history: &[ChatMessage]) -> Result<serde_json::Value, CodecError>;

    /// Decode a raw vendor response body into exactly one assistant
    /// message. A response proposing zero tool calls and empty text
    /// decodes to an assistant message with empty text, not an error.
    fn decode(&self, body: &serde_json::Value) -> Result<ChatMessage, CodecError>;
}

/// Adapter instance for `provider`.
pub fn adapter_for(provider: Provider) -> &'static dyn ProviderAdapter {
    match provider {
        Provider::OpenAi => &openai::OpenAiAdapter,
        Provider::Google => &google::GoogleAdapter,
        Provider::Anthropic => &anthropic::AnthropicAdapter,
    }
}
