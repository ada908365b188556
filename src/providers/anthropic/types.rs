//! Anthropic Messages API wire types.

use serde::{Deserialize, Serialize};

/// Request fragment for `/v1/messages`. Model and max_tokens belong to
/// the calling layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesRequestBody {
    /// Single string for one system message, array of text blocks for
    /// several.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<serde_json::Value>,
    pub messages: Vec<AnthropicMessage>,
}

/// One wire message; `content` is always an array of content blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: serde_json::Value,
}

/// Response envelope for `/v1/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponseBody {
    #[serde(default)]
    pub content: Vec<AnthropicContentBlock>,
}

/// One response content block; fields are populated per `type`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicContentBlock {
    pub r#type: String,
    pub text: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub input: Option<serde_json::Value>,
}
