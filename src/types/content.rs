//! Content part types shared by user messages.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Image MIME types accepted by at least one supported vendor. Adapters
/// narrow this to their own vendor's published subset at encode time.
const RECOGNIZED_IMAGE_MIME: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "image/heic",
    "image/heif",
];

/// Content part - the atomic unit of multimodal message content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    /// Text content.
    Text { text: String },

    /// Inline image: a raw base64 payload without a `data:` URI prefix,
    /// plus its MIME type.
    Image { mime: String, data: String },
}

impl ContentPart {
    /// Create a text content part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an image content part, validating the MIME string and the
    /// base64 payload shape.
    pub fn image(mime: impl Into<String>, data: impl Into<String>) -> Result<Self, CodecError> {
        let mime = mime.into();
        let data = data.into();

        if !RECOGNIZED_IMAGE_MIME.contains(&mime.as_str()) {
            return Err(CodecError::MalformedContent(format!(
                "unrecognized image MIME type `{mime}`"
            )));
        }
        if data.starts_with("data:") {
            return Err(CodecError::MalformedContent(
                "image data must be raw base64 without a data: URI prefix".to_string(),
            ));
        }
        if data.is_empty() {
            return Err(CodecError::MalformedContent(
                "image payload is empty".to_string(),
            ));
        }
        if base64::engine::general_purpose::STANDARD
            .decode(data.as_bytes())
            .is_err()
        {
            return Err(CodecError::MalformedContent(format!(
                "image payload is not valid base64 ({mime})"
            )));
        }

        Ok(Self::Image { mime, data })
    }

    /// Check if this is a text part.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Check if this is an image part.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }

    /// Get the text content if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}
