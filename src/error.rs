//! Error handling types for chatwire.
//!
//! Every failure surfaces as a typed, recoverable [`CodecError`]; nothing in
//! this crate panics on malformed input or drops data silently.

use thiserror::Error;

use crate::validation::SequenceViolation;

/// Failures produced while constructing canonical messages or translating
/// them to and from a vendor wire schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Invalid content payload or shape (e.g. a non-base64 image body).
    #[error("Malformed content: {0}")]
    MalformedContent(String),

    /// Invalid tool-call or tool-result construction (empty id/name,
    /// duplicate ids within one assistant turn).
    #[error("Malformed tool call: {0}")]
    MalformedToolCall(String),

    /// Tool-call arguments that could not be parsed per the vendor's
    /// argument-serialization convention.
    #[error("Malformed tool arguments for call `{id}`: {reason}")]
    MalformedToolArguments {
        /// Id of the offending tool call.
        id: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Content the target vendor's schema cannot carry for that role.
    #[error("Unsupported content type for {provider}: {detail}")]
    UnsupportedContentType {
        /// Provider id of the rejecting adapter.
        provider: &'static str,
        /// What could not be represented.
        detail: String,
    },

    /// A tool result referencing a call id the preceding assistant turn
    /// never issued. Encoders report this even when the caller skipped
    /// sequence validation.
    #[error("Tool result references unknown call id `{id}`")]
    ToolResultMismatch {
        /// The unmatched tool-call id.
        id: String,
    },

    /// The history failed sequence validation; carries every finding.
    #[error("Invalid message sequence ({} violation(s))", .0.len())]
    SequenceViolations(Vec<SequenceViolation>),

    /// Provider name outside the supported set.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Structurally invalid vendor response body, or a JSON
    /// (de)serialization failure.
    #[error("Failed to parse provider payload: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_serde_json_error_maps_to_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: CodecError = json_err.into();
        assert!(matches!(err, CodecError::ParseError(_)));
    }

    #[test]
    fn sequence_violations_display_reports_count() {
        let err = CodecError::SequenceViolations(vec![
            SequenceViolation::MisplacedToolResults { index: 0 },
            SequenceViolation::MissingToolResult {
                index: 1,
                id: "a2".to_string(),
            },
        ]);
        assert!(err.to_string().contains("2 violation(s)"));
    }
}
