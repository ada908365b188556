//! Sequence validation over conversation histories.
//!
//! Findings are collected exhaustively rather than short-circuited, so a
//! caller can surface every problem in one pass. Validation never mutates
//! the history; an empty history is vacuously valid.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AssistantContent, ChatMessage};

/// A single ordering/reference finding over a history.
///
/// `index` is the position of the offending message; for uncovered tool
/// calls it is the assistant turn that issued them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
pub enum SequenceViolation {
    /// A tool result referencing an id the immediately preceding assistant
    /// turn never issued, or referencing the same id twice.
    #[error("message {index}: tool result references unknown or already-resolved call id `{id}`")]
    ToolResultMismatch { index: usize, id: String },

    /// A tool call left uncovered by the following tool-result message.
    #[error("message {index}: no tool result covers call id `{id}`")]
    MissingToolResult { index: usize, id: String },

    /// A tool-result message with no immediately preceding tool-calling
    /// assistant turn (including first-in-history).
    #[error("message {index}: tool results do not follow an assistant tool-call turn")]
    MisplacedToolResults { index: usize },
}

/// Check ordering and reference invariants over `history`.
///
/// Returns every finding, in history order:
/// - tool results must reference ids issued by the immediately preceding
///   assistant turn, with no orphans or duplicates;
/// - an assistant turn issuing tool calls must be directly followed by
///   exactly one tool-result message covering all of its ids;
/// - the first message of a non-empty history is not a tool-result
///   message.
pub fn validate(history: &[ChatMessage]) -> Vec<SequenceViolation> {
    let mut violations = Vec::new();

    for (index, message) in history.iter().enumerate() {
        match message {
            ChatMessage::Tool { results } => {
                let issued = match index.checked_sub(1).map(|i| &history[i]) {
                    Some(ChatMessage::Assistant {
                        content: AssistantContent::ToolCalls(calls),
                    }) => calls,
                    _ => {
                        violations.push(SequenceViolation::MisplacedToolResults { index });
                        continue;
                    }
                };

                let issued_ids: HashSet<&str> =
                    issued.iter().map(|call| call.id.as_str()).collect();
                let mut resolved: HashSet<&str> = HashSet::new();

                for result in results {
                    let id = result.tool_call_id.as_str();
                    if !issued_ids.contains(id) || !resolved.insert(id) {
                        violations.push(SequenceViolation::ToolResultMismatch {
                            index,
                            id: id.to_string(),
                        });
                    }
                }

                for call in issued {
                    if !resolved.contains(call.id.as_str()) {
                        violations.push(SequenceViolation::MissingToolResult {
                            index: index - 1,
                            id: call.id.clone(),
                        });
                    }
                }
            }
            ChatMessage::Assistant {
                content: AssistantContent::ToolCalls(calls),
            } => {
                // Coverage is checked when the following tool message is
                // visited; anything else directly after (or end of history)
                // leaves every call unresolved.
                if !matches!(history.get(index + 1), Some(ChatMessage::Tool { .. })) {
                    for call in calls {
                        violations.push(SequenceViolation::MissingToolResult {
                            index,
                            id: call.id.clone(),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    violations
}
