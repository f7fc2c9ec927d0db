#[cfg(test)]
#[path = "reasoning_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::IntoEnumIterator;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, strum::Display)]
pub enum ReasoningState {
    /// No reasoning has been seen for the generation yet.
    #[default]
    None,
    /// Reasoning is arriving and the reply has not settled.
    Thinking,
    /// Reasoning has ended and an end time is recorded.
    Done,
    /// The model reasons internally but never returns the reasoning text.
    Hidden,
}

/// How the reasoning stored on a message came to be.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReasoningType {
    /// Delivered by the backend separately from the reply.
    Model,
    /// Extracted from the reply using the configured prefix and suffix.
    Parsed,
    Manual,
    Edited,
}

impl ReasoningType {
    pub fn parse(text: &str) -> Option<ReasoningType> {
        return ReasoningType::iter().find(|e| return e.to_string() == text);
    }
}

/// One streamed update cycle for a generation.
#[derive(Clone, Debug)]
pub struct ReasoningUpdate<'a> {
    /// Newly received reasoning text. Appended to what the session already
    /// holds.
    pub reasoning: Option<&'a str>,
    /// Whether the reply body was modified since the previous cycle.
    pub body_changed: bool,
    pub now: DateTime<Utc>,
}

impl<'a> ReasoningUpdate<'a> {
    pub fn new(reasoning: Option<&'a str>, body_changed: bool, now: DateTime<Utc>) -> Self {
        return ReasoningUpdate {
            reasoning,
            body_changed,
            now,
        };
    }
}
