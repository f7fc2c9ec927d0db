#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::ReasoningType;

/// Auxiliary data stored alongside a message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageExtra {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Milliseconds spent reasoning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_type: Option<ReasoningType>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub name: String,
    pub is_user: bool,
    pub mes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<MessageExtra>,
}

/// Messages of a conversation, addressed by index.
pub type Chat = Vec<ChatMessage>;

impl ChatMessage {
    pub fn new(name: &str, is_user: bool, text: &str) -> ChatMessage {
        return ChatMessage {
            name: name.to_string(),
            is_user,
            mes: text.to_string(),
            extra: None,
        };
    }

    pub fn append(&mut self, text: &str) {
        self.mes += text;
    }

    /// Returns the auxiliary data, creating it first if the message has none.
    pub fn extra_mut(&mut self) -> &mut MessageExtra {
        return self.extra.get_or_insert_with(MessageExtra::default);
    }

    /// Stored reasoning, `None` when missing or empty.
    pub fn reasoning(&self) -> Option<&str> {
        return self
            .extra
            .as_ref()
            .and_then(|extra| return extra.reasoning.as_deref())
            .filter(|reasoning| return !reasoning.is_empty());
    }

    pub fn reasoning_duration(&self) -> Option<u64> {
        return self
            .extra
            .as_ref()
            .and_then(|extra| return extra.reasoning_duration);
    }

    pub fn reasoning_type(&self) -> Option<ReasoningType> {
        return self
            .extra
            .as_ref()
            .and_then(|extra| return extra.reasoning_type);
    }
}
