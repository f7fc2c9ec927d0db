#[cfg(test)]
#[path = "prompt_reasoning_test.rs"]
mod tests;

use crate::configuration::Config;
use crate::domain::models::ChatMessage;

/// Adds stored reasoning back into prompt content, up to the configured
/// number of messages.
#[derive(Debug, Default)]
pub struct PromptReasoning {
    counter: usize,
}

impl PromptReasoning {
    /// Stands in for reasoning that must never be sent back to the model.
    pub const PLACEHOLDER: &'static str = "\u{200B}";

    pub fn new() -> PromptReasoning {
        return PromptReasoning::default();
    }

    pub fn counter(&self) -> usize {
        return self.counter;
    }

    pub fn is_limit_reached(&self, config: &Config) -> bool {
        if !config.add_to_prompts {
            return true;
        }

        return self.counter >= config.max_additions;
    }

    /// Combines `reasoning` and `content` using the configured prefix, suffix
    /// and separator. Prefix calls build the start of a reply to continue and
    /// are not counted against the limit.
    pub fn add_to_message(
        &mut self,
        config: &Config,
        content: &str,
        reasoning: &str,
        is_prefix: bool,
    ) -> String {
        if !is_prefix && self.is_limit_reached(config) {
            return content.to_string();
        }

        if reasoning.is_empty() || reasoning == PromptReasoning::PLACEHOLDER {
            return content.to_string();
        }

        if !is_prefix {
            self.counter += 1;
        }

        if is_prefix && content.is_empty() {
            return format!("{}{reasoning}", config.prefix);
        }

        return format!(
            "{}{reasoning}{}{}{content}",
            config.prefix, config.suffix, config.separator
        );
    }

    /// Returns the prompt text for every message in `chat`, in order. Reasoning
    /// is added starting from the most recent reply.
    pub fn add_to_chat(&mut self, config: &Config, chat: &[ChatMessage]) -> Vec<String> {
        let mut prompts = chat
            .iter()
            .rev()
            .map(|message| {
                if message.is_user {
                    return message.mes.to_string();
                }

                return self.add_to_message(
                    config,
                    &message.mes,
                    message.reasoning().unwrap_or(""),
                    false,
                );
            })
            .collect::<Vec<String>>();

        prompts.reverse();
        tracing::debug!(additions = self.counter, "added reasoning to prompt");

        return prompts;
    }
}
