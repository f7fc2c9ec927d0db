#[cfg(test)]
#[path = "tracker_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;
use tokio::sync::mpsc;

use super::humanize_duration;
use crate::configuration::Config;
use crate::domain::models::ChatMessage;
use crate::domain::models::DurationResolver;
use crate::domain::models::Event;
use crate::domain::models::Placement;
use crate::domain::models::ReasoningFinished;
use crate::domain::models::ReasoningState;
use crate::domain::models::ReasoningType;
use crate::domain::models::ReasoningUpdate;
use crate::domain::models::TransformBox;

pub const CONTINUE_GENERATION: &str = "continue";

#[derive(Clone, Debug)]
struct AutoParse {
    prefix: String,
    suffix: String,
    trim_spaces: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BlockProgress {
    Skipped,
    Open,
    Closed,
}

/// Length of the longest tail of `text` that could be the start of `suffix`.
fn partial_suffix_len(text: &str, suffix: &str) -> usize {
    return (1..suffix.len())
        .rev()
        .filter(|len| return suffix.is_char_boundary(*len))
        .find(|len| return text.ends_with(&suffix[..*len]))
        .unwrap_or(0);
}

fn find_message(chat: &mut [ChatMessage], message_id: usize) -> Result<&mut ChatMessage> {
    match chat.get_mut(message_id) {
        Some(message) => return Ok(message),
        None => bail!(format!("No message found at index {message_id}")),
    }
}

/// Tracks the reasoning of one in-flight generation.
pub struct ReasoningTracker {
    state: ReasoningState,
    reasoning: String,
    display_text: String,
    reasoning_type: Option<ReasoningType>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    generation_type: String,
    initial_time: DateTime<Utc>,
    is_hidden_model: bool,
    auto_parse: Option<AutoParse>,
    block_open: bool,
    trim_pending: bool,
    notified: bool,
    transform: TransformBox,
}

impl ReasoningTracker {
    pub fn new(
        initial_time: DateTime<Utc>,
        generation_type: &str,
        config: &Config,
        transform: TransformBox,
    ) -> ReasoningTracker {
        let mut auto_parse = None;
        if config.auto_parse && !config.prefix.is_empty() && !config.suffix.is_empty() {
            auto_parse = Some(AutoParse {
                prefix: config.prefix.to_string(),
                suffix: config.suffix.to_string(),
                trim_spaces: config.trim_spaces,
            });
        }

        return ReasoningTracker {
            state: ReasoningState::None,
            reasoning: "".to_string(),
            display_text: "".to_string(),
            reasoning_type: None,
            start_time: None,
            end_time: None,
            generation_type: generation_type.to_string(),
            initial_time,
            is_hidden_model: false,
            auto_parse,
            block_open: false,
            trim_pending: false,
            notified: false,
            transform,
        };
    }

    /// Prepares the session for the message being generated. Continuations keep
    /// the reasoning already stored on the message.
    pub fn init_for_message(&mut self, message: &ChatMessage, is_hidden_model: bool) {
        self.is_hidden_model = is_hidden_model;

        if self.generation_type == CONTINUE_GENERATION {
            if let Some(reasoning) = message.reasoning() {
                self.reasoning = reasoning.to_string();
                self.display_text = reasoning.to_string();
                self.reasoning_type = message.reasoning_type();
                self.state = ReasoningState::Done;
                self.end_time = Some(self.initial_time);
                self.start_time = message
                    .reasoning_duration()
                    .and_then(|millis| return i64::try_from(millis).ok())
                    .and_then(TimeDelta::try_milliseconds)
                    .and_then(|delta| return self.initial_time.checked_sub_signed(delta))
                    .or(Some(self.initial_time));

                tracing::debug!(
                    generation_type = %self.generation_type,
                    "restored reasoning for continuation"
                );
                return;
            }
        }

        if is_hidden_model {
            self.state = ReasoningState::Hidden;
            self.start_time = Some(self.initial_time);
        }
    }

    pub fn state(&self) -> ReasoningState {
        return self.state;
    }

    /// Reasoning as received, before post-processing.
    pub fn reasoning(&self) -> &str {
        return &self.reasoning;
    }

    /// Reasoning after post-processing. This is what gets stored and reported.
    pub fn display_text(&self) -> &str {
        return &self.display_text;
    }

    pub fn reasoning_type(&self) -> Option<ReasoningType> {
        return self.reasoning_type;
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        return self.start_time;
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        return self.end_time;
    }

    pub fn generation_type(&self) -> &str {
        return &self.generation_type;
    }

    pub fn is_hidden_model(&self) -> bool {
        return self.is_hidden_model;
    }

    /// Milliseconds between start and end, once both are known.
    pub fn duration(&self) -> Option<u64> {
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            return Some(u64::try_from((end - start).num_milliseconds()).unwrap_or(0));
        }

        return None;
    }

    pub fn title(&self) -> String {
        match self.state {
            ReasoningState::None => return "Reasoning".to_string(),
            ReasoningState::Thinking => return "Thinking...".to_string(),
            ReasoningState::Hidden => {
                if self.end_time.is_none() {
                    return "Thinking...".to_string();
                }
                return "Hidden reasoning".to_string();
            }
            ReasoningState::Done => {
                if let Some(duration) = self.duration() {
                    return format!("Thought for {}", humanize_duration(duration));
                }
                return "Thought for some time".to_string();
            }
        }
    }

    /// Pulls a reasoning block out of the head of the reply while it streams.
    /// Text consumed into the reasoning is removed from the message body.
    fn auto_parse(&mut self, message: &mut ChatMessage) -> BlockProgress {
        let rules = match &self.auto_parse {
            Some(rules) => rules,
            None => return BlockProgress::Skipped,
        };

        // Whitespace after the suffix may arrive in later chunks.
        if self.trim_pending {
            let body = message.mes.trim_start();
            self.trim_pending = body.is_empty();
            message.mes = body.to_string();
            return BlockProgress::Skipped;
        }

        if self.end_time.is_some() || self.reasoning_type == Some(ReasoningType::Model) {
            return BlockProgress::Skipped;
        }

        if !self.block_open {
            let body = &message.mes;
            let lead = body.len() - body.trim_start().len();
            let start = match (0..=lead)
                .filter(|idx| return body.is_char_boundary(*idx))
                .find(|idx| return body[*idx..].starts_with(&rules.prefix))
            {
                Some(start) => start,
                None => return BlockProgress::Skipped,
            };

            message.mes = message.mes[start + rules.prefix.len()..].to_string();
            self.block_open = true;
            self.reasoning_type = Some(ReasoningType::Parsed);
            self.state = ReasoningState::Thinking;
            if self.start_time.is_none() {
                self.start_time = Some(self.initial_time);
            }
        }

        if let Some(idx) = message.mes.find(&rules.suffix) {
            self.reasoning.push_str(&message.mes[..idx]);

            let mut rest = &message.mes[idx + rules.suffix.len()..];
            if rules.trim_spaces {
                rest = rest.trim_start();
                self.trim_pending = rest.is_empty();
            }
            message.mes = rest.to_string();
            self.block_open = false;

            return BlockProgress::Closed;
        }

        let split = message.mes.len() - partial_suffix_len(&message.mes, &rules.suffix);
        self.reasoning.push_str(&message.mes[..split]);
        message.mes = message.mes[split..].to_string();

        return BlockProgress::Open;
    }

    /// Records the end of reasoning and emits the finished event, once.
    fn close(
        &mut self,
        message_id: usize,
        now: DateTime<Utc>,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Result<()> {
        if self.end_time.is_none() {
            self.end_time = Some(now);
        }

        if self.state != ReasoningState::Hidden {
            self.state = ReasoningState::Done;
        }

        if self.notified {
            return Ok(());
        }
        self.notified = true;

        tracing::debug!(
            message_id,
            state = %self.state,
            duration = self.duration(),
            "reasoning finished"
        );

        tx.send(Event::ReasoningFinished(ReasoningFinished {
            message_id,
            text: self.display_text.to_string(),
            duration: DurationResolver::new(self.start_time, self.end_time),
        }))?;

        return Ok(());
    }

    fn persist(&self, message: &mut ChatMessage) {
        let duration = self.duration();
        let extra = message.extra_mut();

        extra.reasoning = None;
        if !self.display_text.is_empty() {
            extra.reasoning = Some(self.display_text.to_string());
        }
        extra.reasoning_duration = duration;
        if self.reasoning_type.is_some() {
            extra.reasoning_type = self.reasoning_type;
        }
    }

    /// Runs one update cycle for the message at `message_id`.
    pub fn process(
        &mut self,
        chat: &mut [ChatMessage],
        message_id: usize,
        update: ReasoningUpdate<'_>,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Result<()> {
        let message = find_message(chat, message_id)?;

        if let Some(delta) = update.reasoning {
            if !delta.is_empty() {
                self.reasoning.push_str(delta);
                if self.reasoning_type.is_none() {
                    self.reasoning_type = Some(ReasoningType::Model);
                }
            }
        }

        let mut body_changed = update.body_changed;
        let progress = self.auto_parse(message);
        match progress {
            BlockProgress::Open => body_changed = false,
            BlockProgress::Closed => body_changed = true,
            BlockProgress::Skipped => {}
        }

        if self.reasoning.is_empty() && self.start_time.is_none() {
            return Ok(());
        }

        let text = self
            .transform
            .apply(&self.reasoning, Placement::Reasoning);
        let reasoning_changed = text != self.display_text;
        self.display_text = text;

        if !self.display_text.is_empty() && reasoning_changed && self.end_time.is_none() {
            if self.start_time.is_none() {
                self.start_time = Some(self.initial_time);
            }
            if self.state == ReasoningState::None || self.state == ReasoningState::Hidden {
                tracing::debug!(message_id, "reasoning started");
                self.state = ReasoningState::Thinking;
            }
        }

        if progress == BlockProgress::Closed {
            self.close(message_id, update.now, tx)?;
        }

        if !self.block_open
            && !body_changed
            && self.start_time.is_some()
            && self.end_time.is_none()
            && (self.is_hidden_model || !reasoning_changed)
        {
            self.close(message_id, update.now, tx)?;
        }

        self.persist(message);

        return Ok(());
    }

    /// Closes out the session when the stream ends, including on abort. Any
    /// reasoning still open is ended at `now`.
    pub fn finish(
        &mut self,
        chat: &mut [ChatMessage],
        message_id: usize,
        now: DateTime<Utc>,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Result<()> {
        let message = find_message(chat, message_id)?;

        if self.block_open {
            // The suffix never arrived, whatever was held back is reasoning too.
            self.reasoning.push_str(&message.mes);
            message.mes = "".to_string();
            self.block_open = false;
            self.display_text = self
                .transform
                .apply(&self.reasoning, Placement::Reasoning);
        }

        if self.start_time.is_some() && self.end_time.is_none() {
            self.close(message_id, now, tx)?;
        }

        if self.start_time.is_some() || !self.display_text.is_empty() {
            self.persist(message);
        }

        return Ok(());
    }
}
