#[cfg(test)]
#[path = "event_test.rs"]
mod tests;

use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;

/// Computes a reasoning duration on demand from the timestamps captured when
/// the event was emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DurationResolver {
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
}

impl DurationResolver {
    pub fn new(start_time: Option<DateTime<Utc>>, end_time: Option<DateTime<Utc>>) -> Self {
        return DurationResolver {
            start_time,
            end_time,
        };
    }

    pub fn resolve(&self) -> Option<Duration> {
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            return (end - start).to_std().ok();
        }

        return None;
    }
}

#[derive(Clone, Debug)]
pub struct ReasoningFinished {
    pub message_id: usize,
    pub text: String,
    pub duration: DurationResolver,
}

#[derive(Clone, Debug)]
pub enum Event {
    ReasoningFinished(ReasoningFinished),
}
