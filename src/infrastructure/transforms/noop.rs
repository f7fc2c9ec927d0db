#[cfg(test)]
#[path = "noop_test.rs"]
mod tests;

use crate::domain::models::Placement;
use crate::domain::models::TextTransform;

#[derive(Default)]
pub struct NoopTransform {}

impl TextTransform for NoopTransform {
    fn apply(&self, text: &str, _placement: Placement) -> String {
        return text.to_string();
    }
}
