pub mod noop;
pub mod regex_scripts;

use anyhow::Result;

use crate::domain::models::RegexScript;
use crate::domain::models::TransformBox;

pub struct TransformManager {}

impl TransformManager {
    /// Returns a transform running `scripts`, or a no-op when none are enabled.
    pub fn get(scripts: &[RegexScript]) -> Result<TransformBox> {
        if scripts.iter().all(|script| return script.disabled) {
            return Ok(Box::<noop::NoopTransform>::default());
        }

        return Ok(Box::new(regex_scripts::RegexScripts::new(scripts)?));
    }
}
