#[cfg(test)]
#[path = "regex_scripts_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::Result;
use regex::Regex;

use crate::domain::models::Placement;
use crate::domain::models::RegexScript;
use crate::domain::models::TextTransform;

struct CompiledScript {
    script: RegexScript,
    regex: Regex,
}

/// Runs enabled regex scripts, in order, over text at matching placements.
pub struct RegexScripts {
    scripts: Vec<CompiledScript>,
}

impl RegexScripts {
    pub fn new(scripts: &[RegexScript]) -> Result<RegexScripts> {
        let compiled = scripts
            .iter()
            .filter(|script| return !script.disabled)
            .map(|script| -> Result<CompiledScript> {
                let regex = Regex::new(&script.find).map_err(|err| {
                    return anyhow!(format!(
                        "Regex script '{}' has an invalid pattern: {err}",
                        script.name
                    ));
                })?;

                return Ok(CompiledScript {
                    script: script.clone(),
                    regex,
                });
            })
            .collect::<Result<Vec<CompiledScript>>>()?;

        return Ok(RegexScripts { scripts: compiled });
    }

    pub fn len(&self) -> usize {
        return self.scripts.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.scripts.is_empty();
    }
}

impl TextTransform for RegexScripts {
    fn apply(&self, text: &str, placement: Placement) -> String {
        return self
            .scripts
            .iter()
            .filter(|compiled| return compiled.script.placements.contains(&placement))
            .fold(text.to_string(), |acc, compiled| {
                return compiled
                    .regex
                    .replace_all(&acc, compiled.script.replace.as_str())
                    .to_string();
            });
    }
}
