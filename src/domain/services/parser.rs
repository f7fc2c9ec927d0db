#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;

use anyhow::Result;
use regex::Regex;

use crate::domain::models::ParsedReasoning;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Trim whitespace around the reasoning and content when a block is found.
    pub trim_spaces: bool,
    /// Require the prefix at the start of the text, ignoring leading whitespace.
    pub strict: bool,
}

/// Extracts the first `prefix ... suffix` block from a reply.
#[derive(Clone, Debug)]
pub struct ReasoningParser {
    prefix: String,
    suffix: String,
    options: ParseOptions,
    pattern: Option<Regex>,
}

fn build_pattern(prefix: &str, suffix: &str, strict: bool) -> Result<Regex> {
    let anchor = if strict { r"^\s*?" } else { "" };
    let pattern = format!(
        "(?s){anchor}{}(.*?){}",
        regex::escape(prefix),
        regex::escape(suffix)
    );

    return Ok(Regex::new(&pattern)?);
}

impl ReasoningParser {
    pub fn new(prefix: &str, suffix: &str, options: ParseOptions) -> ReasoningParser {
        let mut pattern = None;
        if !prefix.is_empty() && !suffix.is_empty() {
            match build_pattern(prefix, suffix, options.strict) {
                Ok(regex) => pattern = Some(regex),
                Err(err) => {
                    tracing::warn!(err = ?err, prefix, suffix, "Unable to build reasoning pattern");
                }
            }
        }

        return ReasoningParser {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            options,
            pattern,
        };
    }

    pub fn prefix(&self) -> &str {
        return &self.prefix;
    }

    pub fn suffix(&self) -> &str {
        return &self.suffix;
    }

    /// Returns `None` when no prefix or suffix is configured. Otherwise the
    /// first block is removed from `text`, and `matched()` on the result tells
    /// whether anything was removed.
    pub fn parse(&self, text: &str) -> Option<ParsedReasoning> {
        let pattern = self.pattern.as_ref()?;

        let captures = match pattern.captures(text) {
            Some(captures) => captures,
            None => return Some(ParsedReasoning::unmatched(text)),
        };

        let block = captures.get(0)?;
        let mut reasoning = captures
            .get(1)
            .map(|e| return e.as_str().to_string())
            .unwrap_or_default();
        let mut content = format!("{}{}", &text[..block.start()], &text[block.end()..]);

        if self.options.trim_spaces {
            reasoning = reasoning.trim().to_string();
            content = content.trim().to_string();
        }

        return Some(ParsedReasoning::new(reasoning, content));
    }
}

/// Splits `text` on the first `prefix ... suffix` block without trimming.
pub fn parse_reasoning(text: &str, prefix: &str, suffix: &str) -> Option<ParsedReasoning> {
    return ReasoningParser::new(prefix, suffix, ParseOptions::default()).parse(text);
}
