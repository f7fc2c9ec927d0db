#[cfg(test)]
#[path = "hidden_model_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::IntoEnumIterator;

static DEFAULT_HIDDEN_MODELS: Lazy<Vec<HiddenModelRule>> = Lazy::new(|| {
    return vec![
        HiddenModelRule::new("openai", "o1", MatchType::Prefix),
        HiddenModelRule::new("openai", "o3", MatchType::Prefix),
        HiddenModelRule::new("openai", "o4-mini", MatchType::Prefix),
        HiddenModelRule::new(
            "makersuite",
            "gemini-2.0-flash-thinking-exp",
            MatchType::Prefix,
        ),
        HiddenModelRule::new("makersuite", "gemini-2.0-pro-exp", MatchType::Prefix),
        HiddenModelRule::new("makersuite", "gemini-2.5", MatchType::Prefix),
    ];
});

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MatchType {
    Exact,
    Prefix,
}

impl MatchType {
    pub fn parse(text: &str) -> Option<MatchType> {
        return MatchType::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HiddenModelRule {
    /// Backend the rule applies to. Empty matches every backend.
    pub backend: String,
    pub name: String,
    pub match_type: MatchType,
}

impl HiddenModelRule {
    pub fn new(backend: &str, name: &str, match_type: MatchType) -> HiddenModelRule {
        return HiddenModelRule {
            backend: backend.to_string(),
            name: name.to_string(),
            match_type,
        };
    }

    pub fn matches(&self, backend: &str, model: &str) -> bool {
        if !self.backend.is_empty() && self.backend != backend {
            return false;
        }

        match self.match_type {
            MatchType::Exact => return model == self.name,
            MatchType::Prefix => return model.starts_with(&self.name),
        }
    }
}

/// Models known to reason without ever returning the reasoning text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HiddenModels {
    rules: Vec<HiddenModelRule>,
}

impl Default for HiddenModels {
    fn default() -> HiddenModels {
        return HiddenModels::new(DEFAULT_HIDDEN_MODELS.clone());
    }
}

impl HiddenModels {
    pub fn new(rules: Vec<HiddenModelRule>) -> HiddenModels {
        return HiddenModels { rules };
    }

    pub fn rules(&self) -> &[HiddenModelRule] {
        return &self.rules;
    }

    pub fn is_hidden(&self, backend: &str, model: &str) -> bool {
        if model.is_empty() {
            return false;
        }

        return self
            .rules
            .iter()
            .any(|rule| return rule.matches(backend, model));
    }
}
