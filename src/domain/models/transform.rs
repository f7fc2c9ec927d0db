use strum::EnumIter;
use strum::IntoEnumIterator;

/// Where a piece of text sits in a conversation. Post-processing rules are
/// selected by placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Placement {
    UserInput,
    AiOutput,
    Reasoning,
}

impl Placement {
    pub fn parse(text: &str) -> Option<Placement> {
        return Placement::iter().find(|e| return e.to_string() == text);
    }
}

/// A find and replace rule run over text at the given placements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegexScript {
    pub name: String,
    pub find: String,
    /// Replacement, `$1` style group references are expanded.
    pub replace: String,
    pub placements: Vec<Placement>,
    pub disabled: bool,
}

impl RegexScript {
    pub fn new(name: &str, find: &str, replace: &str, placements: Vec<Placement>) -> RegexScript {
        return RegexScript {
            name: name.to_string(),
            find: find.to_string(),
            replace: replace.to_string(),
            placements,
            disabled: false,
        };
    }
}

pub trait TextTransform {
    /// Returns `text` after applying every rule registered for `placement`.
    fn apply(&self, text: &str, placement: Placement) -> String;
}

pub type TransformBox = Box<dyn TextTransform + Send + Sync>;
