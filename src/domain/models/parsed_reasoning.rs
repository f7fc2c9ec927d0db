/// Result of splitting a reply into its reasoning block and remaining content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedReasoning {
    pub reasoning: String,
    pub content: String,
    matched: bool,
}

impl ParsedReasoning {
    pub fn new(reasoning: String, content: String) -> ParsedReasoning {
        return ParsedReasoning {
            reasoning,
            content,
            matched: true,
        };
    }

    /// The text carried no reasoning block, content is returned as is.
    pub fn unmatched(content: &str) -> ParsedReasoning {
        return ParsedReasoning {
            reasoning: "".to_string(),
            content: content.to_string(),
            matched: false,
        };
    }

    /// True when a reasoning block was found and removed from the content.
    pub fn matched(&self) -> bool {
        return self.matched;
    }
}
