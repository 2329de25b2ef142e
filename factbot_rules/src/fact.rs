use factbot_core::ExtractionError;
use factbot_tools::NormalizedText;
use regex::Regex;

/// Name of the capture group holding the extracted fact. Patterns without it
/// use their first capture group.
pub const FACT_GROUP: &str = "fact";

/// One fixed regular expression locating a fact in normalized text.
#[derive(Debug, Clone)]
pub struct FactPattern {
    fact: String,
    regex: Regex,
}

impl FactPattern {
    pub fn new(fact: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            fact: fact.into(),
            regex: Regex::new(pattern)?,
        })
    }

    #[must_use]
    pub fn fact(&self) -> &str {
        &self.fact
    }

    /// First match of the pattern, trimmed.
    pub fn extract(&self, text: &NormalizedText) -> Result<String, ExtractionError> {
        self.regex
            .captures(text.as_str())
            .and_then(|caps| caps.name(FACT_GROUP).or_else(|| caps.get(1)))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ExtractionError::FactNotFound {
                fact: self.fact.clone(),
            })
    }
}
