//! Question patterns and the tokens a wildcard binds.

use std::fmt;
use std::str::FromStr;

use crate::error::PatternError;

/// Marker used for the wildcard in the textual pattern form.
pub const WILDCARD: &str = "%";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternElement {
    /// Must equal the input token exactly.
    Literal(String),
    /// Consumes zero or more contiguous input tokens.
    Wildcard,
}

impl PatternElement {
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Literal(word) => Some(word),
            Self::Wildcard => None,
        }
    }
}

/// An ordered sequence of literals with at most one wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    elements: Vec<PatternElement>,
}

impl Pattern {
    /// Build a pattern from elements.
    ///
    /// # Errors
    /// Returns [`PatternError::Empty`] for no elements and
    /// [`PatternError::MultipleWildcards`] when more than one wildcard is given.
    pub fn new(elements: Vec<PatternElement>) -> Result<Self, PatternError> {
        if elements.is_empty() {
            return Err(PatternError::Empty);
        }
        let pattern = Self { elements };
        if pattern.elements.iter().filter(|e| e.is_wildcard()).count() > 1 {
            return Err(PatternError::MultipleWildcards(pattern.to_string()));
        }
        Ok(pattern)
    }

    /// Parse the whitespace-separated form, e.g. `"what is the capital of %"`.
    ///
    /// Literal words are lowercased so they line up with tokenized input.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let elements = text
            .split_whitespace()
            .map(|word| {
                if word == WILDCARD {
                    PatternElement::Wildcard
                } else {
                    PatternElement::Literal(word.to_lowercase())
                }
            })
            .collect();
        Self::new(elements)
    }

    #[must_use]
    pub fn elements(&self) -> &[PatternElement] {
        &self.elements
    }

    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.elements.iter().any(PatternElement::is_wildcard)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for element in &self.elements {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            match element {
                PatternElement::Literal(word) => f.write_str(word)?,
                PatternElement::Wildcard => f.write_str(WILDCARD)?,
            }
        }
        Ok(())
    }
}

/// Input tokens claimed by the wildcard of a successful match.
///
/// Empty when the pattern has no wildcard or the wildcard bound nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    tokens: Vec<String>,
}

impl Binding {
    #[must_use]
    pub const fn empty() -> Self {
        Self { tokens: Vec::new() }
    }

    #[must_use]
    pub fn from_tokens<T: AsRef<str>>(tokens: &[T]) -> Self {
        Self {
            tokens: tokens.iter().map(|t| t.as_ref().to_string()).collect(),
        }
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The bound tokens joined with single spaces, used as an entity name.
    #[must_use]
    pub fn phrase(&self) -> String {
        self.tokens.join(" ")
    }
}
