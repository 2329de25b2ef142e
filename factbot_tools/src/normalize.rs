//! Cleanup of fetched reference text before extraction rules run.

use std::fmt;

/// Reference text as fetched, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText(String);

impl RawText {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RawText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for RawText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// Text containing only printable ASCII and ASCII whitespace, with no two
/// spaces in a row. Only [`normalize`] produces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace non-printable characters with spaces and collapse runs of spaces.
///
/// Newlines and tabs are kept so rules can anchor on line structure.
#[must_use]
pub fn normalize(text: &RawText) -> NormalizedText {
    let mut out = String::with_capacity(text.0.len());
    let mut previous_space = false;
    for c in text.0.chars() {
        let c = if is_printable(c) { c } else { ' ' };
        if c == ' ' {
            if previous_space {
                continue;
            }
            previous_space = true;
        } else {
            previous_space = false;
        }
        out.push(c);
    }
    NormalizedText(out)
}

const fn is_printable(c: char) -> bool {
    c.is_ascii_graphic() || matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}
