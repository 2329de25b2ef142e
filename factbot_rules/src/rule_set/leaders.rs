//! Capital, population, motto and heads of state or government.

use super::Question;
use super::profile::population;
use crate::fact::FactPattern;

const CAPITAL: &[&str] = &["what is the capital of %"];
const POPULATION: &[&str] = &["what is the population of %"];
const MOTTO: &[&str] = &["what is the motto of %"];
const PRESIDENT: &[&str] = &["who is the president of %"];
const PRIME_MINISTER: &[&str] = &["who is the prime minister of %"];

pub(super) const PATTERNS: &[&[&str]] = &[CAPITAL, POPULATION, MOTTO, PRESIDENT, PRIME_MINISTER];

/// A run of capitalized words on one line, e.g. `Emmanuel Macron`.
const PERSON: &str = r"(?P<fact>[A-Z][A-Za-z.'\-]*(?: [A-Z][A-Za-z.'\-]*)*)";

fn capital() -> Result<FactPattern, regex::Error> {
    FactPattern::new(
        "capital",
        r"(?s)(?i:capital)(?:\s+(?i:and\s+largest\s+city))?\s+(?P<fact>[A-Z][A-Za-z.'\- ]*?[A-Za-z.])\s*(?:\d|\n|\(|\[|$)",
    )
}

fn motto() -> Result<FactPattern, regex::Error> {
    FactPattern::new(
        "motto",
        r#"(?s)(?i:motto)s?:?\s*"?(?P<fact>[^"\n(]+?)"?\s*(?:\(|\n|"|$)"#,
    )
}

fn president() -> Result<FactPattern, regex::Error> {
    FactPattern::new("president", &format!(r"\bPresident\s+{PERSON}"))
}

fn prime_minister() -> Result<FactPattern, regex::Error> {
    FactPattern::new("prime minister", &format!(r"\bPrime Minister\s+{PERSON}"))
}

pub(super) fn questions() -> Result<Vec<Question>, regex::Error> {
    Ok(vec![
        Question::new(CAPITAL, capital()?),
        Question::new(POPULATION, population()?),
        Question::new(MOTTO, motto()?),
        Question::new(PRESIDENT, president()?),
        Question::new(PRIME_MINISTER, prime_minister()?),
    ])
}
