//! Population, area and official language of a country.

use super::Question;
use crate::fact::FactPattern;

const POPULATION: &[&str] = &["what is the population of %"];
const AREA: &[&str] = &["what is the area of %"];
const LANGUAGE: &[&str] = &[
    "what is the official language of %",
    "what are the official languages of %",
];

pub(super) const PATTERNS: &[&[&str]] = &[POPULATION, AREA, LANGUAGE];

/// Searches the rest of a label's line and the line after it, where infoboxes
/// put the figure for a section header.
const NEAR_LABEL: &str = r"[^\n]*?(?:\n[^\n]*?)?";

/// First number near the population label, written either with thousands
/// separators or as at least six plain digits.
pub(super) fn population() -> Result<FactPattern, regex::Error> {
    FactPattern::new(
        "population",
        &format!(r"(?i)Population{NEAR_LABEL}\b(?P<fact>[1-9]\d{{0,2}}(?:,\d{{3}})+|[1-9]\d{{5,}})\b"),
    )
}

fn area() -> Result<FactPattern, regex::Error> {
    FactPattern::new(
        "area",
        &format!(r"(?i)Area{NEAR_LABEL}\b(?P<fact>\d{{1,3}}(?:,\d{{3}})*(?:\.\d+)?[ ]*km2)"),
    )
}

fn language() -> Result<FactPattern, regex::Error> {
    FactPattern::new(
        "official language",
        r"(?is)Official\s+languages?(?:\s*\(.*?\))?\s*[:\-]?\s*(?P<fact>[A-Za-z ,]+)",
    )
}

pub(super) fn questions() -> Result<Vec<Question>, regex::Error> {
    Ok(vec![
        Question::new(POPULATION, population()?),
        Question::new(AREA, area()?),
        Question::new(LANGUAGE, language()?),
    ])
}
