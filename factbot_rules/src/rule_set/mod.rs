//! Question sets and the registries built from them.
//!
//! Each set pairs question patterns with the fact they ask for. The sets are
//! alternatives: a session runs exactly one of them.

mod leaders;
mod profile;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use factbot_core::{PatternError, Registry, Rule};
use factbot_tools::ReferenceSource;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::entity_rule::EntityFactRule;
use crate::fact::FactPattern;

/// Pattern that ends an interactive session.
pub const TERMINATE_PATTERN: &str = "bye";

#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("invalid question pattern: {0}")]
    Pattern(#[from] PatternError),

    #[error("invalid extraction regex: {0}")]
    Regex(#[from] regex::Error),
}

/// Questions answered by one fact, possibly under several phrasings.
pub(crate) struct Question {
    patterns: &'static [&'static str],
    fact: FactPattern,
}

impl Question {
    const fn new(patterns: &'static [&'static str], fact: FactPattern) -> Self {
        Self { patterns, fact }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSet {
    /// Population, area and official language.
    #[default]
    CountryProfile,
    /// Capital, population, motto, president and prime minister.
    CountryLeaders,
}

impl RuleSet {
    pub const ALL: [Self; 2] = [Self::CountryProfile, Self::CountryLeaders];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CountryProfile => "country_profile",
            Self::CountryLeaders => "country_leaders",
        }
    }

    fn questions(self) -> Result<Vec<Question>, regex::Error> {
        match self {
            Self::CountryProfile => profile::questions(),
            Self::CountryLeaders => leaders::questions(),
        }
    }

    /// Every question pattern of the set, in registration order.
    #[must_use]
    pub fn patterns(self) -> Vec<&'static str> {
        let questions: &[&[&str]] = match self {
            Self::CountryProfile => profile::PATTERNS,
            Self::CountryLeaders => leaders::PATTERNS,
        };
        questions
            .iter()
            .flat_map(|patterns| patterns.iter().copied())
            .chain(std::iter::once(TERMINATE_PATTERN))
            .collect()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|set| set.as_str() == s.trim().to_lowercase().replace('-', "_"))
            .ok_or_else(|| {
                format!("unknown rule set '{s}' (expected country_profile or country_leaders)")
            })
    }
}

/// Build the registry for `rule_set`, answering from `source`, with the
/// terminate pattern registered last.
pub fn build_registry(
    rule_set: RuleSet,
    source: Arc<dyn ReferenceSource>,
) -> Result<Registry, RuleSetError> {
    let mut builder = Registry::builder();
    for question in rule_set.questions()? {
        let rule: Arc<dyn Rule> = Arc::new(EntityFactRule::new(question.fact, Arc::clone(&source)));
        for pattern in question.patterns {
            builder = builder.rule(pattern, Arc::clone(&rule))?;
        }
    }
    let registry = builder.terminate(TERMINATE_PATTERN)?.build();

    info!(
        "Built '{}' registry with {} patterns answering from {}",
        rule_set,
        registry.len(),
        source.name()
    );
    Ok(registry)
}
