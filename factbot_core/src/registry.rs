//! The ordered, immutable table of question patterns and their rules.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ExtractionError, PatternError};
use crate::pattern::{Binding, Pattern};

/// Answers a matched question from the tokens its wildcard bound.
#[async_trait]
pub trait Rule: Send + Sync {
    fn name(&self) -> &str;

    /// Produce answer lines for `binding`. An empty vector means the rule
    /// ran but had nothing to report.
    async fn apply(&self, binding: &Binding) -> Result<Vec<String>, ExtractionError>;
}

/// A [`Rule`] backed by a synchronous closure.
pub struct FnRule<F> {
    name: String,
    f: F,
}

impl<F> FnRule<F>
where
    F: Fn(&Binding) -> Result<Vec<String>, ExtractionError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[async_trait]
impl<F> Rule for FnRule<F>
where
    F: Fn(&Binding) -> Result<Vec<String>, ExtractionError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self, binding: &Binding) -> Result<Vec<String>, ExtractionError> {
        (self.f)(binding)
    }
}

/// What happens when an entry's pattern matches.
#[derive(Clone)]
pub enum Action {
    Rule(Arc<dyn Rule>),
    /// Ends the interactive session instead of answering.
    Terminate,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(rule) => f.debug_tuple("Rule").field(&rule.name()).finish(),
            Self::Terminate => f.write_str("Terminate"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pattern: Pattern,
    action: Action,
}

impl RegistryEntry {
    #[must_use]
    pub const fn new(pattern: Pattern, action: Action) -> Self {
        Self { pattern, action }
    }

    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[must_use]
    pub const fn action(&self) -> &Action {
        &self.action
    }
}

/// Entries in registration order. Built once through [`RegistryBuilder`] and
/// read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<RegistryEntry>,
}

impl RegistryBuilder {
    /// Register `rule` for the textual pattern `pattern`.
    pub fn rule(self, pattern: &str, rule: Arc<dyn Rule>) -> Result<Self, PatternError> {
        let pattern = Pattern::parse(pattern)?;
        Ok(self.entry(RegistryEntry::new(pattern, Action::Rule(rule))))
    }

    /// Register a pattern that ends the session, e.g. `"bye"`.
    pub fn terminate(self, pattern: &str) -> Result<Self, PatternError> {
        let pattern = Pattern::parse(pattern)?;
        Ok(self.entry(RegistryEntry::new(pattern, Action::Terminate)))
    }

    #[must_use]
    pub fn entry(mut self, entry: RegistryEntry) -> Self {
        debug!("Registering pattern: {}", entry.pattern);
        self.entries.push(entry);
        self
    }

    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}
