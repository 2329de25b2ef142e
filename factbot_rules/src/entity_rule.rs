use std::sync::Arc;

use async_trait::async_trait;
use factbot_core::{Binding, ExtractionError, Rule};
use factbot_tools::{ReferenceSource, normalize};
use tracing::debug;

use crate::fact::FactPattern;

/// Answers a question about the entity named by the wildcard: fetch its
/// reference text, normalize it, and extract one fact.
pub struct EntityFactRule {
    fact: FactPattern,
    source: Arc<dyn ReferenceSource>,
}

impl EntityFactRule {
    #[must_use]
    pub fn new(fact: FactPattern, source: Arc<dyn ReferenceSource>) -> Self {
        Self { fact, source }
    }
}

#[async_trait]
impl Rule for EntityFactRule {
    fn name(&self) -> &str {
        self.fact.fact()
    }

    async fn apply(&self, binding: &Binding) -> Result<Vec<String>, ExtractionError> {
        if binding.is_empty() {
            return Err(ExtractionError::MissingEntity);
        }
        let entity = binding.phrase();
        debug!(
            "Looking up {} of '{}' via {}",
            self.fact.fact(),
            entity,
            self.source.name()
        );

        let raw = self.source.fetch_reference_text(&entity).await?;
        let answer = self.fact.extract(&normalize(&raw))?;
        Ok(vec![answer])
    }
}
