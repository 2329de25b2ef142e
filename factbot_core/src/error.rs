use thiserror::Error;

/// Errors raised while building a [`Pattern`](crate::Pattern).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("pattern '{0}' has more than one wildcard")]
    MultipleWildcards(String),
}

/// Failures a rule can report for a single query.
///
/// Every variant is recoverable: the dispatcher renders it as one line of text
/// and the session carries on with the next query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Please name what you are asking about.")]
    MissingEntity,

    #[error("No Wikipedia page found for '{entity}'. Check spelling.")]
    EntityNotFound { entity: String },

    #[error("'{entity}' is ambiguous. Try a more specific name.")]
    Ambiguous { entity: String },

    #[error("{0}")]
    MalformedSource(String),

    #[error("No {fact} found")]
    FactNotFound { fact: String },

    #[error("Could not retrieve reference text: {0}")]
    Retrieval(String),
}

impl ExtractionError {
    /// Whether retrying the same request could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Retrieval(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_single_line() {
        let errors = [
            ExtractionError::MissingEntity,
            ExtractionError::EntityNotFound {
                entity: "atlantis".to_string(),
            },
            ExtractionError::Ambiguous {
                entity: "georgia".to_string(),
            },
            ExtractionError::MalformedSource("Page has no infobox".to_string()),
            ExtractionError::FactNotFound {
                fact: "population".to_string(),
            },
            ExtractionError::Retrieval("timed out".to_string()),
        ];
        for error in errors {
            assert!(!error.to_string().contains('\n'), "{error:?}");
        }
    }

    #[test]
    fn only_retrieval_is_transient() {
        assert!(ExtractionError::Retrieval("reset".to_string()).is_transient());
        assert!(
            !ExtractionError::EntityNotFound {
                entity: "x".to_string()
            }
            .is_transient()
        );
        assert!(
            !ExtractionError::FactNotFound {
                fact: "area".to_string()
            }
            .is_transient()
        );
    }

    #[test]
    fn fact_not_found_names_the_fact() {
        let error = ExtractionError::FactNotFound {
            fact: "population".to_string(),
        };
        assert_eq!(error.to_string(), "No population found");
    }
}
