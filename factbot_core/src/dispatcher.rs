//! First-match-wins dispatch of a tokenized query over a [`Registry`].

use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::matcher::match_pattern;
use crate::registry::{Action, Registry};

pub const NO_ANSWERS: &str = "No answers";
pub const NOT_UNDERSTOOD: &str = "I don't understand";

/// Result of dispatching one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The matched rule produced at least one line.
    Answer(Vec<String>),
    /// The matched rule ran but produced nothing.
    NoAnswers,
    /// No registered pattern matched.
    NotUnderstood,
    /// The matched rule reported an extraction failure.
    Failed(ExtractionError),
    /// The matched entry ends the session.
    Terminate,
}

impl Outcome {
    #[must_use]
    pub const fn is_terminate(&self) -> bool {
        matches!(self, Self::Terminate)
    }

    /// Text to show the user. Empty only for [`Outcome::Terminate`].
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Answer(lines) => lines.clone(),
            Self::NoAnswers => vec![NO_ANSWERS.to_string()],
            Self::NotUnderstood => vec![NOT_UNDERSTOOD.to_string()],
            Self::Failed(error) => vec![error.to_string()],
            Self::Terminate => Vec::new(),
        }
    }
}

impl Registry {
    /// Try each entry in registration order and run the first match.
    pub async fn dispatch<T: AsRef<str>>(&self, input: &[T]) -> Outcome {
        for entry in self.entries() {
            let Some(binding) = match_pattern(entry.pattern(), input) else {
                continue;
            };
            debug!(
                "Matched pattern '{}' with binding '{}'",
                entry.pattern(),
                binding.phrase()
            );

            let rule = match entry.action() {
                Action::Terminate => {
                    info!("Termination requested");
                    return Outcome::Terminate;
                }
                Action::Rule(rule) => rule,
            };

            return match rule.apply(&binding).await {
                Ok(lines) if lines.is_empty() => Outcome::NoAnswers,
                Ok(lines) => {
                    info!("Rule '{}' answered with {} line(s)", rule.name(), lines.len());
                    Outcome::Answer(lines)
                }
                Err(e) => {
                    warn!("Rule '{}' failed: {e}", rule.name());
                    Outcome::Failed(e)
                }
            };
        }

        debug!("No pattern matched {} token(s)", input.len());
        Outcome::NotUnderstood
    }
}
