//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input, dispatched
//! statically from `main`.

use std::sync::Arc;

use factbot_config::Config;
use factbot_core::Registry;
use factbot_rules::{RuleSet, build_registry};
use factbot_tools::WikipediaSource;
use tracing::info;

mod ask;
mod chat;
mod info;
mod init;
mod version;

pub use ask::{AskInput, AskStrategy};
pub use chat::{ChatInput, ChatStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Components shared by the question-answering commands.
struct CommonComponents {
    config: Config,
    registry: Arc<Registry>,
}

/// Load config and build the registry for the chosen rule set.
fn init_common_components(rule_set: Option<RuleSet>) -> anyhow::Result<CommonComponents> {
    let config = Config::load_or_default()?;
    let rule_set = rule_set.unwrap_or(config.rules.rule_set);

    let source = WikipediaSource::new(config.retrieval.clone())?;
    info!("Using endpoint {}", source.config().endpoint);

    let registry = build_registry(rule_set, Arc::new(source))?;

    Ok(CommonComponents {
        config,
        registry: Arc::new(registry),
    })
}
