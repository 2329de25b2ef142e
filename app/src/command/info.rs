use factbot_config::Config;
use factbot_core::WILDCARD;
use tracing::info;

/// Strategy for displaying configuration information.
///
/// This strategy outputs the effective configuration:
/// - Config file location and whether it exists
/// - Retrieval endpoint, timeout and retry policy
/// - Active rule set and the questions it understands
/// - Session texts
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::config_path()?;
        let config = Config::load_or_default()?;
        info!("Showing configuration from {}", config_path.display());

        println!("=== factbot Configuration ===\n");

        println!("Config file:");
        println!("  Path: {}", config_path.display());
        if config_path.exists() {
            println!("  Status: Loaded");
        } else {
            println!("  Status: Not found, using defaults (run 'factbot init')");
        }
        println!();

        println!("Retrieval:");
        println!("  Endpoint: {}", config.retrieval.endpoint);
        println!("  Timeout: {}s", config.retrieval.timeout);
        println!("  Max Response Size: {} bytes", config.retrieval.max_size);
        println!("  Retry Delays: {:?}s", config.retrieval.retry_delays);
        println!("  User-Agent: {}", config.retrieval.user_agent);
        println!();

        let rule_set = config.rules.rule_set;
        println!("Rules:");
        println!("  Rule Set: {rule_set}");
        println!("  Questions ({WILDCARD} is the country):");
        for pattern in rule_set.patterns() {
            println!("    {pattern}");
        }
        println!();

        println!("Session:");
        println!("  Welcome: {}", config.session.welcome);
        println!("  Prompt: {:?}", config.session.prompt);
        println!("  Farewell: {}", config.session.farewell);

        Ok(())
    }
}
