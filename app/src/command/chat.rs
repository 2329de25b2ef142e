//! Interactive question loop on stdin/stdout.

use factbot_core::{QuerySession, spawn_line_reader};
use factbot_rules::RuleSet;
use tokio::io::stdout;
use tracing::info;

use super::init_common_components;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Optional rule set override
    pub rule_set: Option<RuleSet>,
}

/// Strategy for executing the Chat command.
///
/// Reads questions until "bye", end of input, or Ctrl-C, then says goodbye.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components(input.rule_set)?;
        let mut session = QuerySession::new(common.registry, common.config.session);
        let lines = spawn_line_reader(std::io::BufReader::new(std::io::stdin()))?;

        tokio::select! {
            result = session.run_lines(lines, stdout()) => {
                let summary = result?;
                info!(
                    "Conversation ended: {} answered, terminated by command: {}",
                    summary.answered, summary.terminated
                );
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
            }
        }

        session.write_farewell(stdout()).await?;
        Ok(())
    }
}
