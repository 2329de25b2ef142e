use factbot_core::tokenize;
use factbot_rules::RuleSet;

use super::init_common_components;

/// Input parameters for the Ask command strategy.
#[derive(Debug, Clone)]
pub struct AskInput {
    /// The question to answer
    pub question: String,
    /// Optional rule set override
    pub rule_set: Option<RuleSet>,
}

/// Strategy for answering a single question and exiting.
#[derive(Debug, Clone, Copy)]
pub struct AskStrategy;

impl super::CommandStrategy for AskStrategy {
    type Input = AskInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components(input.rule_set)?;

        let outcome = common.registry.dispatch(&tokenize(&input.question)).await;
        for line in outcome.lines() {
            println!("{line}");
        }
        Ok(())
    }
}
