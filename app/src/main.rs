#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    AskInput, AskStrategy, ChatInput, ChatStrategy, CommandStrategy, InfoStrategy, InitStrategy,
    VersionStrategy,
};
use factbot_rules::RuleSet;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "factbot")]
#[command(about = "Answers questions about countries from Wikipedia", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask questions interactively until "bye"
    Chat {
        /// Question set to use (country_profile or country_leaders)
        #[arg(short = 'r', long)]
        rule_set: Option<RuleSet>,
    },
    /// Ask a single question
    Ask {
        /// The question, e.g. "What is the population of France?"
        #[arg(short = 'q', long)]
        question: String,

        /// Question set to use (country_profile or country_leaders)
        #[arg(short = 'r', long)]
        rule_set: Option<RuleSet>,
    },
    /// Initialize configuration
    Init,
    /// Show configuration and understood questions
    Info,
    /// Show version
    Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { rule_set } => ChatStrategy.execute(ChatInput { rule_set }).await,
        Commands::Ask { question, rule_set } => {
            AskStrategy
                .execute(AskInput { question, rule_set })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
