//! Interactive question loop over any async line source.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use super::line_source::LineSource;
use super::tokenize::tokenize;
use crate::dispatcher::Outcome;
use crate::registry::Registry;

/// Text shown around the interactive loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    #[serde(default = "SessionConfig::default_welcome")]
    pub welcome: String,

    #[serde(default = "SessionConfig::default_prompt")]
    pub prompt: String,

    #[serde(default = "SessionConfig::default_farewell")]
    pub farewell: String,
}

impl SessionConfig {
    fn default_welcome() -> String {
        "Welcome to the Wikipedia chatbot!".to_string()
    }

    fn default_prompt() -> String {
        "Your query? ".to_string()
    }

    fn default_farewell() -> String {
        "So long!".to_string()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            welcome: Self::default_welcome(),
            prompt: Self::default_prompt(),
            farewell: Self::default_farewell(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Running,
    Stopped,
}

impl SessionState {
    /// Stopped is terminal; a terminate outcome stops a running session.
    #[must_use]
    pub const fn advance(self, outcome: &Outcome) -> Self {
        match (self, outcome) {
            (Self::Running, Outcome::Terminate) | (Self::Stopped, _) => Self::Stopped,
            (Self::Running, _) => Self::Running,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    /// Queries that produced text output.
    pub answered: usize,
    /// Whether the session ended through a terminate command rather than
    /// end of input.
    pub terminated: bool,
}

pub struct QuerySession {
    registry: Arc<Registry>,
    config: SessionConfig,
    state: SessionState,
    summary: SessionSummary,
}

impl QuerySession {
    #[must_use]
    pub fn new(registry: Arc<Registry>, config: SessionConfig) -> Self {
        Self {
            registry,
            config,
            state: SessionState::Running,
            summary: SessionSummary::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub const fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Tokenize and dispatch one line, updating the session state.
    pub async fn ask(&mut self, line: &str) -> Outcome {
        let tokens = tokenize(line);
        debug!("Query tokens: {:?}", tokens);

        let outcome = self.registry.dispatch(&tokens).await;
        self.state = self.state.advance(&outcome);
        if outcome.is_terminate() {
            self.summary.terminated = true;
        } else {
            self.summary.answered += 1;
        }
        outcome
    }

    /// Read lines until a terminate command or end of input, writing each
    /// outcome to `writer`.
    pub async fn run<R, W>(&mut self, reader: R, writer: W) -> std::io::Result<SessionSummary>
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin,
    {
        self.run_lines(reader.lines(), writer).await
    }

    /// Like [`QuerySession::run`], reading from any [`LineSource`].
    pub async fn run_lines<S, W>(
        &mut self,
        mut lines: S,
        mut writer: W,
    ) -> std::io::Result<SessionSummary>
    where
        S: LineSource,
        W: AsyncWrite + Unpin,
    {
        writer
            .write_all(format!("{}\n", self.config.welcome).as_bytes())
            .await?;

        while self.state == SessionState::Running {
            writer
                .write_all(format!("\n{}", self.config.prompt).as_bytes())
                .await?;
            writer.flush().await?;

            let Some(line) = lines.next_line().await? else {
                info!("End of input");
                break;
            };

            let outcome = self.ask(&line).await;
            for answer in outcome.lines() {
                writer.write_all(format!("{answer}\n").as_bytes()).await?;
            }
        }

        writer.flush().await?;
        info!(
            "Session ended after {} answered queries (terminated: {})",
            self.summary.answered, self.summary.terminated
        );
        Ok(self.summary)
    }

    /// Write the farewell message.
    pub async fn write_farewell<W>(&self, mut writer: W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        writer
            .write_all(format!("\n{}\n", self.config.farewell).as_bytes())
            .await?;
        writer.flush().await
    }
}
