mod line_source;
mod query_loop;
mod tokenize;

pub use line_source::{LineSource, spawn_line_reader};
pub use query_loop::{QuerySession, SessionConfig, SessionState, SessionSummary};
pub use tokenize::tokenize;
