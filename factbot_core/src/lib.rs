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

//! Template matching and rule dispatch for the factbot question answerer.
//!
//! A [`Registry`] holds question patterns in registration order. Each query is
//! tokenized, matched against the patterns, and the first matching entry's
//! [`Rule`] produces an [`Outcome`].

pub mod dispatcher;
pub mod error;
pub mod matcher;
pub mod pattern;
pub mod registry;
pub mod session;

pub use dispatcher::Outcome;
pub use error::{ExtractionError, PatternError};
pub use matcher::match_pattern;
pub use pattern::{Binding, Pattern, PatternElement, WILDCARD};
pub use registry::{Action, FnRule, Registry, RegistryBuilder, RegistryEntry, Rule};
pub use session::{
    LineSource, QuerySession, SessionConfig, SessionState, SessionSummary, spawn_line_reader,
    tokenize,
};
