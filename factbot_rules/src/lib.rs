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

//! Fact extraction rules and the registries that wire them to questions.

pub mod entity_rule;
pub mod fact;
pub mod rule_set;

pub use entity_rule::EntityFactRule;
pub use fact::FactPattern;
pub use rule_set::{RuleSet, RuleSetError, TERMINATE_PATTERN, build_registry};
