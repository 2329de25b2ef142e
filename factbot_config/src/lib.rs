mod schema;

pub use schema::{Config, RulesConfig};
