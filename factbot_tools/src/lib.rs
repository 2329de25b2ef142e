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

pub mod infobox;
pub mod normalize;
pub mod retry;
pub mod wikipedia;

pub use normalize::{NormalizedText, RawText, normalize};
pub use retry::retry_with_backoff;
pub use wikipedia::{WikipediaConfig, WikipediaSource};

use async_trait::async_trait;
use factbot_core::ExtractionError;

/// Something that can describe a named entity with semi-structured text.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the reference text for `entity`.
    ///
    /// Fails with [`ExtractionError::EntityNotFound`] when nothing resolves
    /// the name.
    async fn fetch_reference_text(&self, entity: &str) -> Result<RawText, ExtractionError>;
}
