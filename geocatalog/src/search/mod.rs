//! Combined search over maps and layers.
//!
//! [`SearchEngine::combined_search`] unions two result sources into one
//! list: direct attribute search over map records, and a cached external
//! metadata search intersected with local layer records. Each hit is
//! wrapped in a [`Normalizer`] that computes the full result mapping
//! lazily; only `title` and `last_modified` exist up front so the caller
//! can sort before serializing anything.

mod engine;
mod normalizer;
mod query;

pub use engine::{SearchEngine, SearchOptions};
pub use normalizer::{LayerNormalizer, MapNormalizer, Normalizer, ResultFields};
pub use query::split_query;
