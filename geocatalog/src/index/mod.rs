//! Secondary spatio-temporal index over catalog resources.
//!
//! Each indexable resource (layer or map) owns at most one
//! [`SpatialTemporalIndex`] record summarizing its temporal range and
//! geographic envelope. The [`IndexEngine`] keeps records in sync with
//! the catalog: it refreshes them from live WMS metadata and reacts to
//! resource lifecycle events. [`update_all_indices`] is the batch entry
//! point behind the CLI.
//!
//! A refresh is idempotent and failure-tolerant: upstream fetch problems
//! degrade one record's freshness, they never corrupt it and never abort
//! a batch.

mod batch;
mod engine;
mod record;
mod store;

pub use batch::{update_all_indices, BatchReport};
pub use engine::{IndexEngine, IndexError, IndexOutcome};
pub use record::SpatialTemporalIndex;
pub use store::IndexStore;
