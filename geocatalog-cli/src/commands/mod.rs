//! CLI command implementations.
//!
//! - [`reindex`] - Rebuild spatio-temporal index records for a catalog
//! - [`search`] - Run a combined map+layer search and print the results

pub mod reindex;
pub mod search;
