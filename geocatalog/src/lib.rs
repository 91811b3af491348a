//! geocatalog - Spatio-temporal indexing and combined search for a
//! geographic resource catalog.
//!
//! The catalog holds mutable map and layer resources. This library
//! maintains a derived spatio-temporal summary record per resource,
//! kept in sync through lifecycle events and refreshed from WMS-style
//! metadata, and merges full-text metadata search with local records
//! into one normalized result list.
//!
//! # High-level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use geocatalog::catalog::InMemoryCatalog;
//! use geocatalog::index::{IndexEngine, IndexStore};
//! use geocatalog::search::{SearchEngine, SearchOptions};
//!
//! let catalog = Arc::new(InMemoryCatalog::new());
//! let engine = Arc::new(IndexEngine::new(Arc::new(IndexStore::new()), catalog.clone(), wms));
//! catalog.subscribe(engine.clone());
//!
//! let search = SearchEngine::new(catalog, backend, cache, thumbnails, config);
//! let mut results = search.combined_search("roads", &SearchOptions::default());
//! results.sort_by(|a, b| b.last_modified().cmp(a.last_modified()));
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod extent;
pub mod index;
pub mod logging;
pub mod metadata;
pub mod search;
pub mod temporal;
pub mod thumbnail;

/// Version of the geocatalog library and CLI.
///
/// Synchronized across the workspace; defined in `Cargo.toml` and
/// injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
