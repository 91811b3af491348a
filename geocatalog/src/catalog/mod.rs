//! Catalog resource model and storage seam.
//!
//! The catalog holds the source resources the index and search layers
//! operate on: geographic layers, maps composed of layers, and (unindexed)
//! documents. Storage itself is a collaborator behind the [`Catalog`]
//! trait; [`InMemoryCatalog`] is the reference implementation used by the
//! CLI and tests, and is also where lifecycle events originate.
//!
//! # Lifecycle events
//!
//! Mutations on [`InMemoryCatalog`] emit typed [`LifecycleEvent`]s to
//! registered [`LifecycleListener`]s. The index maintenance engine is one
//! such listener, which keeps it decoupled from the storage
//! implementation.

mod events;
mod model;
mod snapshot;
mod store;

pub use events::{ChangedAspect, LifecycleEvent, LifecycleListener};
pub use model::{
    DocumentResource, LayerResource, MapResource, Owner, Resource, ResourceId, ResourceKind,
};
pub use snapshot::{
    CatalogSnapshot, FixtureSearch, FixtureWms, LayerEntry, SnapshotError, WmsFixture,
};
pub use store::{Catalog, InMemoryCatalog};
