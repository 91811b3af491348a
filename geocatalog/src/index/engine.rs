//! Index maintenance engine.
//!
//! Computes index records from live WMS metadata and keeps them current
//! through catalog lifecycle events.
//!
//! # Refresh policy
//!
//! A layer refresh never persists a partially corrupted record: when the
//! bounding box cannot be fetched, the refresh aborts and the existing
//! record stays as it was (stale but intact). A map refresh aggregates
//! over its child layers, skipping each child whose metadata cannot be
//! fetched.
//!
//! # Event asymmetry
//!
//! Layer creation triggers indexing immediately. Map creation does not:
//! a new map has no layers worth summarizing, so maps are indexed only
//! when their layer membership changes. This is intended behavior, not an
//! oversight.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::catalog::{
    Catalog, ChangedAspect, LayerResource, LifecycleEvent, LifecycleListener, MapResource,
    Resource, ResourceKind,
};
use crate::extent::{is_empty_sentinel, Envelope};
use crate::metadata::{MetadataFetchError, WmsMetadataSource};
use crate::temporal::{iso_to_day_number, ParseError};

use super::record::SpatialTemporalIndex;
use super::store::IndexStore;

/// Hard errors from [`IndexEngine::index_resource`].
///
/// Only structural misuse propagates; refresh failures are absorbed and
/// reported through [`IndexOutcome`].
#[derive(Debug, Error)]
pub enum IndexError {
    /// Indexing requested for a resource kind that has no index
    #[error("cannot index resource kind {0}")]
    Unsupported(ResourceKind),
}

/// What an indexing call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The record was refreshed and persisted
    Indexed,
    /// A record already existed and no refresh was requested
    Skipped,
    /// The refresh ran but did not persist (fetch failure or empty
    /// bounding box); the previous record, if any, is unchanged
    Stale,
    /// The refresh failed with an absorbed error
    Failed,
}

/// Failure inside a kind-specific refresh. Absorbed by `index_resource`.
#[derive(Debug, Error)]
enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] MetadataFetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Outcome of a kind-specific refresh.
enum Refresh {
    Persist,
    Stale,
}

/// Maintains index records from catalog resources and WMS metadata.
pub struct IndexEngine {
    store: Arc<IndexStore>,
    catalog: Arc<dyn Catalog>,
    wms: Arc<dyn WmsMetadataSource>,
}

impl IndexEngine {
    pub fn new(
        store: Arc<IndexStore>,
        catalog: Arc<dyn Catalog>,
        wms: Arc<dyn WmsMetadataSource>,
    ) -> Self {
        Self {
            store,
            catalog,
            wms,
        }
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    /// Index one resource.
    ///
    /// Creates the record on first sight; skips the refresh when a record
    /// already exists and `update_existing` is false. Refresh failures
    /// are logged and absorbed so one bad resource never aborts a batch.
    ///
    /// # Errors
    ///
    /// [`IndexError::Unsupported`] for resource kinds with no index.
    pub fn index_resource(
        &self,
        resource: &Resource,
        update_existing: bool,
    ) -> Result<IndexOutcome, IndexError> {
        let existing = match resource {
            Resource::Layer(layer) => self.store.get_layer(layer.id),
            Resource::Map(map) => self.store.get_map(map.id),
            Resource::Document(_) => return Err(IndexError::Unsupported(ResourceKind::Document)),
        };
        let created = existing.is_none();
        if created {
            debug!("created index for {resource}");
        }

        if !update_existing && !created {
            debug!("skipping {resource}");
            return Ok(IndexOutcome::Skipped);
        }

        debug!("indexing {resource}");
        let mut record = existing.unwrap_or_default();
        let refreshed = match resource {
            Resource::Layer(layer) => self.refresh_layer(&mut record, layer),
            Resource::Map(map) => self.refresh_map(&mut record, map),
            Resource::Document(_) => unreachable!("documents rejected above"),
        };

        match refreshed {
            Ok(Refresh::Persist) => {
                match resource {
                    Resource::Layer(layer) => self.store.upsert_layer(layer.id, record),
                    Resource::Map(map) => self.store.upsert_map(map.id, record),
                    Resource::Document(_) => unreachable!("documents rejected above"),
                }
                Ok(IndexOutcome::Indexed)
            }
            Ok(Refresh::Stale) => Ok(IndexOutcome::Stale),
            Err(e) => {
                error!("error indexing {resource}: {e}");
                Ok(IndexOutcome::Failed)
            }
        }
    }

    /// Refresh a layer record from its WMS metadata.
    ///
    /// Time-extent failure is non-fatal (the time fields stay as they
    /// were); bounding-box failure aborts the refresh; the empty sentinel
    /// box skips persistence.
    fn refresh_layer(
        &self,
        record: &mut SpatialTemporalIndex,
        layer: &LayerResource,
    ) -> Result<Refresh, RefreshError> {
        match self.wms.time_extent(layer) {
            Ok((start, end)) => {
                if let Some(start) = start {
                    record.time_start = Some(iso_to_day_number(&start)?);
                }
                if let Some(end) = end {
                    record.time_end = Some(iso_to_day_number(&end)?);
                }
            }
            Err(e) => warn!("could not get time info for {}: {e}", layer.typename),
        }

        let bbox = match self.wms.bounding_box(layer) {
            Ok(bbox) => bbox,
            Err(e) => {
                warn!("could not get WMS info for {}: {e}", layer.typename);
                return Ok(Refresh::Stale);
            }
        };

        if is_empty_sentinel(bbox) {
            warn!("bounding box empty, not indexing {}", layer.typename);
            return Ok(Refresh::Stale);
        }

        record.extent = Some(Envelope::from_bbox(bbox));
        Ok(Refresh::Persist)
    }

    /// Refresh a map record by aggregating over its local child layers.
    ///
    /// Each child's time extent and bounding box are fetched
    /// independently; a failed fetch drops that child's contribution and
    /// nothing else. The record is persisted unconditionally.
    fn refresh_map(
        &self,
        record: &mut SpatialTemporalIndex,
        map: &MapResource,
    ) -> Result<Refresh, RefreshError> {
        let mut time_start: Option<i64> = None;
        let mut time_end: Option<i64> = None;
        let mut extent = Envelope::zero();

        for layer in self.catalog.local_layers(map) {
            let (start, end) = match self.wms.time_extent(&layer) {
                Ok(extent) => extent,
                Err(e) => {
                    warn!("could not get time info for {}: {e}", layer.typename);
                    (None, None)
                }
            };
            if let Some(start) = start {
                let day = iso_to_day_number(&start)?;
                time_start = Some(time_start.map_or(day, |t| t.min(day)));
            }
            if let Some(end) = end {
                let day = iso_to_day_number(&end)?;
                time_end = Some(time_end.map_or(day, |t| t.max(day)));
            }

            match self.wms.bounding_box(&layer) {
                Ok(bbox) => extent.expand_to_include(bbox),
                Err(e) => warn!("could not get WMS info for {}: {e}", layer.typename),
            }
        }

        if time_start.is_some() {
            record.time_start = time_start;
        }
        if time_end.is_some() {
            record.time_end = time_end;
        }
        record.extent = Some(extent);
        Ok(Refresh::Persist)
    }
}

impl LifecycleListener for IndexEngine {
    fn on_event(&self, event: &LifecycleEvent) {
        match event {
            // New layers are indexed immediately. New maps are not; see
            // the module docs on the event asymmetry.
            LifecycleEvent::Created(resource @ Resource::Layer(_)) => {
                if let Err(e) = self.index_resource(resource, false) {
                    error!("indexing created resource failed: {e}");
                }
            }
            LifecycleEvent::Created(_) => {}
            LifecycleEvent::Updated {
                resource: resource @ Resource::Map(_),
                changed: ChangedAspect::Layers,
            } => {
                if let Err(e) = self.index_resource(resource, true) {
                    error!("re-indexing updated map failed: {e}");
                }
            }
            LifecycleEvent::Updated { .. } => {}
            LifecycleEvent::Deleted { kind, id } => match kind {
                ResourceKind::Layer => {
                    self.store.remove_layer(*id);
                }
                ResourceKind::Map => {
                    self.store.remove_map(*id);
                }
                ResourceKind::Document => {}
            },
        }
    }
}
