//! Batch re-indexing of the whole catalog.

use tracing::{error, info};

use crate::catalog::{Catalog, Resource};

use super::engine::{IndexEngine, IndexOutcome};

/// Per-outcome counts from a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub indexed: usize,
    pub skipped: usize,
    pub stale: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.indexed + self.skipped + self.stale + self.failed
    }

    fn tally(&mut self, engine: &IndexEngine, resource: &Resource, update: bool) {
        match engine.index_resource(resource, update) {
            Ok(IndexOutcome::Indexed) => self.indexed += 1,
            Ok(IndexOutcome::Skipped) => self.skipped += 1,
            Ok(IndexOutcome::Stale) => self.stale += 1,
            Ok(IndexOutcome::Failed) => self.failed += 1,
            Err(e) => {
                error!("error indexing {resource}: {e}");
                self.failed += 1;
            }
        }
    }
}

/// Re-index every map and layer in the catalog.
///
/// With `update` false only resources without a record are refreshed;
/// with `update` true every record is recomputed. Failures are logged
/// per resource and never abort the batch.
pub fn update_all_indices(catalog: &dyn Catalog, engine: &IndexEngine, update: bool) -> BatchReport {
    let mut report = BatchReport::default();

    for map in catalog.maps() {
        report.tally(engine, &Resource::Map(map), update);
    }
    for layer in catalog.layers() {
        report.tally(engine, &Resource::Layer(layer), update);
    }

    info!(
        "index batch complete: {} indexed, {} skipped, {} stale, {} failed",
        report.indexed, report.skipped, report.stale, report.failed
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InMemoryCatalog, LayerResource, MapResource, Owner};
    use crate::extent::Bbox;
    use crate::index::IndexStore;
    use crate::metadata::{MetadataFetchError, WmsMetadataSource};
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct FixtureWms {
        bboxes: HashMap<String, Bbox>,
    }

    impl WmsMetadataSource for FixtureWms {
        fn time_extent(
            &self,
            _layer: &LayerResource,
        ) -> Result<(Option<String>, Option<String>), MetadataFetchError> {
            Ok((None, None))
        }

        fn bounding_box(&self, layer: &LayerResource) -> Result<Bbox, MetadataFetchError> {
            self.bboxes
                .get(&layer.typename)
                .copied()
                .ok_or_else(|| MetadataFetchError::Unavailable(layer.typename.clone()))
        }
    }

    fn layer(id: u64, typename: &str) -> LayerResource {
        LayerResource {
            id,
            uuid: format!("uuid-{id}"),
            typename: typename.to_string(),
            title: typename.to_string(),
            abstract_text: String::new(),
            owner: None,
            metadata_author: String::new(),
            topic_category: String::new(),
            store_type: "dataStore".to_string(),
            keywords: String::new(),
            date: Utc::now(),
        }
    }

    #[test]
    fn test_batch_keeps_going_past_failures() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.insert_layer(layer(1, "base:good"));
        catalog.insert_layer(layer(2, "base:missing"));
        catalog.insert_map(MapResource {
            id: 10,
            title: "m".to_string(),
            abstract_text: String::new(),
            owner: Owner {
                username: "o".to_string(),
                first_name: String::new(),
                last_name: String::new(),
                contact_name: None,
            },
            last_modified: Utc::now(),
            layer_names: vec!["base:good".to_string()],
        });

        let wms = Arc::new(FixtureWms {
            bboxes: HashMap::from([("base:good".to_string(), (0.0, 0.0, 1.0, 1.0))]),
        });
        let engine = IndexEngine::new(
            Arc::new(IndexStore::new()),
            Arc::clone(&catalog) as Arc<dyn Catalog>,
            wms,
        );

        let report = update_all_indices(catalog.as_ref(), &engine, false);
        // Map + good layer indexed; the layer with no WMS metadata stays
        // stale, and nothing aborted.
        assert_eq!(report.indexed, 2);
        assert_eq!(report.stale, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(report.total(), 3);
        assert!(engine.store().get_layer(1).is_some());
        assert!(engine.store().get_layer(2).is_none());
        assert!(engine.store().get_map(10).is_some());
    }

    #[test]
    fn test_second_batch_without_update_skips_everything() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.insert_layer(layer(1, "base:good"));

        let wms = Arc::new(FixtureWms {
            bboxes: HashMap::from([("base:good".to_string(), (0.0, 0.0, 1.0, 1.0))]),
        });
        let engine = IndexEngine::new(
            Arc::new(IndexStore::new()),
            Arc::clone(&catalog) as Arc<dyn Catalog>,
            wms,
        );

        let first = update_all_indices(catalog.as_ref(), &engine, false);
        assert_eq!(first.indexed, 1);

        let second = update_all_indices(catalog.as_ref(), &engine, false);
        assert_eq!(second.skipped, 1);
        assert_eq!(second.indexed, 0);

        let forced = update_all_indices(catalog.as_ref(), &engine, true);
        assert_eq!(forced.indexed, 1);
    }
}
