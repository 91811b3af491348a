//! JSON catalog snapshots.
//!
//! A snapshot is a self-contained JSON description of a catalog: its
//! layers (each optionally with WMS metadata fixtures), its maps, and
//! nothing else. The CLI loads one to run batch indexing and searches
//! without a live storage backend; tests use the same format.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extent::Bbox;
use crate::metadata::{
    MetadataDoc, MetadataFetchError, MetadataSearch, SearchBackendError, WmsMetadataSource,
};
use crate::search::split_query;

use super::model::{LayerResource, MapResource};
use super::store::InMemoryCatalog;

/// Snapshot loading failures.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("could not read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// WMS metadata recorded alongside a snapshot layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WmsFixture {
    #[serde(default)]
    pub time_start: Option<String>,
    #[serde(default)]
    pub time_end: Option<String>,
    #[serde(default)]
    pub bbox: Option<Bbox>,
}

/// A snapshot layer: the resource plus optional WMS fixtures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerEntry {
    #[serde(flatten)]
    pub layer: LayerResource,
    #[serde(default)]
    pub wms: Option<WmsFixture>,
}

/// A whole catalog in one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub layers: Vec<LayerEntry>,
    #[serde(default)]
    pub maps: Vec<MapResource>,
}

impl CatalogSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Build the live collaborators: a populated catalog, a WMS source
    /// answering from the recorded fixtures, and a search backend over
    /// the snapshot layers.
    ///
    /// The catalog is populated before any listener can subscribe, so
    /// no listener observes the load.
    pub fn into_collaborators(self) -> (Arc<InMemoryCatalog>, FixtureWms, FixtureSearch) {
        let catalog = Arc::new(InMemoryCatalog::new());
        let mut fixtures = HashMap::new();
        let mut docs = Vec::new();

        for entry in self.layers {
            if let Some(wms) = entry.wms {
                fixtures.insert(entry.layer.typename.clone(), wms);
            }
            docs.push(SearchableDoc {
                haystack: format!("{} {} {}", entry.layer.typename, entry.layer.title, entry.layer.abstract_text)
                    .to_lowercase(),
                doc: MetadataDoc::new(entry.layer.typename.clone(), entry.layer.uuid.clone())
                    .with_field("title", entry.layer.title.clone()),
            });
            catalog.insert_layer(entry.layer);
        }
        for map in self.maps {
            catalog.insert_map(map);
        }

        (catalog, FixtureWms { fixtures }, FixtureSearch { docs })
    }
}

/// WMS source answering from snapshot fixtures.
///
/// Layers without a fixture fail with [`MetadataFetchError::Unavailable`],
/// exercising the engine's stale-record policy.
pub struct FixtureWms {
    fixtures: HashMap<String, WmsFixture>,
}

impl WmsMetadataSource for FixtureWms {
    fn time_extent(
        &self,
        layer: &LayerResource,
    ) -> Result<(Option<String>, Option<String>), MetadataFetchError> {
        let fixture = self
            .fixtures
            .get(&layer.typename)
            .ok_or_else(|| MetadataFetchError::Unavailable(layer.typename.clone()))?;
        Ok((fixture.time_start.clone(), fixture.time_end.clone()))
    }

    fn bounding_box(&self, layer: &LayerResource) -> Result<Bbox, MetadataFetchError> {
        self.fixtures
            .get(&layer.typename)
            .and_then(|f| f.bbox)
            .ok_or_else(|| MetadataFetchError::Unavailable(layer.typename.clone()))
    }
}

struct SearchableDoc {
    haystack: String,
    doc: MetadataDoc,
}

/// Stand-in metadata search over the snapshot's layers.
///
/// Matches a document when any query term occurs in the layer's name,
/// title or abstract; an empty query matches everything.
pub struct FixtureSearch {
    docs: Vec<SearchableDoc>,
}

impl MetadataSearch for FixtureSearch {
    fn search(
        &self,
        query: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<MetadataDoc>, SearchBackendError> {
        let terms = split_query(query);
        Ok(self
            .docs
            .iter()
            .filter(|d| terms.is_empty() || terms.iter().any(|t| d.haystack.contains(t)))
            .skip(offset)
            .take(limit)
            .map(|d| d.doc.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "layers": [
            {
                "id": 1,
                "uuid": "uuid-1",
                "typename": "base:roads",
                "title": "Roads",
                "abstract": "All roads",
                "store_type": "dataStore",
                "keywords": "roads transport",
                "date": "2011-01-01T00:00:00Z",
                "wms": {
                    "time_start": "2000-01-01",
                    "time_end": "2010-01-01",
                    "bbox": [-10.0, -5.0, 10.0, 5.0]
                }
            },
            {
                "id": 2,
                "uuid": "uuid-2",
                "typename": "base:relief",
                "title": "Relief",
                "store_type": "coverageStore",
                "date": "2012-03-01T00:00:00Z"
            }
        ],
        "maps": [
            {
                "id": 10,
                "title": "Base Map",
                "owner": { "username": "ada" },
                "last_modified": "2012-06-01T00:00:00Z",
                "layer_names": ["base:roads"]
            }
        ]
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = CatalogSnapshot::from_json(SNAPSHOT).unwrap();
        assert_eq!(snapshot.layers.len(), 2);
        assert_eq!(snapshot.maps.len(), 1);
        assert!(snapshot.layers[0].wms.is_some());
        assert!(snapshot.layers[1].wms.is_none());
    }

    #[test]
    fn test_collaborators_answer_from_fixtures() {
        let (catalog, wms, _search) = CatalogSnapshot::from_json(SNAPSHOT)
            .unwrap()
            .into_collaborators();

        let roads = catalog.layer_by_name("base:roads").unwrap();
        assert_eq!(
            wms.time_extent(&roads).unwrap(),
            (Some("2000-01-01".to_string()), Some("2010-01-01".to_string()))
        );
        assert_eq!(wms.bounding_box(&roads).unwrap(), (-10.0, -5.0, 10.0, 5.0));

        let relief = catalog.layer_by_name("base:relief").unwrap();
        assert!(wms.time_extent(&relief).is_err());
    }

    #[test]
    fn test_fixture_search_matches_terms() {
        let (_catalog, _wms, search) = CatalogSnapshot::from_json(SNAPSHOT)
            .unwrap()
            .into_collaborators();

        let hits = search.search("roads", 0, 100).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "base:roads");

        let all = search.search("", 0, 100).unwrap();
        assert_eq!(all.len(), 2);

        let limited = search.search("", 0, 1).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let snapshot = CatalogSnapshot::load(file.path()).unwrap();
        assert_eq!(snapshot.layers.len(), 2);
    }

    #[test]
    fn test_malformed_snapshot_is_an_error() {
        assert!(matches!(
            CatalogSnapshot::from_json("{ not json"),
            Err(SnapshotError::Malformed(_))
        ));
    }
}
