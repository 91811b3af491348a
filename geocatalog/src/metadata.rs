//! External metadata collaborators.
//!
//! Two remote services feed the index and search layers: a WMS-style
//! endpoint describing each layer's time extent and bounding box, and a
//! catalog search service returning metadata documents. Both are
//! consumed through trait objects so the transports stay out of scope.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::catalog::LayerResource;
use crate::extent::Bbox;

/// Upstream metadata retrieval failed.
#[derive(Debug, Error)]
pub enum MetadataFetchError {
    /// The source has no metadata for this layer
    #[error("no metadata available for {0}")]
    Unavailable(String),

    /// The source answered but could not be used
    #[error("metadata backend error: {0}")]
    Backend(String),
}

/// The external catalog search call failed.
#[derive(Debug, Error)]
#[error("metadata search failed: {0}")]
pub struct SearchBackendError(pub String);

/// Per-layer descriptive metadata from a WMS-style source.
pub trait WmsMetadataSource: Send + Sync {
    /// The layer's temporal extent as ISO date strings, either bound
    /// optional.
    fn time_extent(
        &self,
        layer: &LayerResource,
    ) -> Result<(Option<String>, Option<String>), MetadataFetchError>;

    /// The layer's WGS84 bounding box. May be the empty sentinel
    /// `(0, 0, -1, -1)`.
    fn bounding_box(&self, layer: &LayerResource) -> Result<Bbox, MetadataFetchError>;
}

/// Full-text search over the remote metadata catalog.
pub trait MetadataSearch: Send + Sync {
    /// Return up to `limit` documents matching `query`, starting at
    /// `offset`. An empty query matches everything.
    fn search(
        &self,
        query: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<MetadataDoc>, SearchBackendError>;
}

/// A raw search document from the metadata catalog.
///
/// `name` and `uuid` are always present; every other field the backend
/// returns is preserved verbatim in `extra` and flows through to layer
/// search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataDoc {
    pub name: String,
    pub uuid: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl MetadataDoc {
    pub fn new(name: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uuid: uuid.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an extra backend field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// All fields of the document, including `name` and `uuid`, as one
    /// mapping.
    pub fn to_fields(&self) -> serde_json::Map<String, Value> {
        let mut fields = self.extra.clone();
        fields.insert("name".to_string(), Value::from(self.name.clone()));
        fields.insert("uuid".to_string(), Value::from(self.uuid.clone()));
        fields
    }
}
