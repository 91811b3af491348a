//! Lazy normalization of search hits.
//!
//! A normalizer wraps one raw resource (and, for layers, the external
//! metadata document it matched) and produces a uniform field mapping.
//! `title` and `last_modified` are computed eagerly in the constructor —
//! result ordering depends on them before anything is serialized — and
//! the full mapping is memoized on first request, never recomputed.

use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;

use crate::catalog::{Catalog, LayerResource, MapResource, ResourceKind};
use crate::metadata::MetadataDoc;
use crate::thumbnail::ThumbnailSource;

/// The normalized result mapping: string keys to JSON scalars/arrays.
pub type ResultFields = serde_json::Map<String, Value>;

/// A search hit of either kind.
pub enum Normalizer {
    Map(MapNormalizer),
    Layer(LayerNormalizer),
}

impl Normalizer {
    pub fn title(&self) -> &str {
        match self {
            Normalizer::Map(n) => &n.title,
            Normalizer::Layer(n) => &n.title,
        }
    }

    /// ISO-8601 last-modified timestamp, available without serializing.
    pub fn last_modified(&self) -> &str {
        match self {
            Normalizer::Map(n) => &n.last_modified,
            Normalizer::Layer(n) => &n.last_modified,
        }
    }

    /// The full normalized mapping, computed once per instance.
    pub fn fields(&self) -> &ResultFields {
        match self {
            Normalizer::Map(n) => n.fields(),
            Normalizer::Layer(n) => n.fields(),
        }
    }
}

/// Normalizer for a map hit.
pub struct MapNormalizer {
    map: MapResource,
    catalog: Arc<dyn Catalog>,
    thumbnails: Arc<dyn ThumbnailSource>,
    title: String,
    last_modified: String,
    memo: OnceCell<ResultFields>,
}

impl MapNormalizer {
    pub fn new(
        map: MapResource,
        catalog: Arc<dyn Catalog>,
        thumbnails: Arc<dyn ThumbnailSource>,
    ) -> Self {
        let title = map.title.clone();
        let last_modified = map.last_modified.to_rfc3339();
        Self {
            map,
            catalog,
            thumbnails,
            title,
            last_modified,
            memo: OnceCell::new(),
        }
    }

    fn fields(&self) -> &ResultFields {
        self.memo.get_or_init(|| self.populate())
    }

    fn populate(&self) -> ResultFields {
        let map = &self.map;
        let thumb = self.thumbnails.thumbnail_url(ResourceKind::Map, map.id);

        // Keyword union over locally resolvable member layers. Layers
        // without keywords contribute nothing.
        let keywords: BTreeSet<String> = self
            .catalog
            .local_layers(map)
            .iter()
            .flat_map(|l| {
                l.keywords
                    .split_whitespace()
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut fields = ResultFields::new();
        fields.insert("id".to_string(), Value::from(map.id));
        fields.insert("title".to_string(), Value::from(map.title.clone()));
        fields.insert(
            "abstract".to_string(),
            Value::from(map.abstract_text.clone()),
        );
        fields.insert("topic".to_string(), Value::from(""));
        fields.insert("detail".to_string(), Value::from(format!("/maps/{}", map.id)));
        fields.insert("owner".to_string(), Value::from(map.owner.display_name()));
        fields.insert(
            "owner_detail".to_string(),
            Value::from(format!("/profiles/{}", map.owner.username)),
        );
        fields.insert(
            "last_modified".to_string(),
            Value::from(self.last_modified.clone()),
        );
        fields.insert("_type".to_string(), Value::from("map"));
        fields.insert("_display_type".to_string(), Value::from("Map"));
        fields.insert(
            "thumb".to_string(),
            thumb.map_or(Value::Null, Value::from),
        );
        fields.insert(
            "keywords".to_string(),
            Value::from(keywords.into_iter().collect::<Vec<_>>()),
        );
        fields
    }
}

/// Normalizer for a layer hit: an external metadata document joined with
/// its local layer record.
pub struct LayerNormalizer {
    layer: LayerResource,
    doc: MetadataDoc,
    thumbnails: Arc<dyn ThumbnailSource>,
    title: String,
    last_modified: String,
    memo: OnceCell<ResultFields>,
}

impl LayerNormalizer {
    pub fn new(
        layer: LayerResource,
        doc: MetadataDoc,
        thumbnails: Arc<dyn ThumbnailSource>,
    ) -> Self {
        let title = layer.title.clone();
        let last_modified = layer.date.to_rfc3339();
        Self {
            layer,
            doc,
            thumbnails,
            title,
            last_modified,
            memo: OnceCell::new(),
        }
    }

    fn fields(&self) -> &ResultFields {
        self.memo.get_or_init(|| self.populate())
    }

    fn populate(&self) -> ResultFields {
        let layer = &self.layer;
        let thumb = self.thumbnails.thumbnail_url(ResourceKind::Layer, layer.id);

        // Start from the raw document and overwrite with local record
        // fields.
        let mut fields = self.doc.to_fields();
        fields.insert(
            "owner".to_string(),
            Value::from(layer.metadata_author.clone()),
        );
        fields.insert(
            "thumb".to_string(),
            thumb.map_or(Value::Null, Value::from),
        );
        fields.insert(
            "last_modified".to_string(),
            Value::from(self.last_modified.clone()),
        );
        fields.insert("id".to_string(), Value::from(layer.id));
        fields.insert("_type".to_string(), Value::from("layer"));
        fields.insert("topic".to_string(), Value::from(layer.topic_category.clone()));
        fields.insert(
            "storeType".to_string(),
            Value::from(layer.store_type.clone()),
        );
        fields.insert(
            "_display_type".to_string(),
            Value::from(layer.display_type()),
        );
        if let Some(owner) = &layer.owner {
            fields.insert(
                "owner_detail".to_string(),
                Value::from(format!("/profiles/{}", owner.username)),
            );
        }
        fields
    }
}
