//! Combined search orchestrator.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::cache::ResultCache;
use crate::catalog::{Catalog, LayerResource};
use crate::config::SearchConfig;
use crate::metadata::{MetadataDoc, MetadataSearch};
use crate::thumbnail::ThumbnailSource;

use super::normalizer::{LayerNormalizer, MapNormalizer, Normalizer};
use super::query::split_query;

/// Filter options for a combined search.
#[derive(Debug, Default, Clone)]
pub struct SearchOptions {
    /// Result kind selector: `"map"` restricts to the map branch,
    /// `"layer"` to the layer branch, any other value restricts layers
    /// to that store type. Absent runs both branches.
    pub bytype: Option<String>,
    /// Restrict layer results to one topic category.
    pub bytopic: Option<String>,
}

/// Executes combined map+layer searches.
pub struct SearchEngine {
    catalog: Arc<dyn Catalog>,
    backend: Arc<dyn MetadataSearch>,
    cache: Arc<dyn ResultCache>,
    thumbnails: Arc<dyn ThumbnailSource>,
    config: Arc<SearchConfig>,
}

impl SearchEngine {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        backend: Arc<dyn MetadataSearch>,
        cache: Arc<dyn ResultCache>,
        thumbnails: Arc<dyn ThumbnailSource>,
        config: Arc<SearchConfig>,
    ) -> Self {
        Self {
            catalog,
            backend,
            cache,
            thumbnails,
            config,
        }
    }

    /// Run both search branches and concatenate their results.
    ///
    /// No cross-branch de-duplication and no implicit ordering; callers
    /// sort by `last_modified` or `title` for display. Backend or cache
    /// trouble degrades the layer branch to empty, it never fails the
    /// search.
    pub fn combined_search(&self, query: &str, options: &SearchOptions) -> Vec<Normalizer> {
        let mut results = Vec::new();

        if options.bytype.is_none() || options.bytype.as_deref() == Some("map") {
            self.map_results(query, &mut results);
        }
        if options.bytype.is_none() || options.bytype.as_deref() != Some("map") {
            self.layer_results(query, options, &mut results);
        }

        debug!("combined search for {query:?} returned {} hits", results.len());
        results
    }

    /// Map branch: attribute search over local map records.
    fn map_results(&self, query: &str, out: &mut Vec<Normalizer>) {
        let terms = split_query(query);

        for map in self.catalog.maps() {
            let matched = terms.is_empty() || {
                let title = map.title.to_lowercase();
                let abstract_text = map.abstract_text.to_lowercase();
                terms
                    .iter()
                    .any(|t| title.contains(t) || abstract_text.contains(t))
            };
            if matched {
                out.push(Normalizer::Map(MapNormalizer::new(
                    map,
                    Arc::clone(&self.catalog),
                    Arc::clone(&self.thumbnails),
                )));
            }
        }
    }

    /// Layer branch: cached external metadata search intersected with
    /// local layer records.
    fn layer_results(&self, query: &str, options: &SearchOptions, out: &mut Vec<Normalizer>) {
        let cache_key = if query.is_empty() {
            "search_results".to_string()
        } else {
            format!("search_results_{query}")
        };

        let docs = match self.cached_docs(&cache_key) {
            Some(docs) => docs,
            None => match self.fetch_docs(query, &cache_key) {
                Some(docs) => docs,
                None => return,
            },
        };

        // Resolve local records for the documents, then narrow by the
        // requested store type and topic.
        let mut layers: HashMap<String, LayerResource> = docs
            .iter()
            .filter_map(|doc| self.catalog.layer_by_uuid(&doc.uuid))
            .map(|layer| (layer.uuid.clone(), layer))
            .collect();

        if let Some(bytype) = options.bytype.as_deref() {
            if bytype != "layer" {
                layers.retain(|_, layer| layer.store_type == bytype);
            }
        }
        if let Some(bytopic) = options.bytopic.as_deref() {
            layers.retain(|_, layer| layer.topic_category == bytopic);
        }

        for doc in docs {
            // Documents without a local record are remote-only layers,
            // not yet supported; drop them.
            let Some(layer) = layers.get(&doc.uuid) else {
                continue;
            };
            out.push(Normalizer::Layer(LayerNormalizer::new(
                layer.clone(),
                doc,
                Arc::clone(&self.thumbnails),
            )));
        }
    }

    fn cached_docs(&self, cache_key: &str) -> Option<Vec<MetadataDoc>> {
        match self.cache.get(cache_key) {
            Ok(hit) => hit,
            Err(e) => {
                warn!("result cache unavailable, treating as miss: {e}");
                None
            }
        }
    }

    /// Call the external search, apply the exclusion filter, and cache
    /// the outcome. Returns `None` when the backend fails.
    fn fetch_docs(&self, query: &str, cache_key: &str) -> Option<Vec<MetadataDoc>> {
        let rows = match self.backend.search(query, 0, self.config.max_rows()) {
            Ok(rows) => rows,
            Err(e) => {
                error!("external metadata search failed: {e}");
                return None;
            }
        };

        let docs: Vec<MetadataDoc> = rows
            .into_iter()
            .filter(|doc| !self.config.excludes(&doc.name))
            .collect();

        if let Err(e) = self
            .cache
            .set(cache_key, docs.clone(), self.config.cache_ttl())
        {
            warn!("could not cache search results: {e}");
        }
        Some(docs)
    }
}
