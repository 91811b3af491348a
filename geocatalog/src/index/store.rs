//! Storage for index records.
//!
//! One record per resource, keyed by resource id, one map per indexable
//! kind. The one-to-one relation between a record and its source resource
//! is the map key itself; referential cleanup happens when the engine
//! sees a delete event.

use dashmap::DashMap;

use crate::catalog::{ResourceId, ResourceKind};
use crate::temporal::{iso_to_day_number, ParseError};

use super::record::SpatialTemporalIndex;

/// Concurrent store of layer and map index records.
///
/// Readers and writers go through `DashMap` shards; refresh is idempotent
/// so a lost update between two concurrent refreshes of the same resource
/// only leaves a briefly stale record.
#[derive(Default)]
pub struct IndexStore {
    layers: DashMap<ResourceId, SpatialTemporalIndex>,
    maps: DashMap<ResourceId, SpatialTemporalIndex>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for a layer, cloned.
    pub fn get_layer(&self, id: ResourceId) -> Option<SpatialTemporalIndex> {
        self.layers.get(&id).map(|r| r.value().clone())
    }

    /// The record for a map, cloned.
    pub fn get_map(&self, id: ResourceId) -> Option<SpatialTemporalIndex> {
        self.maps.get(&id).map(|r| r.value().clone())
    }

    /// Insert or replace a layer record.
    pub fn upsert_layer(&self, id: ResourceId, record: SpatialTemporalIndex) {
        self.layers.insert(id, record);
    }

    /// Insert or replace a map record.
    pub fn upsert_map(&self, id: ResourceId, record: SpatialTemporalIndex) {
        self.maps.insert(id, record);
    }

    /// Remove a layer record. Missing records are a silent no-op.
    pub fn remove_layer(&self, id: ResourceId) -> Option<SpatialTemporalIndex> {
        self.layers.remove(&id).map(|(_, r)| r)
    }

    /// Remove a map record. Missing records are a silent no-op.
    pub fn remove_map(&self, id: ResourceId) -> Option<SpatialTemporalIndex> {
        self.maps.remove(&id).map(|(_, r)| r)
    }

    /// Number of records held for a kind. Documents never have records.
    pub fn count(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Layer => self.layers.len(),
            ResourceKind::Map => self.maps.len(),
            ResourceKind::Document => 0,
        }
    }

    /// Records of `kind` whose temporal range falls within the given
    /// period: `time_start >= start` and `time_end <= end`, each bound
    /// optional.
    ///
    /// # Errors
    ///
    /// Fails with [`ParseError`] if a bound is not a valid ISO date.
    pub fn filter_by_period(
        &self,
        kind: ResourceKind,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<(ResourceId, SpatialTemporalIndex)>, ParseError> {
        let start = start.map(iso_to_day_number).transpose()?;
        let end = end.map(iso_to_day_number).transpose()?;

        let records = match kind {
            ResourceKind::Layer => &self.layers,
            ResourceKind::Map => &self.maps,
            ResourceKind::Document => return Ok(Vec::new()),
        };

        Ok(records
            .iter()
            .filter(|entry| {
                let record = entry.value();
                let after_start = match start {
                    Some(bound) => record.time_start.is_some_and(|t| t >= bound),
                    None => true,
                };
                let before_end = match end {
                    Some(bound) => record.time_end.is_some_and(|t| t <= bound),
                    None => true,
                };
                after_start && before_end
            })
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(start: &str, end: &str) -> SpatialTemporalIndex {
        SpatialTemporalIndex {
            time_start: Some(iso_to_day_number(start).unwrap()),
            time_end: Some(iso_to_day_number(end).unwrap()),
            extent: None,
        }
    }

    #[test]
    fn test_upsert_and_get() {
        let store = IndexStore::new();
        store.upsert_layer(1, record("2000-01-01", "2001-01-01"));
        assert!(store.get_layer(1).is_some());
        assert!(store.get_layer(2).is_none());
        assert!(store.get_map(1).is_none());
        assert_eq!(store.count(ResourceKind::Layer), 1);
        assert_eq!(store.count(ResourceKind::Map), 0);
    }

    #[test]
    fn test_upsert_replaces() {
        let store = IndexStore::new();
        store.upsert_map(7, record("2000-01-01", "2001-01-01"));
        store.upsert_map(7, record("1990-01-01", "1991-01-01"));
        assert_eq!(store.count(ResourceKind::Map), 1);
        assert_eq!(
            store.get_map(7).unwrap().time_start,
            Some(iso_to_day_number("1990-01-01").unwrap())
        );
    }

    #[test]
    fn test_remove_missing_is_none() {
        let store = IndexStore::new();
        assert!(store.remove_layer(42).is_none());
        assert!(store.remove_map(42).is_none());
    }

    #[test]
    fn test_remove_returns_record() {
        let store = IndexStore::new();
        store.upsert_layer(1, record("2000-01-01", "2001-01-01"));
        assert!(store.remove_layer(1).is_some());
        assert!(store.get_layer(1).is_none());
    }

    #[test]
    fn test_filter_by_period() {
        let store = IndexStore::new();
        store.upsert_layer(1, record("2000-01-01", "2001-01-01"));
        store.upsert_layer(2, record("2005-01-01", "2006-01-01"));
        store.upsert_layer(3, record("1990-01-01", "2010-01-01"));

        let hits = store
            .filter_by_period(ResourceKind::Layer, Some("1999-01-01"), Some("2002-01-01"))
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, 1);

        // Only a lower bound
        let mut hits = store
            .filter_by_period(ResourceKind::Layer, Some("1999-01-01"), None)
            .unwrap();
        hits.sort_by_key(|(id, _)| *id);
        assert_eq!(hits.iter().map(|(id, _)| *id).collect::<Vec<_>>(), [1, 2]);

        // No bounds selects everything
        let hits = store
            .filter_by_period(ResourceKind::Layer, None, None)
            .unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_filter_by_period_skips_unbounded_records() {
        let store = IndexStore::new();
        store.upsert_layer(1, SpatialTemporalIndex::default());

        let hits = store
            .filter_by_period(ResourceKind::Layer, Some("1999-01-01"), None)
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_filter_by_period_bad_bound() {
        let store = IndexStore::new();
        assert!(store
            .filter_by_period(ResourceKind::Layer, Some("not a date"), None)
            .is_err());
    }

    #[test]
    fn test_documents_have_no_records() {
        let store = IndexStore::new();
        assert_eq!(store.count(ResourceKind::Document), 0);
        assert!(store
            .filter_by_period(ResourceKind::Document, None, None)
            .unwrap()
            .is_empty());
    }
}
