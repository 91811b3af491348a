//! Catalog trait and in-memory reference implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::events::{ChangedAspect, LifecycleEvent, LifecycleListener};
use super::model::{LayerResource, MapResource, Resource, ResourceId, ResourceKind};

/// Read access to the resource catalog.
///
/// The real storage layer lives behind this trait; the index engine and
/// search orchestrator only ever see it as a trait object.
pub trait Catalog: Send + Sync {
    /// All maps, in unspecified order.
    fn maps(&self) -> Vec<MapResource>;

    /// All layers, in unspecified order.
    fn layers(&self) -> Vec<LayerResource>;

    /// Look up a layer by its catalog uuid.
    fn layer_by_uuid(&self, uuid: &str) -> Option<LayerResource>;

    /// Look up a layer by its qualified typename.
    fn layer_by_name(&self, typename: &str) -> Option<LayerResource>;

    /// Look up a map by id.
    fn map_by_id(&self, id: ResourceId) -> Option<MapResource>;

    /// Resolve a map's member layers to local catalog entries.
    ///
    /// Member names with no catalog entry are remote layers and are
    /// omitted.
    fn local_layers(&self, map: &MapResource) -> Vec<LayerResource> {
        map.layer_names
            .iter()
            .filter_map(|name| self.layer_by_name(name))
            .collect()
    }
}

/// In-memory catalog with synchronous lifecycle event dispatch.
///
/// Mutations commit under a write lock, then events are dispatched with
/// all locks released so listeners can read back through [`Catalog`].
#[derive(Default)]
pub struct InMemoryCatalog {
    layers: RwLock<HashMap<ResourceId, LayerResource>>,
    maps: RwLock<HashMap<ResourceId, MapResource>>,
    listeners: RwLock<Vec<Arc<dyn LifecycleListener>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lifecycle listener. Listeners only observe mutations
    /// made after registration.
    pub fn subscribe(&self, listener: Arc<dyn LifecycleListener>) {
        self.listeners
            .write()
            .expect("catalog lock poisoned")
            .push(listener);
    }

    /// Insert a layer and announce its creation.
    pub fn insert_layer(&self, layer: LayerResource) {
        {
            let mut layers = self.layers.write().expect("catalog lock poisoned");
            layers.insert(layer.id, layer.clone());
        }
        self.dispatch(&LifecycleEvent::Created(Resource::Layer(layer)));
    }

    /// Insert a map and announce its creation.
    pub fn insert_map(&self, map: MapResource) {
        {
            let mut maps = self.maps.write().expect("catalog lock poisoned");
            maps.insert(map.id, map.clone());
        }
        self.dispatch(&LifecycleEvent::Created(Resource::Map(map)));
    }

    /// Replace a map's layer membership and announce the structural
    /// change. Unknown map ids are ignored.
    pub fn set_map_layers(&self, id: ResourceId, layer_names: Vec<String>) {
        let updated = {
            let mut maps = self.maps.write().expect("catalog lock poisoned");
            match maps.get_mut(&id) {
                Some(map) => {
                    map.layer_names = layer_names;
                    Some(map.clone())
                }
                None => None,
            }
        };
        if let Some(map) = updated {
            self.dispatch(&LifecycleEvent::Updated {
                resource: Resource::Map(map),
                changed: ChangedAspect::Layers,
            });
        }
    }

    /// Remove a layer and announce its deletion. Removing a missing
    /// layer still announces so derived state can be cleaned up.
    pub fn remove_layer(&self, id: ResourceId) {
        {
            let mut layers = self.layers.write().expect("catalog lock poisoned");
            layers.remove(&id);
        }
        self.dispatch(&LifecycleEvent::Deleted {
            kind: ResourceKind::Layer,
            id,
        });
    }

    /// Remove a map and announce its deletion.
    pub fn remove_map(&self, id: ResourceId) {
        {
            let mut maps = self.maps.write().expect("catalog lock poisoned");
            maps.remove(&id);
        }
        self.dispatch(&LifecycleEvent::Deleted {
            kind: ResourceKind::Map,
            id,
        });
    }

    fn dispatch(&self, event: &LifecycleEvent) {
        let listeners = self
            .listeners
            .read()
            .expect("catalog lock poisoned")
            .clone();
        for listener in listeners {
            listener.on_event(event);
        }
    }
}

impl Catalog for InMemoryCatalog {
    fn maps(&self) -> Vec<MapResource> {
        self.maps
            .read()
            .expect("catalog lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    fn layers(&self) -> Vec<LayerResource> {
        self.layers
            .read()
            .expect("catalog lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    fn layer_by_uuid(&self, uuid: &str) -> Option<LayerResource> {
        self.layers
            .read()
            .expect("catalog lock poisoned")
            .values()
            .find(|l| l.uuid == uuid)
            .cloned()
    }

    fn layer_by_name(&self, typename: &str) -> Option<LayerResource> {
        self.layers
            .read()
            .expect("catalog lock poisoned")
            .values()
            .find(|l| l.typename == typename)
            .cloned()
    }

    fn map_by_id(&self, id: ResourceId) -> Option<MapResource> {
        self.maps
            .read()
            .expect("catalog lock poisoned")
            .get(&id)
            .cloned()
    }
}
