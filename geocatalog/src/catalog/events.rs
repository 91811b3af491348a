//! Typed resource lifecycle events.
//!
//! The storage layer announces resource mutations to registered
//! listeners. Events carry a snapshot of the resource so listeners never
//! re-read the store mid-mutation.

use super::model::{Resource, ResourceId, ResourceKind};

/// Which aspect of a resource a structural update changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangedAspect {
    /// A map's layer membership changed.
    Layers,
    /// Descriptive metadata changed (title, abstract, keywords, ...).
    Metadata,
}

/// A resource lifecycle notification.
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    /// A resource was created.
    Created(Resource),
    /// An existing resource was updated structurally.
    Updated {
        resource: Resource,
        changed: ChangedAspect,
    },
    /// A resource was deleted. Only the identity survives.
    Deleted {
        kind: ResourceKind,
        id: ResourceId,
    },
}

/// Receiver of lifecycle events.
///
/// Events are dispatched synchronously after the mutation has committed
/// and the store's locks are released, so listeners may read back from
/// the store.
pub trait LifecycleListener: Send + Sync {
    fn on_event(&self, event: &LifecycleEvent);
}
