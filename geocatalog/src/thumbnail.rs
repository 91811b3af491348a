//! Thumbnail lookup seam.

use crate::catalog::{ResourceId, ResourceKind};

/// Resolves a resource's thumbnail URL, if one has been generated.
///
/// Thumbnail storage and generation are out of scope; search results only
/// need the URL or its absence.
pub trait ThumbnailSource: Send + Sync {
    fn thumbnail_url(&self, kind: ResourceKind, id: ResourceId) -> Option<String>;
}

/// A source with no thumbnails at all.
pub struct NoThumbnails;

impl ThumbnailSource for NoThumbnails {
    fn thumbnail_url(&self, _kind: ResourceKind, _id: ResourceId) -> Option<String> {
        None
    }
}
