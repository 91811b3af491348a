//! Geographic envelopes in WGS84 coordinates.
//!
//! Index records store a spatial extent as an axis-aligned rectangle.
//! The stored representation is a WKT polygon so the extent can be handed
//! to a spatial database without further conversion.

use serde::{Deserialize, Serialize};

/// A WGS84 bounding box as `(min_x, min_y, max_x, max_y)`.
pub type Bbox = (f64, f64, f64, f64);

/// Sentinel bounding box reported by upstream servers for layers with no
/// valid extent. Never persisted.
pub const EMPTY_BBOX_SENTINEL: Bbox = (0.0, 0.0, -1.0, -1.0);

/// Returns true for the upstream "invalid/empty" bounding box sentinel.
pub fn is_empty_sentinel(bbox: Bbox) -> bool {
    bbox == EMPTY_BBOX_SENTINEL
}

/// Axis-aligned geographic envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Envelope {
    /// The degenerate envelope at the origin, used as the starting point
    /// for unioning child extents.
    pub fn zero() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        }
    }

    /// Build an envelope from a `(min_x, min_y, max_x, max_y)` tuple.
    pub fn from_bbox(bbox: Bbox) -> Self {
        let (min_x, min_y, max_x, max_y) = bbox;
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Grow this envelope to cover `bbox` as well.
    pub fn expand_to_include(&mut self, bbox: Bbox) {
        let (min_x, min_y, max_x, max_y) = bbox;
        self.min_x = self.min_x.min(min_x);
        self.min_y = self.min_y.min(min_y);
        self.max_x = self.max_x.max(max_x);
        self.max_y = self.max_y.max(max_y);
    }

    /// The envelope as a `(min_x, min_y, max_x, max_y)` tuple.
    pub fn as_bbox(&self) -> Bbox {
        (self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Render the envelope as a closed WKT polygon, the stored
    /// representation for index records.
    pub fn to_wkt(&self) -> String {
        format!(
            "POLYGON(({minx} {miny}, {minx} {maxy}, {maxx} {maxy}, {maxx} {miny}, {minx} {miny}))",
            minx = self.min_x,
            miny = self.min_y,
            maxx = self.max_x,
            maxy = self.max_y,
        )
    }
}
