//! The derived spatio-temporal index record.

use std::fmt;

use crate::extent::Envelope;
use crate::temporal::day_number_to_approx_iso;

/// Spatial and temporal summary of one indexed resource.
///
/// Temporal bounds are Julian day numbers (see [`crate::temporal`]).
/// Invariant: when both bounds are present, `time_start <= time_end`.
/// The record is created empty on first indexing and refreshed in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpatialTemporalIndex {
    pub time_start: Option<i64>,
    pub time_end: Option<i64>,
    pub extent: Option<Envelope>,
}

impl SpatialTemporalIndex {
    /// True when the temporal bounds satisfy the ordering invariant
    /// (vacuously true unless both are present).
    pub fn is_ordered(&self) -> bool {
        match (self.time_start, self.time_end) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }

    /// True when nothing has been indexed yet.
    pub fn is_empty(&self) -> bool {
        self.time_start.is_none() && self.time_end.is_none() && self.extent.is_none()
    }
}

impl fmt::Display for SpatialTemporalIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let approx = |day: Option<i64>| match day {
            Some(d) => day_number_to_approx_iso(d).unwrap_or_else(|_| "?".to_string()),
            None => "-".to_string(),
        };
        let extent = match &self.extent {
            Some(e) => e.to_wkt(),
            None => "-".to_string(),
        };
        write!(
            f,
            "<SpatialTemporalIndex {extent}, {} - {}>",
            approx(self.time_start),
            approx(self.time_end)
        )
    }
}
