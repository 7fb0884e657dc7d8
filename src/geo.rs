//! Coarse geographic gating for forecast sources
//!
//! Rectangular lat/lon containment is deliberate: the consumers only need a
//! "is this forecast source even applicable here" gate, so the boxes trade
//! precision for simplicity. The US regions clip slivers of southern Canada
//! and northern Mexico, and the Alaska box spans the antimeridian as one wide
//! rectangle. That imprecision is accepted.

use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format coordinates for logging and cache keys
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A lat/lon rectangle used as a containment approximation
#[derive(Debug, Clone, Copy)]
pub struct BoundingRegion {
    pub name: &'static str,
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingRegion {
    /// Containment test, inclusive on all four edges
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_latitude
            && latitude <= self.max_latitude
            && longitude >= self.min_longitude
            && longitude <= self.max_longitude
    }
}

/// Bounding rectangles for the USA including territories
pub const US_REGIONS: [BoundingRegion; 7] = [
    BoundingRegion {
        name: "Contiguous United States",
        min_latitude: 24.396_308,
        max_latitude: 49.384_358,
        min_longitude: -125.0,
        max_longitude: -66.934_57,
    },
    BoundingRegion {
        name: "Alaska",
        min_latitude: 51.214_183,
        max_latitude: 71.365_162,
        min_longitude: -179.148_909,
        max_longitude: 179.778_47,
    },
    BoundingRegion {
        name: "Hawaii",
        min_latitude: 18.865_46,
        max_latitude: 28.517_269,
        min_longitude: -178.334_698,
        max_longitude: -154.806_773,
    },
    BoundingRegion {
        name: "American Samoa",
        min_latitude: -14.548_699,
        max_latitude: -11.046_934,
        min_longitude: -171.089_874,
        max_longitude: -168.143_3,
    },
    BoundingRegion {
        name: "Guam",
        min_latitude: 13.234_189,
        max_latitude: 13.654_383,
        min_longitude: 144.618_068,
        max_longitude: 144.956_712,
    },
    BoundingRegion {
        name: "US Virgin Islands",
        min_latitude: 17.673_976,
        max_latitude: 18.412_655,
        min_longitude: -65.085_452,
        max_longitude: -64.564_907,
    },
    BoundingRegion {
        name: "Puerto Rico",
        min_latitude: 17.926_405,
        max_latitude: 18.520_551,
        min_longitude: -67.271_492,
        max_longitude: -65.591_787,
    },
];

/// Valid coverage area of the NWS RAP weather model
pub const RAP_MODEL_COVERAGE: BoundingRegion = BoundingRegion {
    name: "RAP model coverage",
    min_latitude: 20.0,
    max_latitude: 55.0,
    min_longitude: -130.0,
    max_longitude: -60.0,
};

/// Whether the point plausibly lies within the USA, including territories.
///
/// Total over numeric input; out-of-range coordinates are simply evaluated
/// against the rectangles.
#[must_use]
pub fn is_possibly_within_usa(latitude: f64, longitude: f64) -> bool {
    US_REGIONS
        .iter()
        .any(|region| region.contains(latitude, longitude))
}

/// Whether the point lies inside the RAP model's coverage area
#[must_use]
pub fn is_within_rap_model_coverage(latitude: f64, longitude: f64) -> bool {
    RAP_MODEL_COVERAGE.contains(latitude, longitude)
}
