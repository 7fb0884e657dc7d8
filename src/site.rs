//! Site annotation
//!
//! Resolves the details the report view needs for a selected launch site:
//! coverage gating plus elevation and timezone from the external providers.

use crate::elevation::ElevationResolver;
use crate::error::Result;
use crate::geo::{self, Coordinates};
use crate::timezone::TimezoneResolver;
use serde::Serialize;
use tracing::debug;

/// Everything the report view needs to know about a selected site
#[derive(Debug, Clone, Serialize)]
pub struct SiteDetails {
    pub coordinates: Coordinates,
    /// Ground elevation in meters
    pub elevation_m: f64,
    /// IANA timezone name
    pub timezone: String,
    pub within_usa: bool,
    pub within_rap_coverage: bool,
}

/// Service annotating a coordinate with provider data and coverage flags
pub struct SiteResolver {
    elevation: ElevationResolver,
    timezone: TimezoneResolver,
}

impl SiteResolver {
    #[must_use]
    pub fn new(elevation: ElevationResolver, timezone: TimezoneResolver) -> Self {
        Self {
            elevation,
            timezone,
        }
    }

    /// Resolve site details for a coordinate.
    ///
    /// Provider calls are sequential; the first failure propagates and the
    /// report view decides what to show instead.
    pub async fn resolve(&self, coordinates: Coordinates) -> Result<SiteDetails> {
        debug!("Resolving site details for {}", coordinates.format());

        let elevation_m = self.elevation.elevation(&coordinates).await?;
        let timezone = self.timezone.timezone(&coordinates).await?;

        let details = SiteDetails {
            within_usa: geo::is_possibly_within_usa(coordinates.latitude, coordinates.longitude),
            within_rap_coverage: geo::is_within_rap_model_coverage(
                coordinates.latitude,
                coordinates.longitude,
            ),
            coordinates,
            elevation_m,
            timezone,
        };

        debug!(
            "Resolved site at {}: {:.0} m, {}",
            details.coordinates.format(),
            details.elevation_m,
            details.timezone
        );
        Ok(details)
    }
}
