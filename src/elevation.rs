//! Elevation lookup with a primary point-query provider and a backup

use crate::error::{PpgReportError, Result};
use crate::geo::Coordinates;
use crate::http::CachedHttpClient;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Value the primary provider returns when it has no reading for a point.
/// A legitimate reading could in principle collide with it; the threshold is
/// part of the provider contract and must not be adjusted here.
pub const ELEVATION_NO_DATA: f64 = -1_000_000.0;

/// Resolves a coordinate to its ground elevation in meters
pub struct ElevationResolver {
    http: Arc<CachedHttpClient>,
    base_url: String,
}

impl ElevationResolver {
    pub fn new(http: Arc<CachedHttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Elevation in meters for the point.
    ///
    /// The primary provider answers most queries; a no-data sentinel or any
    /// primary failure falls through to the backup provider. There is no
    /// retry beyond that single step and no default value on failure.
    pub async fn elevation(&self, coordinates: &Coordinates) -> Result<f64> {
        match self.point_query(coordinates).await {
            Ok(meters) if meters != ELEVATION_NO_DATA => Ok(meters),
            Ok(_) => {
                debug!(
                    "Primary elevation provider has no data for {}",
                    coordinates.format()
                );
                self.backup_elevation(coordinates).await
            }
            Err(e) => {
                warn!("Primary elevation lookup failed: {e}");
                self.backup_elevation(coordinates).await
            }
        }
    }

    async fn point_query(&self, coordinates: &Coordinates) -> Result<f64> {
        let url = format!("{}/api/pqs", self.base_url);
        let params = [
            ("x", coordinates.longitude.to_string()),
            ("y", coordinates.latitude.to_string()),
            ("units", "Meters".to_string()),
            ("output", "json".to_string()),
        ];

        let response: PointQueryResponse = self.http.get_json(&url, &params).await?;
        Ok(response.service.elevation_query.elevation)
    }

    async fn backup_elevation(&self, coordinates: &Coordinates) -> Result<f64> {
        let url = format!("{}/api/googleelevation", self.base_url);
        let params = [(
            "locations",
            format!("{},{}", coordinates.latitude, coordinates.longitude),
        )];

        let response: BackupElevationResponse = self.http.get_json(&url, &params).await?;

        if response.status != "OK" {
            return Err(PpgReportError::api(
                "could not fetch backup elevation for site",
            ));
        }

        response
            .results
            .first()
            .map(|result| result.elevation)
            .ok_or_else(|| PpgReportError::api("could not fetch backup elevation for site"))
    }
}

#[derive(Debug, Deserialize)]
struct PointQueryResponse {
    #[serde(rename = "USGS_Elevation_Point_Query_Service")]
    service: PointQueryService,
}

#[derive(Debug, Deserialize)]
struct PointQueryService {
    #[serde(rename = "Elevation_Query")]
    elevation_query: ElevationQuery,
}

#[derive(Debug, Deserialize)]
struct ElevationQuery {
    #[serde(rename = "Elevation")]
    elevation: f64,
}

#[derive(Debug, Deserialize)]
struct BackupElevationResponse {
    status: String,
    results: Vec<BackupElevationResult>,
}

#[derive(Debug, Deserialize)]
struct BackupElevationResult {
    elevation: f64,
}
