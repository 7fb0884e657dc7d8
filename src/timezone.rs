//! Timezone lookup for a coordinate

use crate::error::Result;
use crate::geo::Coordinates;
use crate::http::CachedHttpClient;
use serde::Deserialize;
use std::sync::Arc;

/// Resolves a coordinate to its IANA timezone name
pub struct TimezoneResolver {
    http: Arc<CachedHttpClient>,
    base_url: String,
}

impl TimezoneResolver {
    pub fn new(http: Arc<CachedHttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// IANA zone name for the point. Single provider call; any failure
    /// propagates to the caller.
    pub async fn timezone(&self, coordinates: &Coordinates) -> Result<String> {
        let url = format!("{}/api/timezone", self.base_url);
        let params = [
            ("format", "json".to_string()),
            ("by", "position".to_string()),
            ("lat", coordinates.latitude.to_string()),
            ("lng", coordinates.longitude.to_string()),
        ];

        let response: TimezoneResponse = self.http.get_json(&url, &params).await?;
        Ok(response.zone_name)
    }
}

#[derive(Debug, Deserialize)]
struct TimezoneResponse {
    #[serde(rename = "zoneName")]
    zone_name: String,
}
