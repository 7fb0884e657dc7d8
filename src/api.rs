//! HTTP API routes for the report front-end

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::geo::{self, Coordinates};
use crate::site::{SiteDetails, SiteResolver};

/// Shared services behind the API routes
#[derive(Clone)]
pub struct ApiState {
    pub sites: Arc<SiteResolver>,
}

#[derive(Debug, Deserialize)]
pub struct PositionQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct CoverageResponse {
    pub within_usa: bool,
    pub within_rap_coverage: bool,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/site", get(get_site))
        .route("/coverage", get(get_coverage))
        .with_state(state)
}

async fn get_site(
    State(state): State<ApiState>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<SiteDetails>, StatusCode> {
    let coordinates = Coordinates::new(query.lat, query.lon);
    match state.sites.resolve(coordinates).await {
        Ok(details) => Ok(Json(details)),
        Err(e) => {
            error!("Site resolution failed: {}", e.user_message());
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

async fn get_coverage(Query(query): Query<PositionQuery>) -> Json<CoverageResponse> {
    Json(CoverageResponse {
        within_usa: geo::is_possibly_within_usa(query.lat, query.lon),
        within_rap_coverage: geo::is_within_rap_model_coverage(query.lat, query.lon),
    })
}
