//! End-to-end tests for the resolver chain over a scripted transport

use async_trait::async_trait;
use ppg_report::{
    CachedHttpClient, Coordinates, ElevationResolver, HttpTransport, PersistentCache,
    PpgReportError, SiteResolver, TimezoneResolver,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

const BASE_URL: &str = "https://ppg.report";

/// Transport answering by URL fragment; `None` scripts a failure
struct RouteTransport {
    calls: AtomicUsize,
    routes: Vec<(&'static str, Option<String>)>,
}

impl RouteTransport {
    fn new(routes: Vec<(&'static str, Option<String>)>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            routes,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpTransport for RouteTransport {
    async fn get(&self, url: &str) -> ppg_report::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        for (fragment, body) in &self.routes {
            if url.contains(fragment) {
                return match body {
                    Some(body) => Ok(body.clone()),
                    None => Err(PpgReportError::api(format!("scripted failure for {fragment}"))),
                };
            }
        }
        panic!("unexpected request: {url}");
    }
}

fn primary_body(elevation: f64) -> Option<String> {
    Some(format!(
        r#"{{ "USGS_Elevation_Point_Query_Service": {{ "Elevation_Query": {{ "Elevation": {elevation} }} }} }}"#
    ))
}

fn backup_body(status: &str, elevations: &[f64]) -> Option<String> {
    let results: Vec<String> = elevations
        .iter()
        .map(|e| format!(r#"{{ "elevation": {e} }}"#))
        .collect();
    Some(format!(
        r#"{{ "status": "{status}", "results": [{}] }}"#,
        results.join(", ")
    ))
}

fn resolvers(
    dir: &TempDir,
    transport: Arc<RouteTransport>,
) -> (ElevationResolver, TimezoneResolver) {
    let cache = Arc::new(PersistentCache::open(dir.path()).unwrap());
    let http = Arc::new(CachedHttpClient::with_transport(cache, transport));
    (
        ElevationResolver::new(http.clone(), BASE_URL),
        TimezoneResolver::new(http, BASE_URL),
    )
}

#[tokio::test]
async fn primary_elevation_answers_without_backup() {
    let dir = TempDir::new().unwrap();
    let transport = RouteTransport::new(vec![("/api/pqs", primary_body(1608.6))]);
    let (elevation, _) = resolvers(&dir, transport.clone());

    let meters = elevation
        .elevation(&Coordinates::new(39.7392, -104.9903))
        .await
        .unwrap();
    assert_eq!(meters, 1608.6);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn no_data_sentinel_falls_back_to_backup() {
    let dir = TempDir::new().unwrap();
    let transport = RouteTransport::new(vec![
        ("/api/pqs", primary_body(-1_000_000.0)),
        ("/api/googleelevation", backup_body("OK", &[123.4])),
    ]);
    let (elevation, _) = resolvers(&dir, transport.clone());

    let meters = elevation
        .elevation(&Coordinates::new(39.7392, -104.9903))
        .await
        .unwrap();
    assert_eq!(meters, 123.4);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn primary_failure_falls_back_to_backup() {
    let dir = TempDir::new().unwrap();
    let transport = RouteTransport::new(vec![
        ("/api/pqs", None),
        ("/api/googleelevation", backup_body("OK", &[88.0])),
    ]);
    let (elevation, _) = resolvers(&dir, transport);

    let meters = elevation
        .elevation(&Coordinates::new(47.6062, -122.3321))
        .await
        .unwrap();
    assert_eq!(meters, 88.0);
}

#[tokio::test]
async fn backup_rejection_is_a_descriptive_error() {
    let dir = TempDir::new().unwrap();
    let transport = RouteTransport::new(vec![
        ("/api/pqs", primary_body(-1_000_000.0)),
        ("/api/googleelevation", backup_body("INVALID_REQUEST", &[])),
    ]);
    let (elevation, _) = resolvers(&dir, transport);

    let error = elevation
        .elevation(&Coordinates::new(39.7392, -104.9903))
        .await
        .unwrap_err();
    assert!(
        error
            .to_string()
            .contains("could not fetch backup elevation for site")
    );
}

#[tokio::test]
async fn backup_without_results_is_an_error() {
    let dir = TempDir::new().unwrap();
    let transport = RouteTransport::new(vec![
        ("/api/pqs", None),
        ("/api/googleelevation", backup_body("OK", &[])),
    ]);
    let (elevation, _) = resolvers(&dir, transport);

    let error = elevation
        .elevation(&Coordinates::new(39.7392, -104.9903))
        .await
        .unwrap_err();
    assert!(
        error
            .to_string()
            .contains("could not fetch backup elevation for site")
    );
}

#[tokio::test]
async fn timezone_failure_propagates() {
    let dir = TempDir::new().unwrap();
    let transport = RouteTransport::new(vec![("/api/timezone", None)]);
    let (_, timezone) = resolvers(&dir, transport);

    let error = timezone
        .timezone(&Coordinates::new(39.7392, -104.9903))
        .await
        .unwrap_err();
    assert!(matches!(error, PpgReportError::Api { .. }));
}

#[tokio::test]
async fn site_resolution_composes_and_caches() {
    let dir = TempDir::new().unwrap();
    let transport = RouteTransport::new(vec![
        ("/api/pqs", primary_body(1608.6)),
        (
            "/api/timezone",
            Some(r#"{ "zoneName": "America/Denver" }"#.to_string()),
        ),
    ]);
    let (elevation, timezone) = resolvers(&dir, transport.clone());
    let sites = SiteResolver::new(elevation, timezone);

    let denver = Coordinates::new(39.7392, -104.9903);
    let details = sites.resolve(denver).await.unwrap();
    assert_eq!(details.elevation_m, 1608.6);
    assert_eq!(details.timezone, "America/Denver");
    assert!(details.within_usa);
    assert!(details.within_rap_coverage);
    assert_eq!(transport.calls(), 2);

    // A second resolve within the TTL is served entirely from the cache
    let again = sites.resolve(denver).await.unwrap();
    assert_eq!(again.elevation_m, 1608.6);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn out_of_coverage_site_is_flagged() {
    let dir = TempDir::new().unwrap();
    let transport = RouteTransport::new(vec![
        ("/api/pqs", primary_body(35.0)),
        (
            "/api/timezone",
            Some(r#"{ "zoneName": "Europe/London" }"#.to_string()),
        ),
    ]);
    let (elevation, timezone) = resolvers(&dir, transport);
    let sites = SiteResolver::new(elevation, timezone);

    let london = Coordinates::new(51.5074, -0.1278);
    let details = sites.resolve(london).await.unwrap();
    assert!(!details.within_usa);
    assert!(!details.within_rap_coverage);
}
