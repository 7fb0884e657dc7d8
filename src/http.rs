//! Cached HTTP client for slow-changing provider data
//!
//! Wraps an HTTP transport with the persistent cache: responses are stored
//! under a key derived from the full request signature and replayed for 15
//! minutes. Transport failures propagate to the caller unchanged and leave
//! the cache untouched.

use crate::cache::PersistentCache;
use crate::error::{PpgReportError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// How long a cached response stays valid. Applies to every request; there
/// is no per-request override.
pub const RESPONSE_TTL: Duration = Duration::from_secs(15 * 60);

/// Transport seam between the cache layer and the network
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a GET and return the response body.
    async fn get(&self, url: &str) -> Result<String>;
}

/// reqwest-backed transport used outside of tests
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ppg-report/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// HTTP client with a persistent read-through cache
pub struct CachedHttpClient {
    transport: Arc<dyn HttpTransport>,
    cache: Arc<PersistentCache>,
}

impl CachedHttpClient {
    pub fn new(cache: Arc<PersistentCache>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            transport: Arc::new(ReqwestTransport::new(timeout)?),
            cache,
        })
    }

    /// Build a client over a custom transport.
    pub fn with_transport(cache: Arc<PersistentCache>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport, cache }
    }

    /// GET a JSON resource, serving from the cache when a fresh entry exists.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let request_url = build_url(url, params);
        let key = request_key("GET", &request_url);

        if let Some(body) = self.cache.get::<String>(&key, RESPONSE_TTL).await? {
            debug!(url = %request_url, "Serving response from cache");
            return parse_body(&body);
        }

        let body = self.transport.get(&request_url).await?;
        self.cache.put(&key, body.clone()).await?;
        parse_body(&body)
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| PpgReportError::api(format!("Failed to parse provider response: {e}")))
}

fn build_url(url: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let query: Vec<String> = params
        .iter()
        .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
        .collect();
    format!("{url}?{}", query.join("&"))
}

/// Cache key for a request. The full query string participates, pagination
/// parameters included: repeated pages are cached like any other request.
fn request_key(method: &str, request_url: &str) -> String {
    format!("{method} {request_url}")
}
