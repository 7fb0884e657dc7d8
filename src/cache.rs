//! Persistent response cache
//!
//! Entries carry the timestamp they were stored at; freshness is decided at
//! read time against the caller's TTL. Expired entries are removed on read
//! and reported as a miss. There is no size-based eviction and no
//! stale-while-revalidate: an expired entry is simply refetched by the
//! caller.

use crate::error::{PpgReportError, Result};
use fjall::Keyspace;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task;

/// Partition name, namespaced so unrelated cached data cannot collide.
pub const HTTP_CACHE_NAMESPACE: &str = "ppg-report-http-cache";

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    stored_at: u64, // Unix timestamp (seconds)
}

/// On-disk key-value store for slow-changing provider responses
pub struct PersistentCache {
    store: Keyspace,
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    let value = store
        .get(key)
        .map_err(|e| PpgReportError::cache(e.to_string()))?;
    Ok(value.map(|v| v.to_vec()))
}

fn now_unix() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| PpgReportError::cache(e.to_string()))?
        .as_secs())
}

impl PersistentCache {
    /// Open (or create) the cache store at the given directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path)
            .open()
            .map_err(|e| PpgReportError::cache(format!("Failed to open cache database: {e}")))?;
        let store = db
            .keyspace(HTTP_CACHE_NAMESPACE, fjall::KeyspaceCreateOptions::default)
            .map_err(|e| PpgReportError::cache(e.to_string()))?;
        Ok(PersistentCache { store })
    }

    /// Stores a serializable value stamped with the current time.
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub async fn put<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
    ) -> Result<()> {
        self.put_at(key, value, now_unix()?).await
    }

    /// Stores a value with an explicit storage timestamp.
    pub(crate) async fn put_at<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
        stored_at: u64,
    ) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let entry = StoredEntry { value, stored_at };
        let bytes = postcard::to_stdvec(&entry).map_err(|e| PpgReportError::cache(e.to_string()))?;

        task::spawn_blocking(move || store.insert(key, bytes))
            .await
            .map_err(|e| PpgReportError::cache(e.to_string()))?
            .map_err(|e| PpgReportError::cache(e.to_string()))?;
        Ok(())
    }

    /// Retrieves a value if it exists and is younger than `ttl`.
    /// Returns `None` for cache misses and expired entries.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self, ttl))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(
        &self,
        key: &str,
        ttl: Duration,
    ) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || get_from_store(store, key_bytes))
                .await
                .map_err(|e| PpgReportError::cache(e.to_string()))??;

        if let Some(bytes) = maybe_bytes {
            let entry: StoredEntry<T> =
                postcard::from_bytes(&bytes).map_err(|e| PpgReportError::cache(e.to_string()))?;
            let now = now_unix()?;

            if now.saturating_sub(entry.stored_at) < ttl.as_secs() {
                tracing::debug!("Key found and still fresh");
                Ok(Some(entry.value))
            } else {
                tracing::debug!("Key found but expired");
                self.remove(key).await?;
                Ok(None)
            }
        } else {
            tracing::debug!("Key not found");
            Ok(None)
        }
    }

    /// Manually removes a key from the cache.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(key))
            .await
            .map_err(|e| PpgReportError::cache(e.to_string()))?
            .map_err(|e| PpgReportError::cache(e.to_string()))?;
        Ok(())
    }
}
