// src/api/cache.rs
//! Disk-based response cache for wiki API calls.
//!
//! Raw response bodies are stored per request, keyed by the full endpoint
//! URL and the canonical parameter string. A hit is re-parsed through the
//! same parser as a live response, so the domain model is never serialized.

use super::client::{extract_response_text, ApiResponse, MediaWikiHttpClient};
use super::parser;
use super::types::{QueryParams, QueryResponse};
use super::WikiRepository;
use crate::error::AppError;
use std::collections::hash_map::DefaultHasher;
use std::ffi::OsStr;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// ---------------------------------------------------------------------------
// Disk cache
// ---------------------------------------------------------------------------

/// What a lookup found for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Fresh(String),
    /// An entry existed but outlived the TTL; it has been removed.
    Expired,
    Missing,
}

/// One response body on disk. The key is stored alongside the body so a
/// file-name hash collision reads as a miss.
#[derive(serde::Serialize, serde::Deserialize)]
struct CacheEntry {
    key: String,
    body: String,
    stored_at: u64,
}

impl CacheEntry {
    fn is_stale(&self, ttl: Duration, now: u64) -> bool {
        now.saturating_sub(self.stored_at) > ttl.as_secs()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

async fn read_entry(path: &Path) -> Option<CacheEntry> {
    let bytes = tokio::fs::read(path).await.ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// TTL-bounded directory of response bodies, one JSON file per request.
#[derive(Debug)]
pub struct DiskCache {
    dir: PathBuf,
    ttl: Duration,
}

impl DiskCache {
    /// Opens (creating if needed) a cache rooted at `dir` and sweeps out
    /// stale entries and half-written files.
    pub async fn open(dir: PathBuf, ttl: Duration) -> io::Result<Self> {
        tokio::fs::create_dir_all(&dir).await?;
        let cache = Self { dir, ttl };
        match cache.sweep().await {
            Ok(0) => {}
            Ok(removed) => log::debug!("Removed {} stale cache files", removed),
            Err(e) => log::warn!("Cache sweep of {} failed: {}", cache.dir.display(), e),
        }
        Ok(cache)
    }

    /// `$XDG_CACHE_HOME/catwalk`, falling back to `~/.cache/catwalk` and
    /// then to the system temp directory.
    pub fn default_dir() -> PathBuf {
        let non_empty = |var: &str| std::env::var_os(var).filter(|v| !v.is_empty());
        non_empty("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(".cache")))
            .unwrap_or_else(std::env::temp_dir)
            .join("catwalk")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn lookup(&self, key: &str) -> Lookup {
        let path = self.entry_path(key);
        match read_entry(&path).await {
            Some(entry) if entry.key == key => {
                if entry.is_stale(self.ttl, unix_now()) {
                    let _ = tokio::fs::remove_file(&path).await;
                    Lookup::Expired
                } else {
                    Lookup::Fresh(entry.body)
                }
            }
            _ => Lookup::Missing,
        }
    }

    /// Writes `body` under `key`. The file is written beside its final
    /// name and renamed into place, so readers never see a partial entry.
    pub async fn store(&self, key: &str, body: &str) -> io::Result<()> {
        let entry = CacheEntry {
            key: key.to_string(),
            body: body.to_string(),
            stored_at: unix_now(),
        };
        let path = self.entry_path(key);
        let partial = path.with_extension("tmp");
        tokio::fs::write(&partial, serde_json::to_vec(&entry)?).await?;
        tokio::fs::rename(&partial, &path).await
    }

    /// Deletes expired or unreadable entries and leftover `.tmp` files.
    async fn sweep(&self) -> io::Result<usize> {
        let now = unix_now();
        let mut files = tokio::fs::read_dir(&self.dir).await?;
        let mut removed = 0;

        while let Some(file) = files.next_entry().await? {
            let path = file.path();
            let doomed = match path.extension().and_then(OsStr::to_str) {
                Some("json") => read_entry(&path)
                    .await
                    .map_or(true, |entry| entry.is_stale(self.ttl, now)),
                Some("tmp") => true,
                _ => false,
            };
            if doomed && tokio::fs::remove_file(&path).await.is_ok() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        self.dir.join(format!("{:016x}.json", hasher.finish()))
    }
}

// ---------------------------------------------------------------------------
// Cached wiki client
// ---------------------------------------------------------------------------

/// A [`WikiRepository`] that serves repeated requests from a [`DiskCache`].
/// Only successful responses are stored.
pub struct CachedWikiClient {
    inner: MediaWikiHttpClient,
    cache: DiskCache,
}

impl CachedWikiClient {
    /// Wraps an HTTP client with a cache in the default directory.
    pub async fn new(inner: MediaWikiHttpClient, ttl_secs: u64) -> Result<Self, AppError> {
        Self::with_dir(inner, DiskCache::default_dir(), ttl_secs).await
    }

    /// Wraps an HTTP client with a cache rooted at `cache_dir`.
    pub async fn with_dir(
        inner: MediaWikiHttpClient,
        cache_dir: PathBuf,
        ttl_secs: u64,
    ) -> Result<Self, AppError> {
        let cache = DiskCache::open(cache_dir, Duration::from_secs(ttl_secs))
            .await
            .map_err(|e| AppError::InternalError {
                message: format!("Failed to initialize disk cache: {}", e),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { inner, cache })
    }

    /// Full endpoint URL plus params: wikis sharing a host stay apart.
    fn cache_key(&self, params: &QueryParams) -> String {
        format!("{}?{}", self.inner.endpoint().as_str(), params)
    }
}

#[async_trait::async_trait]
impl WikiRepository for CachedWikiClient {
    async fn execute(&self, params: &QueryParams) -> Result<QueryResponse, AppError> {
        let key = self.cache_key(params);

        match self.cache.lookup(&key).await {
            Lookup::Fresh(body) => {
                log::debug!("Cache hit: {}", key);
                return parser::parse_api_response(ApiResponse {
                    data: body,
                    status: reqwest::StatusCode::OK,
                    url: format!("cache:{}", key),
                });
            }
            Lookup::Expired => log::debug!("Cache entry expired: {}", key),
            Lookup::Missing => log::debug!("Cache miss: {}", key),
        }

        let response = self.inner.get(params).await?;
        let api_response = extract_response_text(response).await?;

        // Parse before storing so error envelopes are never cached.
        let body = api_response.data.clone();
        let parsed = parser::parse_api_response(api_response)?;
        if let Err(e) = self.cache.store(&key, &body).await {
            log::warn!("Could not cache response for {}: {}", key, e);
        }
        Ok(parsed)
    }

    fn member_batch_size(&self) -> Option<u32> {
        self.inner.member_batch_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ApiUrl, UserAgent};

    const HOUR: Duration = Duration::from_secs(3600);

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("catwalk-cache-{}-{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn stored_bodies_are_returned_fresh() {
        let dir = scratch_dir("fresh");
        let cache = DiskCache::open(dir.clone(), HOUR).await.unwrap();

        assert_eq!(cache.lookup("k").await, Lookup::Missing);
        cache.store("k", "{\"query\":{}}").await.unwrap();
        assert_eq!(
            cache.lookup("k").await,
            Lookup::Fresh("{\"query\":{}}".to_string())
        );

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn expired_entry_is_reported_then_gone() {
        let dir = scratch_dir("expired");
        let cache = DiskCache::open(dir.clone(), HOUR).await.unwrap();
        let stale = CacheEntry {
            key: "old".to_string(),
            body: "{}".to_string(),
            stored_at: 0,
        };
        tokio::fs::write(cache.entry_path("old"), serde_json::to_vec(&stale).unwrap())
            .await
            .unwrap();

        assert_eq!(cache.lookup("old").await, Lookup::Expired);
        assert_eq!(cache.lookup("old").await, Lookup::Missing);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn open_sweeps_stale_and_partial_files() {
        let dir = scratch_dir("sweep");
        let cache = DiskCache::open(dir.clone(), HOUR).await.unwrap();
        cache.store("fresh", "{}").await.unwrap();
        tokio::fs::write(cache.entry_path("old"), b"not json")
            .await
            .unwrap();
        let partial = cache.entry_path("half").with_extension("tmp");
        tokio::fs::write(&partial, b"{").await.unwrap();

        let reopened = DiskCache::open(dir.clone(), HOUR).await.unwrap();
        assert!(!reopened.entry_path("old").exists());
        assert!(!partial.exists());
        assert_eq!(reopened.lookup("fresh").await, Lookup::Fresh("{}".to_string()));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn wikis_on_one_host_do_not_share_keys() {
        let dir = scratch_dir("farm");
        let client = |url: &str| {
            MediaWikiHttpClient::new(ApiUrl::parse(url).unwrap(), &UserAgent::default()).unwrap()
        };
        let en = CachedWikiClient::with_dir(
            client("https://farm.example.org/en/api.php"),
            dir.clone(),
            60,
        )
        .await
        .unwrap();
        let de = CachedWikiClient::with_dir(
            client("http://farm.example.org:8080/de/api.php"),
            dir.clone(),
            60,
        )
        .await
        .unwrap();

        let params = QueryParams::query().with("meta", "siteinfo");
        assert_ne!(en.cache_key(&params), de.cache_key(&params));
        assert_eq!(
            en.cache_key(&params),
            "https://farm.example.org/en/api.php?action=query&meta=siteinfo"
        );

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
