use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use watchtime_config::Config;
use watchtime_models::{MovieRecord, WatchEntry, WatchStats};
use watchtime_sources::MetadataProvider;

use crate::cache::SearchCache;
use crate::error::TrackerError;
use crate::search::SearchProxy;
use crate::stats;
use crate::store::{already_watched, WatchStore};

#[derive(Debug, Clone)]
pub struct TrackerOptions {
    pub max_results: usize,
    pub cache_ttl: Duration,
    pub cache_max_entries: usize,
    pub goal_hours: f64,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl TrackerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_results: config.provider.max_results,
            cache_ttl: config.cache.ttl(),
            cache_max_entries: config.cache.max_entries,
            goal_hours: config.client.goal_hours,
        }
    }
}

/// Result of a provider connectivity check
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub provider: String,
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_preview: Option<String>,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The watch-time service: search proxy, watch list and statistics.
///
/// Created once at startup and shared by reference with every request
/// handler; a fresh instance is a fresh, empty watch list.
pub struct Tracker {
    search: SearchProxy,
    store: WatchStore,
    goal_hours: f64,
}

impl Tracker {
    pub fn new(provider: Arc<dyn MetadataProvider>, options: TrackerOptions) -> Self {
        let cache = SearchCache::new(options.cache_ttl, options.cache_max_entries);
        Self {
            search: SearchProxy::new(provider, options.max_results, cache),
            store: WatchStore::new(),
            goal_hours: options.goal_hours,
        }
    }

    pub fn goal_hours(&self) -> f64 {
        self.goal_hours
    }

    pub async fn search(&self, query: &str) -> Result<Vec<MovieRecord>, TrackerError> {
        self.search.search(query).await
    }

    /// Mark a title as watched, snapshotting its current metadata
    pub async fn add(&self, movie_id: &str) -> Result<MovieRecord, TrackerError> {
        let provider = self.search.provider();
        let invalid = || {
            TrackerError::InvalidInput(format!(
                "Invalid movie ID format: '{}'. Only {} movies are supported.",
                movie_id,
                provider.source_name()
            ))
        };
        let native_id = provider.native_id(movie_id).ok_or_else(invalid)?;
        // The watch list is keyed by id; only canonical ids may enter it
        if provider.record_id(&native_id) != movie_id {
            return Err(invalid());
        }

        // Fast path; the authoritative check happens inside `insert`
        if let Some(existing) = self.store.get(movie_id).await {
            return Err(already_watched(&existing.movie.title));
        }

        let record = self.search.resolve(movie_id, &native_id).await?;
        self.store.insert(WatchEntry::new(record.clone())).await?;
        Ok(record)
    }

    pub async fn remove(&self, movie_id: &str) -> Result<WatchEntry, TrackerError> {
        self.store.remove(movie_id).await
    }

    pub async fn list(&self) -> Vec<WatchEntry> {
        self.store.list().await
    }

    pub async fn list_recent(&self) -> Vec<WatchEntry> {
        self.store.list_recent().await
    }

    pub async fn clear(&self) -> usize {
        self.store.clear().await
    }

    pub async fn stats(&self) -> WatchStats {
        let entries = self.store.list().await;
        stats::aggregate(&entries, self.goal_hours)
    }

    pub async fn provider_status(&self) -> ProviderStatus {
        let provider = self.search.provider();
        let mut status = ProviderStatus {
            provider: provider.source_name().to_string(),
            api_key_configured: provider.is_configured(),
            api_key_preview: provider.credential_preview(),
            reachable: false,
            error_kind: None,
            error: None,
        };

        match provider.check().await {
            Ok(()) => {
                status.reachable = true;
                info!(
                    operation = "provider_check",
                    provider = %status.provider,
                    "Metadata provider reachable"
                );
            }
            Err(e) => {
                warn!(
                    operation = "provider_check",
                    provider = %status.provider,
                    error = %e,
                    "Metadata provider check failed"
                );
                status.error_kind = Some(e.kind().to_string());
                status.error = Some(e.to_string());
            }
        }
        status
    }
}
