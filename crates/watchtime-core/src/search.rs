use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use watchtime_models::MovieRecord;
use watchtime_sources::{MetadataProvider, SourceError};

use crate::cache::SearchCache;
use crate::error::TrackerError;

/// Forwards title searches to the metadata provider and normalizes the results.
///
/// Records from cached searches are reused when the watch list snapshots a
/// title, so adding a fresh search result needs no second provider call.
pub struct SearchProxy {
    provider: Arc<dyn MetadataProvider>,
    max_results: usize,
    cache: Mutex<SearchCache>,
}

impl SearchProxy {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        max_results: usize,
        cache: SearchCache,
    ) -> Self {
        Self {
            provider,
            max_results,
            cache: Mutex::new(cache),
        }
    }

    pub fn provider(&self) -> &Arc<dyn MetadataProvider> {
        &self.provider
    }

    /// Search by title.
    ///
    /// Blank queries return an empty list without touching the provider.
    pub async fn search(&self, query: &str) -> Result<Vec<MovieRecord>, TrackerError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(cached) = self.cache.lock().await.get(query) {
            return Ok(cached);
        }

        let hits = self.provider.search_titles(query).await?;
        if hits.is_empty() {
            return Err(no_matches(query));
        }

        let lookups = hits
            .iter()
            .take(self.max_results)
            .map(|hit| self.provider.get_title(&hit.native_id));
        let details = join_all(lookups).await;

        let mut results = Vec::with_capacity(details.len());
        let mut first_error: Option<SourceError> = None;
        for (hit, detail) in hits.iter().zip(details) {
            match detail {
                Ok(record) => results.push(record),
                Err(e) => {
                    warn!(
                        operation = "search_detail",
                        native_id = %hit.native_id,
                        error = %e,
                        "Skipping search hit whose detail lookup failed"
                    );
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        if results.is_empty() {
            return Err(first_error.map(TrackerError::from).unwrap_or_else(|| no_matches(query)));
        }

        info!(operation = "search", query = %query, results = results.len(), "Search completed");
        self.cache.lock().await.insert(query, results.clone());
        Ok(results)
    }

    /// Resolve a watch-list id to a record, preferring live cached search results
    pub async fn resolve(
        &self,
        record_id: &str,
        native_id: &str,
    ) -> Result<MovieRecord, TrackerError> {
        if let Some(record) = self.cache.lock().await.find_record(record_id) {
            debug!(movie_id = %record_id, "Resolved movie from search results");
            return Ok(record);
        }

        let mut record = self.provider.get_title(native_id).await.map_err(|e| match e {
            SourceError::NotFound(_) => TrackerError::NotFound(format!(
                "Movie '{}' not found in {}",
                record_id,
                self.provider.source_name()
            )),
            other => other.into(),
        })?;
        record.id = record_id.to_string();
        Ok(record)
    }
}

fn no_matches(query: &str) -> TrackerError {
    TrackerError::NotFound(format!(
        "No movies found for '{}'. Please check your search term or try a different query.",
        query
    ))
}
