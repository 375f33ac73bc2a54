use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use watchtime_models::{MediaType, MovieRecord};
use watchtime_sources::{MetadataProvider, SearchHit, SourceError};

/// In-memory provider with call counters
#[derive(Default)]
pub struct StubProvider {
    titles: HashMap<String, MovieRecord>,
    searches: HashMap<String, Vec<String>>,
    failing_titles: HashMap<String, SourceError>,
    search_error: Mutex<Option<SourceError>>,
    lookup_delay: Option<Duration>,
    unconfigured: bool,
    trims_ids: bool,
    pub search_calls: AtomicUsize,
    pub title_calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a title and make it the result of `query`
    pub fn with_title(mut self, query: &str, native_id: &str, title: &str, duration: u32) -> Self {
        let id = format!("omdb_{}", native_id);
        let record = MovieRecord::new(id, title, "2001", duration, MediaType::Movie);
        self.titles.insert(native_id.to_string(), record);
        self.searches
            .entry(query.to_lowercase())
            .or_default()
            .push(native_id.to_string());
        self
    }

    /// A search hit whose detail lookup fails
    pub fn with_failing_title(mut self, query: &str, native_id: &str, error: SourceError) -> Self {
        self.failing_titles.insert(native_id.to_string(), error);
        self.searches
            .entry(query.to_lowercase())
            .or_default()
            .push(native_id.to_string());
        self
    }

    pub fn with_search_error(self, error: SourceError) -> Self {
        *self.search_error.lock().unwrap() = Some(error);
        self
    }

    pub fn with_lookup_delay(mut self, delay: Duration) -> Self {
        self.lookup_delay = Some(delay);
        self
    }

    /// Accept ids with padding around the native part, as a lenient provider might
    pub fn with_trimmed_ids(mut self) -> Self {
        self.trims_ids = true;
        self
    }

    pub fn unconfigured(mut self) -> Self {
        self.unconfigured = true;
        self
    }

    pub fn clear_search_error(&self) {
        *self.search_error.lock().unwrap() = None;
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.title_calls.load(Ordering::SeqCst)
    }

    fn missing_key() -> SourceError {
        SourceError::Configuration("OMDb API key not configured".to_string())
    }
}

#[async_trait]
impl MetadataProvider for StubProvider {
    fn source_name(&self) -> &str {
        "stub"
    }

    fn is_configured(&self) -> bool {
        !self.unconfigured
    }

    fn credential_preview(&self) -> Option<String> {
        (!self.unconfigured).then(|| "stub-key...".to_string())
    }

    fn record_id(&self, native_id: &str) -> String {
        format!("omdb_{}", native_id)
    }

    fn native_id(&self, record_id: &str) -> Option<String> {
        record_id
            .strip_prefix("omdb_")
            .map(|id| if self.trims_ids { id.trim() } else { id })
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<SearchHit>, SourceError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.unconfigured {
            return Err(Self::missing_key());
        }
        if let Some(error) = self.search_error.lock().unwrap().clone() {
            return Err(error);
        }

        let ids = self
            .searches
            .get(&query.to_lowercase())
            .ok_or_else(|| SourceError::NotFound("Movie not found!".to_string()))?;

        Ok(ids
            .iter()
            .map(|id| SearchHit {
                native_id: id.clone(),
                title: self.titles.get(id).map(|t| t.title.clone()).unwrap_or_default(),
                year: "2001".to_string(),
                media_type: MediaType::Movie,
            })
            .collect())
    }

    async fn get_title(&self, native_id: &str) -> Result<MovieRecord, SourceError> {
        self.title_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.lookup_delay {
            tokio::time::sleep(delay).await;
        }
        if self.unconfigured {
            return Err(Self::missing_key());
        }
        if let Some(error) = self.failing_titles.get(native_id) {
            return Err(error.clone());
        }
        self.titles
            .get(native_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound("Incorrect IMDb ID.".to_string()))
    }
}
