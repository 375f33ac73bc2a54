use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use watchtime_config::{mask_secret, ProviderConfig, OMDB_API_KEY_ENV};
use watchtime_models::MovieRecord;

use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::{MetadataProvider, SearchHit};

/// Prefix that marks watch-list ids as OMDb titles
pub const RECORD_ID_PREFIX: &str = "omdb_";

const USER_AGENT: &str = concat!("watchtime/", env!("CARGO_PKG_VERSION"));

/// Create a reqwest Client with the request timeout applied to every call
pub fn create_omdb_client(timeout: Duration) -> Result<Client, SourceError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| SourceError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
    search_type: Option<String>,
}

impl OmdbClient {
    pub fn new(config: &ProviderConfig, api_key: Option<String>) -> Result<Self, SourceError> {
        Ok(Self {
            client: Arc::new(create_omdb_client(config.timeout())?),
            base_url: config.base_url.clone(),
            api_key,
            search_type: config.search_type.clone(),
        })
    }

    fn api_key(&self) -> Result<&str, SourceError> {
        self.api_key.as_deref().ok_or_else(|| {
            SourceError::Configuration(format!(
                "OMDb API key not configured. Set {} or run `watchtime config set-key`.",
                OMDB_API_KEY_ENV
            ))
        })
    }
}

#[async_trait]
impl MetadataProvider for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn credential_preview(&self) -> Option<String> {
        self.api_key.as_deref().map(mask_secret)
    }

    fn record_id(&self, native_id: &str) -> String {
        format!("{}{}", RECORD_ID_PREFIX, native_id)
    }

    /// Ids are taken verbatim; padded or blank suffixes are rejected rather than trimmed
    fn native_id(&self, record_id: &str) -> Option<String> {
        record_id
            .strip_prefix(RECORD_ID_PREFIX)
            .filter(|id| !id.is_empty() && !id.contains(char::is_whitespace))
            .map(str::to_string)
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<SearchHit>, SourceError> {
        let api_key = self.api_key()?;
        debug!(query = %query, api_key = %mask_secret(api_key), "Searching OMDb");
        api::search(&self.client, &self.base_url, api_key, query, self.search_type.as_deref()).await
    }

    async fn get_title(&self, native_id: &str) -> Result<MovieRecord, SourceError> {
        let api_key = self.api_key()?;
        let record_id = self.record_id(native_id);
        api::get_title(&self.client, &self.base_url, api_key, native_id, record_id).await
    }
}
