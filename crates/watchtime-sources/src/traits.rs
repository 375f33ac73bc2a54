use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use watchtime_models::{MediaType, MovieRecord};
use crate::error::SourceError;

/// Summary hit from a provider title search, before the detail lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    pub native_id: String,
    pub title: String,
    pub year: String,
    pub media_type: MediaType,
}

#[async_trait]
pub trait MetadataProvider: Send + Sync {
    // Source metadata
    fn source_name(&self) -> &str;

    /// Whether a credential is available. Calls still fail with
    /// `SourceError::Configuration` when this is false.
    fn is_configured(&self) -> bool;

    /// Short masked form of the credential for status output
    fn credential_preview(&self) -> Option<String> {
        None
    }

    // Id mapping between watch-list ids and provider-native ids
    fn record_id(&self, native_id: &str) -> String;
    fn native_id(&self, record_id: &str) -> Option<String>;

    // Data retrieval
    async fn search_titles(&self, query: &str) -> Result<Vec<SearchHit>, SourceError>;
    async fn get_title(&self, native_id: &str) -> Result<MovieRecord, SourceError>;

    /// Connectivity probe; default runs a known-good title search
    async fn check(&self) -> Result<(), SourceError> {
        self.search_titles("The Matrix").await.map(|_| ())
    }
}
