use thiserror::Error;

/// Failures talking to the metadata provider.
///
/// Each variant has a stable machine-readable [`kind`](SourceError::kind) so the
/// request boundary can map it without inspecting messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Missing or rejected provider credential
    #[error("{0}")]
    Configuration(String),
    /// The provider has no data for the query or id
    #[error("{0}")]
    NotFound(String),
    /// Transport failure, timeout, 5xx or an unreadable response
    #[error("{0}")]
    UpstreamUnavailable(String),
    /// Provider quota exhausted
    #[error("{0}")]
    RateLimited(String),
}

impl SourceError {
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::Configuration(_) => "configuration",
            SourceError::NotFound(_) => "not_found",
            SourceError::UpstreamUnavailable(_) => "upstream_unavailable",
            SourceError::RateLimited(_) => "rate_limited",
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SourceError::UpstreamUnavailable(
                "Metadata provider did not respond in time".to_string(),
            )
        } else if e.is_decode() {
            SourceError::UpstreamUnavailable(format!(
                "Malformed response from metadata provider: {}",
                e
            ))
        } else {
            SourceError::UpstreamUnavailable(format!("Metadata provider unreachable: {}", e))
        }
    }
}
