use thiserror::Error;
use watchtime_sources::SourceError;

/// Every failure a tracker operation can surface to a caller
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    UpstreamUnavailable(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    InvalidInput(String),
}

impl TrackerError {
    /// Stable identifier used in error responses
    pub fn kind(&self) -> &'static str {
        match self {
            TrackerError::Configuration(_) => "configuration",
            TrackerError::NotFound(_) => "not_found",
            TrackerError::UpstreamUnavailable(_) => "upstream_unavailable",
            TrackerError::RateLimited(_) => "rate_limited",
            TrackerError::Duplicate(_) => "duplicate",
            TrackerError::InvalidInput(_) => "invalid_input",
        }
    }
}

impl From<SourceError> for TrackerError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::Configuration(m) => TrackerError::Configuration(m),
            SourceError::NotFound(m) => TrackerError::NotFound(m),
            SourceError::UpstreamUnavailable(m) => TrackerError::UpstreamUnavailable(m),
            SourceError::RateLimited(m) => TrackerError::RateLimited(m),
        }
    }
}
