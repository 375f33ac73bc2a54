use serde::{Deserialize, Serialize};
use std::fmt;

/// A searchable title, normalized from the metadata provider's response.
///
/// `id` is provider-derived and must be preserved verbatim; it is the key the
/// watch list uses for duplicate detection and removal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    /// Release year as the provider reports it (series use ranges like "2008–2013")
    pub year: String,
    /// Runtime in minutes; 0 when the provider omits it or it cannot be parsed
    pub duration: u32,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
}

impl MovieRecord {
    /// Minimal record with no enrichment fields
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        duration: u32,
        media_type: MediaType,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
            duration,
            media_type,
            imdb_id: None,
            poster: None,
            plot: None,
            genre: None,
            director: None,
            actors: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    /// Map a provider type string; anything that is not a movie is treated as a series
    pub fn from_provider(value: &str) -> Self {
        if value.eq_ignore_ascii_case("movie") {
            MediaType::Movie
        } else {
            MediaType::Series
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
