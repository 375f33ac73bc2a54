use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::media::MovieRecord;

/// One decision to mark a title as watched.
///
/// `movie` is a snapshot taken when the entry was created; later provider
/// changes do not affect it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchEntry {
    pub movie: MovieRecord,
    pub watched_at: DateTime<Utc>,
}

impl WatchEntry {
    pub fn new(movie: MovieRecord) -> Self {
        Self {
            movie,
            watched_at: Utc::now(),
        }
    }

    pub fn movie_id(&self) -> &str {
        &self.movie.id
    }
}
