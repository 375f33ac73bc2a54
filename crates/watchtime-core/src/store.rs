use tokio::sync::RwLock;
use tracing::info;
use watchtime_models::WatchEntry;

use crate::error::TrackerError;

/// Insertion-ordered watch list, at most one entry per movie id.
///
/// Lives for the lifetime of the process; nothing is persisted.
#[derive(Default)]
pub struct WatchStore {
    entries: RwLock<Vec<WatchEntry>>,
}

impl WatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, movie_id: &str) -> Option<WatchEntry> {
        self.entries.read().await.iter().find(|e| e.movie_id() == movie_id).cloned()
    }

    pub async fn contains(&self, movie_id: &str) -> bool {
        self.entries.read().await.iter().any(|e| e.movie_id() == movie_id)
    }

    /// Append an entry unless one with the same movie id exists.
    ///
    /// The duplicate check and the push happen under one write guard.
    pub async fn insert(&self, entry: WatchEntry) -> Result<(), TrackerError> {
        let mut entries = self.entries.write().await;
        if entries.iter().any(|e| e.movie_id() == entry.movie_id()) {
            return Err(already_watched(&entry.movie.title));
        }
        info!(
            operation = "watched_add",
            movie_id = %entry.movie_id(),
            title = %entry.movie.title,
            duration = entry.movie.duration,
            "Added to watched list"
        );
        entries.push(entry);
        Ok(())
    }

    pub async fn remove(&self, movie_id: &str) -> Result<WatchEntry, TrackerError> {
        let mut entries = self.entries.write().await;
        let position = entries
            .iter()
            .position(|e| e.movie_id() == movie_id)
            .ok_or_else(|| TrackerError::NotFound("Movie not found in watched list".to_string()))?;
        let removed = entries.remove(position);
        info!(operation = "watched_remove", movie_id = %movie_id, "Removed from watched list");
        Ok(removed)
    }

    /// Entries in insertion order
    pub async fn list(&self) -> Vec<WatchEntry> {
        self.entries.read().await.clone()
    }

    /// Entries most recent first
    pub async fn list_recent(&self) -> Vec<WatchEntry> {
        let mut entries = self.list().await;
        entries.reverse();
        entries
    }

    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        info!(operation = "watched_clear", removed, "Cleared watched list");
        removed
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

pub(crate) fn already_watched(title: &str) -> TrackerError {
    TrackerError::Duplicate(format!("Movie '{}' is already in your watched list.", title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchtime_models::{MediaType, MovieRecord};

    fn entry(id: &str, title: &str) -> WatchEntry {
        WatchEntry::new(MovieRecord::new(id, title, "2020", 100, MediaType::Movie))
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = WatchStore::new();
        store.insert(entry("omdb_tt001", "Movie 1")).await.unwrap();

        let err = store.insert(entry("omdb_tt001", "Movie 1")).await.unwrap_err();
        assert_eq!(err.kind(), "duplicate");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = WatchStore::new();
        store.insert(entry("omdb_tt001", "Movie 1")).await.unwrap();
        store.insert(entry("omdb_tt002", "Movie 2")).await.unwrap();
        store.insert(entry("omdb_tt003", "Movie 3")).await.unwrap();

        let ids: Vec<String> = store.list().await.iter().map(|e| e.movie.id.clone()).collect();
        assert_eq!(ids, vec!["omdb_tt001", "omdb_tt002", "omdb_tt003"]);

        let recent: Vec<String> = store
            .list_recent()
            .await
            .iter()
            .map(|e| e.movie.id.clone())
            .collect();
        assert_eq!(recent, vec!["omdb_tt003", "omdb_tt002", "omdb_tt001"]);
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_found() {
        let store = WatchStore::new();
        let err = store.remove("omdb_tt404").await.unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn test_remove_then_reinsert() {
        let store = WatchStore::new();
        store.insert(entry("omdb_tt001", "Movie 1")).await.unwrap();

        let removed = store.remove("omdb_tt001").await.unwrap();
        assert_eq!(removed.movie.title, "Movie 1");
        assert!(store.is_empty().await);

        store.insert(entry("omdb_tt001", "Movie 1")).await.unwrap();
        assert!(store.contains("omdb_tt001").await);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = WatchStore::new();
        store.insert(entry("omdb_tt001", "Movie 1")).await.unwrap();
        store.insert(entry("omdb_tt002", "Movie 2")).await.unwrap();

        assert_eq!(store.clear().await, 2);
        assert!(store.list().await.is_empty());
    }
}
