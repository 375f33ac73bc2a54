use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use watchtime_models::MovieRecord;

struct CachedSearch {
    records: Vec<MovieRecord>,
    stored_at: Instant,
}

/// In-memory cache of search results keyed by normalized query.
///
/// Entries expire after `ttl`; once `max_entries` queries are cached the
/// oldest insertion is evicted. A zero `ttl` disables the cache entirely.
pub struct SearchCache {
    ttl: Duration,
    max_entries: usize,
    entries: HashMap<String, CachedSearch>,
    order: VecDeque<String>,
}

impl SearchCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Trimmed, lowercased, inner whitespace collapsed
    pub fn normalize_query(query: &str) -> String {
        query
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero() && self.max_entries > 0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&mut self, query: &str) -> Option<Vec<MovieRecord>> {
        if !self.is_enabled() {
            return None;
        }
        let key = Self::normalize_query(query);
        let expired = match self.entries.get(&key) {
            Some(cached) if cached.stored_at.elapsed() < self.ttl => {
                debug!(query = %key, results = cached.records.len(), "Search cache hit");
                return Some(cached.records.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            debug!(query = %key, "Search cache entry expired");
            self.remove_key(&key);
        }
        None
    }

    pub fn insert(&mut self, query: &str, records: Vec<MovieRecord>) {
        if !self.is_enabled() {
            return;
        }
        let key = Self::normalize_query(query);
        self.remove_key(&key);

        while self.entries.len() >= self.max_entries {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }

        self.order.push_back(key.clone());
        self.entries.insert(
            key,
            CachedSearch {
                records,
                stored_at: Instant::now(),
            },
        );
    }

    /// Find a record in the live result sets, most recent query first
    pub fn find_record(&mut self, record_id: &str) -> Option<MovieRecord> {
        if !self.is_enabled() {
            return None;
        }
        self.purge_expired();
        self.order
            .iter()
            .rev()
            .filter_map(|key| self.entries.get(key))
            .find_map(|cached| cached.records.iter().find(|r| r.id == record_id).cloned())
    }

    fn purge_expired(&mut self) {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, cached| cached.stored_at.elapsed() < ttl);
        if self.entries.len() != before {
            let entries = &self.entries;
            self.order.retain(|key| entries.contains_key(key));
            debug!(expired = before - self.entries.len(), "Purged expired search results");
        }
    }

    fn remove_key(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchtime_models::MediaType;

    fn records(title: &str) -> Vec<MovieRecord> {
        vec![MovieRecord::new(format!("omdb_{}", title), title, "2000", 90, MediaType::Movie)]
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(SearchCache::normalize_query("  The   MATRIX "), "the matrix");
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_for_equivalent_query() {
        let mut cache = SearchCache::new(Duration::from_secs(60), 10);
        cache.insert("The Matrix", records("matrix"));

        let hit = cache.get("  the matrix").unwrap();
        assert_eq!(hit[0].title, "matrix");
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire() {
        let mut cache = SearchCache::new(Duration::from_secs(60), 10);
        cache.insert("alien", records("alien"));

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(cache.get("alien").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_oldest_entry_evicted() {
        let mut cache = SearchCache::new(Duration::from_secs(60), 2);
        cache.insert("one", records("one"));
        cache.insert("two", records("two"));
        cache.insert("three", records("three"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("one").is_none());
        assert!(cache.get("two").is_some());
        assert!(cache.get("three").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reinsert_refreshes_position() {
        let mut cache = SearchCache::new(Duration::from_secs(60), 2);
        cache.insert("one", records("one"));
        cache.insert("two", records("two"));
        cache.insert("one", records("one-again"));
        cache.insert("three", records("three"));

        assert!(cache.get("two").is_none());
        assert_eq!(cache.get("one").unwrap()[0].title, "one-again");
    }

    #[tokio::test(start_paused = true)]
    async fn test_find_record_in_live_results_only() {
        let mut cache = SearchCache::new(Duration::from_secs(60), 10);
        cache.insert("alien", records("alien"));
        assert_eq!(cache.find_record("omdb_alien").unwrap().title, "alien");
        assert!(cache.find_record("omdb_heat").is_none());

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(cache.find_record("omdb_alien").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        let mut cache = SearchCache::new(Duration::ZERO, 10);
        cache.insert("alien", records("alien"));
        assert!(cache.is_empty());
        assert!(cache.get("alien").is_none());
    }
}
