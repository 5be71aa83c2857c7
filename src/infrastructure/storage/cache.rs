// In-memory result cache: strict LRU with a fixed TTL
use crate::domain::error::AppError;
use crate::domain::model::{CacheEntry, ServiceId};
use crate::domain::traits::SnapshotStore;
use crate::infrastructure::config::CacheConfig;
use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;
use tracing::debug;

const KEY_SEPARATOR: char = '|';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
    pub evicted: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    saved_at: i64,
    /// Most recently used first.
    entries: Vec<(String, CacheEntry)>,
}

struct Inner {
    entries: LruCache<String, CacheEntry>,
    stats: CacheStats,
}

/// Thread-safe LRU cache of translation results
///
/// Recency is updated on both `get` and `set`. Expiry is checked lazily on
/// access and by [`ResultCache::prune`]; there is no background timer.
pub struct ResultCache {
    inner: Mutex<Inner>,
    ttl: Duration,
    backup_max: usize,
}

impl ResultCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                stats: CacheStats::default(),
            }),
            ttl,
            backup_max: usize::MAX,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity, Duration::from_secs(config.ttl_secs)).with_backup_max(config.backup_max)
    }

    pub fn with_backup_max(mut self, backup_max: usize) -> Self {
        self.backup_max = backup_max;
        self
    }

    /// Only the text is case- and whitespace-normalised; service and language
    /// codes are used verbatim.
    pub fn generate_key(service: ServiceId, source: &str, target: &str, text: &str) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}",
            service,
            source,
            target,
            text.trim().to_lowercase(),
            sep = KEY_SEPARATOR
        )
    }

    fn is_expired(&self, entry: &CacheEntry, now: i64) -> bool {
        let ttl_ms = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        now.saturating_sub(entry.created_at) > ttl_ms
    }

    /// Look up and promote to most-recently-used. Expired entries are removed.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        let now = now_millis();
        let mut inner = self.inner.lock();

        match inner.entries.get(key).map(|entry| self.is_expired(entry, now)) {
            None => {
                inner.stats.misses += 1;
                None
            }
            Some(true) => {
                inner.entries.pop(key);
                inner.stats.expired += 1;
                inner.stats.misses += 1;
                None
            }
            Some(false) => {
                inner.stats.hits += 1;
                inner.entries.peek(key).cloned()
            }
        }
    }

    pub fn set(
        &self,
        key: impl Into<String>,
        text: impl Into<String>,
        service: ServiceId,
        detected_language: Option<String>,
    ) {
        let entry = CacheEntry {
            text: text.into(),
            created_at: now_millis(),
            service,
            detected_language,
        };
        self.insert(key.into(), entry);
    }

    fn insert(&self, key: String, entry: CacheEntry) {
        let mut inner = self.inner.lock();
        let at_capacity = inner.entries.len() == inner.entries.cap().get();
        if at_capacity && !inner.entries.contains(&key) {
            if let Some((evicted, _)) = inner.entries.pop_lru() {
                debug!(key = %evicted, "evicted least recently used cache entry");
                inner.stats.evicted += 1;
            }
        }
        inner.entries.put(key, entry);
    }

    /// Presence check without touching recency.
    pub fn has(&self, key: &str) -> bool {
        let now = now_millis();
        let inner = self.inner.lock();
        inner
            .entries
            .peek(key)
            .is_some_and(|entry| !self.is_expired(entry, now))
    }

    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().entries.pop(key).is_some()
    }

    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    pub fn size(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn prune(&self) -> usize {
        let now = now_millis();
        let mut inner = self.inner.lock();

        let expired: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| self.is_expired(entry, now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            inner.entries.pop(key);
        }
        inner.stats.expired += expired.len() as u64;
        expired.len()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }

    fn snapshot(&self) -> Snapshot {
        let now = now_millis();
        let inner = self.inner.lock();
        let entries = inner
            .entries
            .iter()
            .filter(|(_, entry)| !self.is_expired(entry, now))
            .take(self.backup_max)
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect();
        Snapshot {
            saved_at: now,
            entries,
        }
    }

    /// Write up to `backup_max` most-recent entries to `store`.
    pub async fn backup(&self, store: &dyn SnapshotStore) -> Result<usize, AppError> {
        let snapshot = self.snapshot();
        let count = snapshot.entries.len();
        let blob = serde_json::to_vec(&snapshot)?;
        store.save(blob).await?;
        debug!(count, "cache snapshot saved");
        Ok(count)
    }

    /// Load the snapshot back, skipping entries whose TTL has elapsed since.
    /// Returns the number of entries restored.
    pub async fn restore(&self, store: &dyn SnapshotStore) -> Result<usize, AppError> {
        let Some(blob) = store.load().await? else {
            return Ok(0);
        };
        let snapshot: Snapshot = serde_json::from_slice(&blob)?;

        let now = now_millis();
        let mut restored = 0;
        // oldest first, so the most recent entry ends up most recently used
        for (key, entry) in snapshot.entries.into_iter().rev() {
            if self.is_expired(&entry, now) {
                continue;
            }
            self.insert(key, entry);
            restored += 1;
        }

        debug!(restored, saved_at = snapshot.saved_at, "cache snapshot restored");
        Ok(restored)
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_still_holds_one_entry() {
        let cache = ResultCache::new(0, Duration::from_secs(60));
        cache.set("a", "A", ServiceId::Google, None);
        cache.set("b", "B", ServiceId::Google, None);
        assert_eq!(cache.size(), 1);
        assert!(cache.has("b"));
    }

    #[test]
    fn overwrite_at_capacity_does_not_evict() {
        let cache = ResultCache::new(2, Duration::from_secs(60));
        cache.set("a", "A", ServiceId::Google, None);
        cache.set("b", "B", ServiceId::Google, None);
        cache.set("a", "A2", ServiceId::Google, None);
        assert_eq!(cache.size(), 2);
        assert_eq!(cache.get("a").unwrap().text, "A2");
        assert_eq!(cache.stats().evicted, 0);
    }

    #[test]
    fn stats_track_hits_and_misses() {
        let cache = ResultCache::new(4, Duration::from_secs(60));
        cache.set("a", "A", ServiceId::Lingva, None);
        assert!(cache.get("a").is_some());
        assert!(cache.get("missing").is_none());
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }
}
