//! 结果缓存测试

use omnilate::domain::model::ServiceId;
use omnilate::domain::traits::SnapshotStore;
use omnilate::infrastructure::storage::{MemorySnapshotStore, ResultCache, SqliteSnapshotStore};
use std::time::Duration;

fn cache(capacity: usize) -> ResultCache {
    ResultCache::new(capacity, Duration::from_secs(3600))
}

#[test]
fn key_normalizes_text_only() {
    let a = ResultCache::generate_key(ServiceId::Google, "en", "fr", "  Hello World ");
    let b = ResultCache::generate_key(ServiceId::Google, "en", "fr", "hello world");
    assert_eq!(a, b);
    assert_eq!(a, "google|en|fr|hello world");

    let other_service = ResultCache::generate_key(ServiceId::Lingva, "en", "fr", "hello world");
    let other_target = ResultCache::generate_key(ServiceId::Google, "en", "de", "hello world");
    assert_ne!(a, other_service);
    assert_ne!(a, other_target);
}

#[test]
fn set_then_get_returns_entry() {
    let cache = cache(10);
    cache.set("k", "Bonjour", ServiceId::Lingva, Some("en".to_string()));

    let entry = cache.get("k").unwrap();
    assert_eq!(entry.text, "Bonjour");
    assert_eq!(entry.service, ServiceId::Lingva);
    assert_eq!(entry.detected_language.as_deref(), Some("en"));
    assert!(cache.has("k"));
    assert!(cache.get("missing").is_none());
}

#[test]
fn evicts_least_recently_used() {
    let cache = cache(3);
    cache.set("a", "A", ServiceId::Google, None);
    cache.set("b", "B", ServiceId::Google, None);
    cache.set("c", "C", ServiceId::Google, None);
    cache.set("d", "D", ServiceId::Google, None);

    assert_eq!(cache.size(), 3);
    assert!(!cache.has("a"));
    assert!(cache.has("b") && cache.has("c") && cache.has("d"));
    assert_eq!(cache.stats().evicted, 1);
}

#[test]
fn read_protects_entry_from_eviction() {
    let cache = cache(3);
    cache.set("a", "A", ServiceId::Google, None);
    cache.set("b", "B", ServiceId::Google, None);
    cache.set("c", "C", ServiceId::Google, None);

    assert!(cache.get("a").is_some());
    cache.set("d", "D", ServiceId::Google, None);

    assert!(cache.has("a"));
    assert!(!cache.has("b"));
}

#[test]
fn has_does_not_promote() {
    let cache = cache(2);
    cache.set("a", "A", ServiceId::Google, None);
    cache.set("b", "B", ServiceId::Google, None);

    assert!(cache.has("a"));
    cache.set("c", "C", ServiceId::Google, None);

    assert!(!cache.has("a"));
    assert!(cache.has("b"));
}

#[test]
fn expired_entries_are_misses() {
    let cache = ResultCache::new(10, Duration::from_millis(20));
    cache.set("k", "v", ServiceId::Google, None);
    assert!(cache.get("k").is_some());

    std::thread::sleep(Duration::from_millis(60));

    assert!(!cache.has("k"));
    assert!(cache.get("k").is_none());
    assert_eq!(cache.size(), 0);
    assert_eq!(cache.stats().expired, 1);
}

#[test]
fn prune_removes_only_expired() {
    let cache = ResultCache::new(10, Duration::from_millis(30));
    cache.set("old1", "1", ServiceId::Google, None);
    cache.set("old2", "2", ServiceId::Google, None);
    std::thread::sleep(Duration::from_millis(60));
    cache.set("fresh", "3", ServiceId::Google, None);

    assert_eq!(cache.prune(), 2);
    assert_eq!(cache.size(), 1);
    assert!(cache.has("fresh"));
}

#[test]
fn delete_and_clear() {
    let cache = cache(10);
    cache.set("a", "A", ServiceId::Google, None);
    cache.set("b", "B", ServiceId::Google, None);

    assert!(cache.delete("a"));
    assert!(!cache.delete("a"));
    assert_eq!(cache.size(), 1);

    cache.clear();
    assert_eq!(cache.size(), 0);
}

#[tokio::test]
async fn backup_and_restore_through_memory_store() {
    let store = MemorySnapshotStore::new();
    let original = cache(10);
    original.set("a", "A", ServiceId::Google, None);
    original.set("b", "B", ServiceId::Lingva, Some("fr".to_string()));

    assert_eq!(original.backup(&store).await.unwrap(), 2);

    let restored = cache(10);
    assert_eq!(restored.restore(&store).await.unwrap(), 2);
    assert_eq!(restored.get("b").unwrap().detected_language.as_deref(), Some("fr"));
    assert_eq!(restored.get("a").unwrap().service, ServiceId::Google);
}

#[tokio::test]
async fn restore_keeps_recency_order() {
    let store = MemorySnapshotStore::new();
    let original = cache(3);
    original.set("a", "A", ServiceId::Google, None);
    original.set("b", "B", ServiceId::Google, None);
    original.set("c", "C", ServiceId::Google, None);
    original.backup(&store).await.unwrap();

    let restored = cache(3);
    restored.restore(&store).await.unwrap();
    restored.set("d", "D", ServiceId::Google, None);

    // "a" was least recently used before the backup, so it goes first
    assert!(!restored.has("a"));
    assert!(restored.has("b") && restored.has("c") && restored.has("d"));
}

#[tokio::test]
async fn backup_is_capped_to_most_recent() {
    let store = MemorySnapshotStore::new();
    let original = cache(10).with_backup_max(2);
    for key in ["a", "b", "c", "d"] {
        original.set(key, key, ServiceId::Google, None);
    }
    assert_eq!(original.backup(&store).await.unwrap(), 2);

    let restored = cache(10);
    restored.restore(&store).await.unwrap();
    assert_eq!(restored.size(), 2);
    assert!(restored.has("c") && restored.has("d"));
}

#[tokio::test]
async fn restore_discards_entries_expired_since_backup() {
    let store = MemorySnapshotStore::new();
    let original = ResultCache::new(10, Duration::from_millis(30));
    original.set("k", "v", ServiceId::Google, None);
    original.backup(&store).await.unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;

    let restored = ResultCache::new(10, Duration::from_millis(30));
    assert_eq!(restored.restore(&store).await.unwrap(), 0);
    assert_eq!(restored.size(), 0);
}

#[tokio::test]
async fn restore_from_empty_store_is_noop() {
    let store = MemorySnapshotStore::new();
    let cache = cache(10);
    assert_eq!(cache.restore(&store).await.unwrap(), 0);
}

#[tokio::test]
async fn corrupt_snapshot_is_an_error() {
    let store = MemorySnapshotStore::new();
    store.save(b"not json".to_vec()).await.unwrap();
    assert!(cache(10).restore(&store).await.is_err());
}

#[tokio::test]
async fn snapshot_survives_sqlite_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.db");

    {
        let store = SqliteSnapshotStore::open(&path).await.unwrap();
        let original = cache(10);
        original.set("greeting", "Hallo", ServiceId::DeepL, None);
        original.backup(&store).await.unwrap();
    }

    let store = SqliteSnapshotStore::open(&path).await.unwrap();
    let restored = cache(10);
    assert_eq!(restored.restore(&store).await.unwrap(), 1);
    assert_eq!(restored.get("greeting").unwrap().text, "Hallo");
}
