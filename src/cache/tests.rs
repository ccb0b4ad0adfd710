use super::*;
use crate::hashing::{Fingerprint, fingerprint};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn key(name: &str) -> Fingerprint {
    fingerprint(&[&name], &[])
}

fn long_cache(max_size: usize) -> FingerprintCache<String> {
    FingerprintCache::new(Duration::from_secs(300), max_size)
}

#[test]
fn test_cache_status_header_values() {
    assert_eq!(CacheStatus::Hit.as_header_value(), "HIT");
    assert_eq!(CacheStatus::Miss.as_header_value(), "MISS");
    assert_eq!(CacheStatus::Bypass.as_header_value(), "BYPASS");
    assert_eq!(format!("{}", CacheStatus::Miss), "MISS");
}

#[test]
fn test_cache_status_is_hit() {
    assert!(CacheStatus::Hit.is_hit());
    assert!(!CacheStatus::Miss.is_hit());
    assert!(!CacheStatus::Bypass.is_hit());
}

#[test]
fn test_cache_entry_expiry() {
    let now = Instant::now();
    let entry = CacheEntry::new("value", Some(now + Duration::from_secs(100)));

    assert_eq!(entry.value, "value");
    assert!(!entry.is_expired_at(now));
    assert!(entry.is_expired_at(now + Duration::from_secs(101)));
}

#[test]
fn test_cache_entry_without_deadline_never_expires() {
    let entry = CacheEntry::new(1, None);
    assert!(!entry.is_expired_at(Instant::now() + Duration::from_secs(1_000_000)));
}

#[test]
fn test_cache_set_and_get() {
    let cache = long_cache(3);
    cache.set(key("key1"), "value1".to_string());

    assert_eq!(cache.get(&key("key1")), Some("value1".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_get_nonexistent() {
    let cache = long_cache(3);
    assert!(cache.get(&key("nonexistent")).is_none());
}

#[test]
fn test_cache_expiration_is_lazy() {
    let cache = FingerprintCache::new(Duration::from_millis(30), 3);
    cache.set(key("key1"), "value1".to_string());
    assert_eq!(cache.get(&key("key1")), Some("value1".to_string()));

    std::thread::sleep(Duration::from_millis(60));

    assert_eq!(cache.len(), 1);
    assert!(cache.get(&key("key1")).is_none());
    assert_eq!(cache.len(), 0);
}

#[test]
fn test_cache_max_size_evicts_oldest_insertion() {
    let cache = long_cache(3);
    cache.set(key("key1"), "value1".to_string());
    cache.set(key("key2"), "value2".to_string());
    cache.set(key("key3"), "value3".to_string());
    assert_eq!(cache.len(), 3);

    // Reading key1 must not protect it: eviction is FIFO, not LRU.
    assert!(cache.get(&key("key1")).is_some());

    cache.set(key("key4"), "value4".to_string());
    assert_eq!(cache.len(), 3);
    assert!(cache.get(&key("key1")).is_none());
    assert_eq!(cache.get(&key("key2")), Some("value2".to_string()));
    assert_eq!(cache.get(&key("key4")), Some("value4".to_string()));
}

#[test]
fn test_cache_update_keeps_insertion_position() {
    let cache = long_cache(3);
    cache.set(key("a"), "1".to_string());
    cache.set(key("b"), "2".to_string());
    cache.set(key("c"), "3".to_string());

    // Key "b" is updated when the map is full: the oldest ("a") goes first.
    cache.set(key("b"), "22".to_string());
    assert_eq!(cache.len(), 2);
    assert!(cache.get(&key("a")).is_none());
    assert_eq!(cache.get(&key("b")), Some("22".to_string()));

    cache.set(key("d"), "4".to_string());
    cache.set(key("e"), "5".to_string());

    // "b" kept its original slot, so it is now the oldest and is evicted before "c".
    assert!(cache.get(&key("b")).is_none());
    assert_eq!(cache.get(&key("c")), Some("3".to_string()));
    assert_eq!(cache.get(&key("e")), Some("5".to_string()));
}

#[test]
fn test_cache_update_below_capacity_replaces_value() {
    let cache = long_cache(10);
    cache.set(key("a"), "1".to_string());
    cache.set(key("a"), "2".to_string());

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&key("a")), Some("2".to_string()));
}

#[test]
fn test_cache_purges_expired_before_evicting() {
    let cache = FingerprintCache::new(Duration::from_millis(30), 2);
    cache.set(key("old1"), "x".to_string());
    cache.set(key("old2"), "y".to_string());

    std::thread::sleep(Duration::from_millis(60));

    cache.set(key("new1"), "z".to_string());
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&key("new1")), Some("z".to_string()));
}

#[test]
fn test_cache_eviction_skips_lazily_removed_entries() {
    let cache = FingerprintCache::new(Duration::from_millis(40), 2);
    cache.set(key("first"), "1".to_string());
    std::thread::sleep(Duration::from_millis(60));

    // "first" expires and is dropped on read; its queue slot goes stale.
    assert!(cache.get(&key("first")).is_none());

    cache.set(key("second"), "2".to_string());
    cache.set(key("third"), "3".to_string());
    cache.set(key("fourth"), "4".to_string());

    assert_eq!(cache.len(), 2);
    assert!(cache.get(&key("second")).is_none());
    assert!(cache.get(&key("third")).is_some());
    assert!(cache.get(&key("fourth")).is_some());
}

#[test]
fn test_cache_size_bound_holds_for_any_sequence() {
    let cache = long_cache(5);
    for i in 0..200 {
        cache.set(key(&format!("k{}", i % 17)), format!("v{i}"));
        assert!(cache.len() <= 5);
    }
}

#[test]
fn test_cache_zero_max_size_treated_as_one() {
    let cache = long_cache(0);
    cache.set(key("a"), "1".to_string());
    cache.set(key("b"), "2".to_string());

    assert_eq!(cache.max_size(), 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&key("b")), Some("2".to_string()));
}

#[test]
fn test_cache_clear() {
    let cache = long_cache(3);
    cache.set(key("key1"), "value1".to_string());
    cache.set(key("key2"), "value2".to_string());
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
    assert!(cache.get(&key("key1")).is_none());
}

#[test]
fn test_cache_purge_expired_reports_count() {
    let cache = FingerprintCache::new(Duration::from_millis(20), 10);
    cache.set(key("a"), 1u32);
    cache.set(key("b"), 2u32);
    std::thread::sleep(Duration::from_millis(50));

    assert_eq!(cache.purge_expired(), 2);
    assert!(cache.is_empty());
}

#[test]
fn test_cache_huge_ttl_does_not_panic() {
    let cache = FingerprintCache::new(Duration::from_secs(u64::MAX), 3);
    cache.set(key("a"), "1".to_string());
    assert_eq!(cache.get(&key("a")), Some("1".to_string()));
}

#[test]
fn test_cache_concurrent_sets_respect_bound() {
    let cache = Arc::new(long_cache(8));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for i in 0..100 {
                    cache.set(key(&format!("t{t}-{i}")), format!("{t}:{i}"));
                    assert!(cache.len() <= 8);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().expect("thread should not panic");
    }

    assert_eq!(cache.len(), 8);
}
