//! Bounded TTL cache keyed by request [`Fingerprint`].
//!
//! Eviction is FIFO by insertion, not LRU: when a `set` finds the map full it first purges every
//! expired entry, and only if that frees nothing evicts the oldest surviving insertion. Updating
//! an existing key keeps its original position.
//!
//! Insertion order lives in an explicit queue tagged with a sequence number per insertion.
//! Removals leave stale queue items behind, which are skipped on eviction and compacted away
//! once they outnumber live entries.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use super::types::CacheEntry;
use crate::hashing::Fingerprint;

struct Slot<V> {
    entry: CacheEntry<V>,
    seq: u64,
}

struct CacheState<V> {
    entries: HashMap<Fingerprint, Slot<V>>,
    order: VecDeque<(u64, Fingerprint)>,
    next_seq: u64,
}

impl<V> CacheState<V> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            next_seq: 0,
        }
    }

    fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, slot| !slot.entry.is_expired_at(now));
        before - self.entries.len()
    }

    fn evict_oldest(&mut self) -> Option<Fingerprint> {
        while let Some((seq, key)) = self.order.pop_front() {
            let live = self.entries.get(&key).is_some_and(|slot| slot.seq == seq);
            if live {
                self.entries.remove(&key);
                return Some(key);
            }
        }
        None
    }

    fn compact_order(&mut self) {
        if self.order.len() <= self.entries.len() * 2 + 16 {
            return;
        }
        let Self { entries, order, .. } = self;
        order.retain(|(seq, key)| entries.get(key).is_some_and(|slot| slot.seq == *seq));
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Thread-safe answer cache with a TTL and a hard size bound.
///
/// All operations take one mutex, so the `max_size` bound holds under concurrent `set`s.
pub struct FingerprintCache<V> {
    ttl: Duration,
    max_size: usize,
    state: Mutex<CacheState<V>>,
}

impl<V: Clone> FingerprintCache<V> {
    /// Creates a cache. A `max_size` of zero is treated as one.
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        Self {
            ttl,
            max_size: max_size.max(1),
            state: Mutex::new(CacheState::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the stored value, or `None` if absent or expired. Expired entries are dropped.
    pub fn get(&self, key: &Fingerprint) -> Option<V> {
        let now = Instant::now();
        let mut state = self.state.lock();

        let expired = state.entries.get(key)?.entry.is_expired_at(now);
        if expired {
            state.entries.remove(key);
            state.compact_order();
            debug!(key = %key, "Cache entry expired");
            return None;
        }

        state.entries.get(key).map(|slot| slot.entry.value.clone())
    }

    /// Stores `value` under `key` for one TTL.
    pub fn set(&self, key: Fingerprint, value: V) {
        let now = Instant::now();
        let mut state = self.state.lock();

        if state.entries.len() >= self.max_size {
            let purged = state.purge_expired(now);
            if state.entries.len() >= self.max_size {
                let evicted = state.evict_oldest();
                debug!(purged, evicted = ?evicted.map(|k| k.to_hex()), "Cache full, evicted oldest entry");
            } else {
                debug!(purged, "Cache full, purged expired entries");
            }
        }

        let entry = CacheEntry::new(value, now.checked_add(self.ttl));

        if let Some(slot) = state.entries.get_mut(&key) {
            slot.entry = entry;
        } else {
            let seq = state.next_seq;
            state.next_seq += 1;
            state.order.push_back((seq, key));
            state.entries.insert(key, Slot { entry, seq });
        }

        state.compact_order();
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.state.lock().clear();
    }

    /// Removes all expired entries and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let mut state = self.state.lock();
        let purged = state.purge_expired(Instant::now());
        state.compact_order();
        purged
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}

impl<V> fmt::Debug for FingerprintCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FingerprintCache")
            .field("ttl", &self.ttl)
            .field("max_size", &self.max_size)
            .field("entries", &self.state.lock().entries.len())
            .finish()
    }
}
