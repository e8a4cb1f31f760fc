//! Bounded in-memory response cache with per-entry expiry.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// How long an entry stays readable after it was stored.
pub const CACHE_TTL: Duration = Duration::from_millis(300_000);

/// Maximum number of entries held at rest.
pub const MAX_CACHE_SIZE: usize = 50;

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    seq: u64,
}

struct CacheState<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    // Insertion sequence -> key. The first entry is always the oldest insert.
    order: BTreeMap<u64, K>,
    next_seq: u64,
}

impl<K, V> CacheState<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: BTreeMap::new(),
            next_seq: 0,
        }
    }

    fn remove(&mut self, key: &K) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.order.remove(&entry.seq);
        Some(entry)
    }

    fn evict_oldest(&mut self) -> Option<K> {
        let (_, key) = self.order.pop_first()?;
        self.entries.remove(&key);
        Some(key)
    }
}

/// Key/value store that expires entries lazily on read and evicts the
/// oldest insert when full.
///
/// Eviction is strictly insertion ordered: reading an entry never extends
/// its life or protects it from eviction. Expired entries are only dropped
/// when they are read, so `len()` may include stale entries.
///
/// Every operation runs under a single lock, so the type can be shared
/// across tasks behind an `Arc`.
pub struct ResponseCache<K, V> {
    ttl: Duration,
    capacity: usize,
    state: Mutex<CacheState<K, V>>,
}

impl<K, V> ResponseCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    /// Creates a cache using [`CACHE_TTL`] and [`MAX_CACHE_SIZE`].
    pub fn new() -> Self {
        Self::with_limits(CACHE_TTL, MAX_CACHE_SIZE)
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            state: Mutex::new(CacheState::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, CacheState<K, V>> {
        // Every mutation leaves the state consistent, so a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the value for `key` if it was stored less than one TTL ago.
    /// An expired entry is removed as a side effect.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut state = self.lock();
        let inserted_at = match state.entries.get(key) {
            Some(entry) => entry.inserted_at,
            None => {
                debug!("Cache MISS for key: {:?}", key);
                return None;
            }
        };

        if inserted_at.elapsed() >= self.ttl {
            debug!("Cache entry expired for key: {:?}", key);
            state.remove(key);
            return None;
        }

        debug!("Cache HIT for key: {:?}", key);
        state.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Stores `value` under `key`, stamping it with the current time.
    ///
    /// When the cache is full and `key` is new, the entry inserted earliest
    /// is evicted first. Overwriting a key keeps the size unchanged and
    /// makes it the newest entry.
    pub fn set(&self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        let mut state = self.lock();
        if state.remove(&key).is_none()
            && state.entries.len() >= self.capacity
            && let Some(evicted) = state.evict_oldest()
        {
            debug!("Cache EVICT for key: {:?}", evicted);
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        state.order.insert(seq, key.clone());
        debug!("Cache PUT for key: {:?}", key);
        state.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
                seq,
            },
        );
    }

    pub fn remove(&self, key: &K) {
        self.lock().remove(key);
        debug!("Cache REMOVE for key: {:?}", key);
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.order.clear();
        debug!("Cache CLEAR");
    }

    /// Number of entries currently held, stale or not.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Default for ResponseCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
