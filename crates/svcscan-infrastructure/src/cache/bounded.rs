//! Bounded memoizing cache
//!
//! A thread-safe map with a fixed capacity. Every read and write stamps the
//! entry with a tick from a monotonically increasing logical clock; when a
//! miss must insert into a full cache, the entry with the oldest stamp is
//! found by a linear scan and evicted.
//!
//! ## Example
//!
//! ```
//! use svcscan_infrastructure::cache::BoundedCache;
//!
//! let cache: BoundedCache<String, usize> = BoundedCache::new("lengths", 2);
//! let len = cache.get_or_add("hello".to_string(), || 5).unwrap();
//! assert_eq!(len, 5);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::DashMap;
use svcscan_domain::error::{Error, Result};
use tracing::{Level, debug};

/// A cached value with its last-access stamp
#[derive(Debug)]
pub struct CacheEntry<V> {
    value: V,
    last_accessed: AtomicU64,
}

impl<V> CacheEntry<V> {
    fn new(value: V, stamp: u64) -> Self {
        Self {
            value,
            last_accessed: AtomicU64::new(stamp),
        }
    }

    fn touch(&self, stamp: u64) {
        self.last_accessed.fetch_max(stamp, Ordering::Relaxed);
    }

    /// The cached value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Logical tick of the last read or write
    pub fn last_accessed(&self) -> u64 {
        self.last_accessed.load(Ordering::Relaxed)
    }
}

/// Point-in-time cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries currently held
    pub entries: usize,
    /// Configured maximum
    pub capacity: usize,
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that had to compute
    pub misses: u64,
    /// Entries evicted to make room
    pub evictions: u64,
}

/// Thread-safe memoizing cache with least-recently-used eviction
pub struct BoundedCache<K, V> {
    name: String,
    capacity: usize,
    entries: DashMap<K, CacheEntry<V>>,
    clock: AtomicU64,
    closed: AtomicBool,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries (minimum 1)
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity: capacity.max(1),
            entries: DashMap::new(),
            clock: AtomicU64::new(0),
            closed: AtomicBool::new(false),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Cache name used in logs and errors
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::cache_closed(self.name.clone()));
        }
        Ok(())
    }

    /// Look up a value without computing it
    pub fn get<Q>(&self, key: &Q) -> Result<Option<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ensure_open()?;
        let value = self.entries.get(key).map(|entry| {
            entry.touch(self.tick());
            entry.value.clone()
        });
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(value)
    }

    /// Whether `key` is cached; does not count as an access
    pub fn contains_key<Q>(&self, key: &Q) -> Result<bool>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ensure_open()?;
        Ok(self.entries.contains_key(key))
    }

    /// Return the cached value for `key`, computing and inserting it on a miss
    pub fn get_or_add<F>(&self, key: K, compute: F) -> Result<V>
    where
        F: FnOnce() -> V,
    {
        self.try_get_or_add(key, || Ok(compute()))
    }

    /// Fallible variant of [`get_or_add`](Self::get_or_add)
    ///
    /// An error from `compute` is returned as-is and nothing is cached.
    pub fn try_get_or_add<F>(&self, key: K, compute: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        self.ensure_open()?;

        if let Some(entry) = self.entries.get(&key) {
            entry.touch(self.tick());
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(entry.value.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        // Computed without holding a shard lock: compute may re-enter the cache.
        let value = compute()?;
        self.ensure_open()?;

        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            self.evict_oldest();
        }

        let stamp = self.tick();
        let entry = self
            .entries
            .entry(key)
            .or_insert_with(|| CacheEntry::new(value, stamp));
        entry.touch(stamp);
        Ok(entry.value.clone())
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.last_accessed())
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest
            && self.entries.remove(&key).is_some()
        {
            self.evictions.fetch_add(1, Ordering::Relaxed);
            if tracing::enabled!(Level::TRACE) {
                tracing::trace!(cache = %self.name, "evicted least recently used entry");
            }
        }
    }

    /// Remove every entry; the cache stays usable
    pub fn clear(&self) -> Result<()> {
        self.ensure_open()?;
        self.entries.clear();
        Ok(())
    }

    /// Remove every entry and reject all later access
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            self.entries.clear();
            if tracing::enabled!(Level::DEBUG) {
                debug!(cache = %self.name, "cache closed");
            }
        }
    }

    /// Snapshot of the cache counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

impl<K, V> fmt::Debug for BoundedCache<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedCache")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("entries", &self.entries.len())
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish()
    }
}
