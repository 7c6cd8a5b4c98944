//! Memoization tables for diagram operations

use ahash::AHashMap;
use std::fmt;
use std::hash::Hash;

/// Statistics about cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Entries dropped by flushes and collections
    pub evictions: usize,
    /// Current cache size
    pub current_size: usize,
    /// Maximum cache size (0 = unbounded)
    pub max_size: usize,
}

impl CacheStatistics {
    /// Hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Sum of two tables' statistics
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
            evictions: self.evictions + other.evictions,
            current_size: self.current_size + other.current_size,
            max_size: self.max_size + other.max_size,
        }
    }
}

impl fmt::Display for CacheStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hits, {} misses ({:.1}%), {} evictions, size {}/{}",
            self.hits,
            self.misses,
            self.hit_rate(),
            self.evictions,
            self.current_size,
            self.max_size
        )
    }
}

/// Bounded memo table
///
/// When an insertion would exceed the capacity the whole table is flushed.
/// Entries are plain handles; the owner must drop entries that refer to
/// reclaimed nodes or weights with [`retain`](Self::retain).
#[derive(Debug)]
pub struct ComputeTable<K, V> {
    entries: AHashMap<K, V>,
    capacity: usize,
    stats: CacheStatistics,
}

impl<K: Hash + Eq, V: Copy> ComputeTable<K, V> {
    /// Create a table holding at most `capacity` entries (0 = unbounded)
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: AHashMap::new(),
            capacity,
            stats: CacheStatistics {
                max_size: capacity,
                ..Default::default()
            },
        }
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some(value) => {
                self.stats.hits += 1;
                Some(*value)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity > 0 && self.entries.len() >= self.capacity {
            self.clear();
        }
        self.entries.insert(key, value);
    }

    /// Keep only the entries for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &V) -> bool) {
        let before = self.entries.len();
        self.entries.retain(|k, v| keep(k, v));
        self.stats.evictions += before - self.entries.len();
    }

    pub fn clear(&mut self) {
        self.stats.evictions += self.entries.len();
        self.entries.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn statistics(&self) -> CacheStatistics {
        CacheStatistics {
            current_size: self.entries.len(),
            ..self.stats.clone()
        }
    }
}
