#![forbid(unsafe_code)]

//! LRU cache for visible-width measurements.
//!
//! Column sizing measures every line of every cell, and the same strings
//! (repeated values, row-spanned cells visited once per covered row) come
//! back often. The cache keys on a 64-bit FxHash of the text.
//!
//! # Example
//! ```
//! use tessera_text::WidthCache;
//!
//! let mut cache = WidthCache::new(64);
//! assert_eq!(cache.get_or_compute("\x1b[1mtotal\x1b[0m"), 5);
//! assert_eq!(cache.get_or_compute("\x1b[1mtotal\x1b[0m"), 5);
//!
//! let stats = cache.stats();
//! assert_eq!((stats.hits, stats.misses), (1, 1));
//! ```

use lru::LruCache;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

/// Default cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Hit rate in `0.0..=1.0`.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of visible widths.
///
/// Not thread-safe; a render owns its own cache.
#[derive(Debug)]
pub struct WidthCache {
    cache: LruCache<u64, usize>,
    hits: u64,
    misses: u64,
}

impl WidthCache {
    /// Create a cache holding up to `capacity` entries (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Visible width of `text`, from the cache when possible.
    #[inline]
    pub fn get_or_compute(&mut self, text: &str) -> usize {
        self.get_or_compute_with(text, crate::visible_width)
    }

    /// Cached width, computed with `compute` on a miss.
    pub fn get_or_compute_with<F>(&mut self, text: &str, compute: F) -> usize
    where
        F: FnOnce(&str) -> usize,
    {
        let hash = hash_text(text);

        if let Some(&width) = self.cache.get(&hash) {
            self.hits += 1;
            return width;
        }

        self.misses += 1;
        let width = compute(text);
        self.cache.put(hash, width);
        width
    }

    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.cache.contains(&hash_text(text))
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for WidthCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[inline]
fn hash_text(text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cache_is_empty() {
        let cache = WidthCache::new(8);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().capacity, 8);
    }

    #[test]
    fn zero_capacity_becomes_one() {
        let cache = WidthCache::new(0);
        assert_eq!(cache.stats().capacity, 1);
    }

    #[test]
    fn caches_visible_width() {
        let mut cache = WidthCache::new(8);
        assert_eq!(cache.get_or_compute("\x1b[31m你好\x1b[0m"), 4);
        assert!(cache.contains("\x1b[31m你好\x1b[0m"));
        assert_eq!(cache.get_or_compute("\x1b[31m你好\x1b[0m"), 4);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn compute_runs_once_per_entry() {
        let mut cache = WidthCache::new(8);
        let mut calls = 0;
        for _ in 0..3 {
            cache.get_or_compute_with("abc", |text| {
                calls += 1;
                text.len()
            });
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn lru_eviction() {
        let mut cache = WidthCache::new(2);
        cache.get_or_compute("a");
        cache.get_or_compute("bb");
        cache.get_or_compute("ccc");
        assert!(!cache.contains("a"));
        assert!(cache.contains("bb"));
        assert!(cache.contains("ccc"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn clear_keeps_stats() {
        let mut cache = WidthCache::new(4);
        cache.get_or_compute("x");
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn hit_rate() {
        let mut cache = WidthCache::new(4);
        assert_eq!(cache.stats().hit_rate(), 0.0);
        cache.get_or_compute("x");
        cache.get_or_compute("x");
        cache.get_or_compute("x");
        cache.get_or_compute("y");
        assert!((cache.stats().hit_rate() - 0.5).abs() < f64::EPSILON);
    }
}
