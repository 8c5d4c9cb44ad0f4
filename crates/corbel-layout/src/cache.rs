#![forbid(unsafe_code)]

//! Memoization for pager plans.
//!
//! Pagination strips over large collections are replanned on every cursor
//! move, selection change, and refresh tick, almost always with inputs the
//! control has already seen. [`PlanCache`] stores recent plans keyed by
//! `(current, total, delta)` so those replans become lookups.

use crate::pager::{PageMarker, PagePlanner};
use rustc_hash::FxHashMap;

/// Cache key identifying one plan computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PlanKey {
    current: u64,
    total: u64,
    delta: u64,
}

/// Cached plan with metadata for eviction.
#[derive(Clone, Debug)]
struct CachedPlanEntry {
    /// The cached marker sequence.
    markers: Vec<PageMarker>,
    /// Generation when this entry was created/updated.
    generation: u64,
    /// Access count for LRU eviction.
    access_count: u32,
}

/// Statistics about plan cache performance.
#[derive(Debug, Clone, Default)]
pub struct PlanCacheStats {
    /// Number of entries currently in the cache.
    pub entries: usize,
    /// Total cache hits since creation or last reset.
    pub hits: u64,
    /// Total cache misses since creation or last reset.
    pub misses: u64,
    /// Hit rate as a fraction (0.0 to 1.0).
    pub hit_rate: f64,
}

/// Cache for pager plan results.
///
/// # Capacity
///
/// The cache has a fixed maximum capacity. When full, the least recently
/// used entry is evicted to make room.
///
/// # Generation-Based Invalidation
///
/// Each entry is tagged with a generation number. Calling
/// [`invalidate_all()`] bumps the generation, making all existing entries
/// stale without touching them.
///
/// [`invalidate_all()`]: PlanCache::invalidate_all
#[derive(Debug)]
pub struct PlanCache {
    entries: FxHashMap<PlanKey, CachedPlanEntry>,
    generation: u64,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl PlanCache {
    /// Create a new cache with the specified maximum capacity.
    ///
    /// A strip stepping through pages touches a handful of distinct keys;
    /// the default of 64 covers several controls sharing one cache.
    #[inline]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(max_entries, Default::default()),
            generation: 0,
            max_entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Get a cached plan or compute and cache a new one.
    ///
    /// If a valid (same generation) entry exists for these inputs, returns
    /// a clone of it. Otherwise plans through `planner`, caches the result,
    /// and returns it. Cached output is always identical to what
    /// [`PagePlanner::plan`] would return directly.
    pub fn get_or_plan(
        &mut self,
        planner: &PagePlanner,
        current_page: u64,
        total_pages: u64,
    ) -> Vec<PageMarker> {
        let key = PlanKey {
            current: current_page,
            total: total_pages,
            delta: planner.delta(),
        };

        if let Some(entry) = self.entries.get_mut(&key)
            && entry.generation == self.generation
        {
            self.hits += 1;
            entry.access_count = entry.access_count.saturating_add(1);
            return entry.markers.clone();
        }

        self.misses += 1;
        let markers = planner.plan(current_page, total_pages);

        if self.entries.len() >= self.max_entries {
            self.evict_lru();
        }

        self.entries.insert(
            key,
            CachedPlanEntry {
                markers: markers.clone(),
                generation: self.generation,
                access_count: 1,
            },
        );

        markers
    }

    /// Invalidate all entries by bumping the generation.
    ///
    /// Existing entries become stale and will be replanned on next access.
    /// This is an O(1) operation; entries are not immediately removed.
    #[inline]
    pub fn invalidate_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Get current cache statistics.
    pub fn stats(&self) -> PlanCacheStats {
        let total = self.hits + self.misses;
        PlanCacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: if total > 0 {
                self.hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    /// Reset statistics counters to zero.
    #[inline]
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Clear all entries from the cache.
    ///
    /// Unlike [`invalidate_all()`], this immediately frees memory.
    ///
    /// [`invalidate_all()`]: PlanCache::invalidate_all
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Returns the current number of entries in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum capacity of the cache.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// Evict the least recently used entry.
    fn evict_lru(&mut self) {
        if let Some(key) = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.access_count)
            .map(|(k, _)| *k)
        {
            self.entries.remove(&key);
        }
    }
}

impl Default for PlanCache {
    /// Creates a cache with default capacity of 64 entries.
    fn default() -> Self {
        Self::new(64)
    }
}
