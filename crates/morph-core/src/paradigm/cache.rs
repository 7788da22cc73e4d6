use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::trace;

use super::Paradigm;
use crate::lexicon::EntryId;

/// Append-only paradigm cache for one language.
///
/// Paradigms never change once generated, so entries are never replaced or
/// evicted. Once `capacity` paradigms are stored, new ones are returned
/// without being inserted.
pub struct ParadigmCache {
    capacity: usize,
    map: RwLock<HashMap<EntryId, Arc<Paradigm>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub len: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

impl ParadigmCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            map: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, id: EntryId) -> Option<Arc<Paradigm>> {
        let map = self.map.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&id).cloned()
    }

    /// Cached paradigm for `id`, generating it with `f` on a miss.
    ///
    /// `f` runs without the lock held; if two threads race on the same id the
    /// first inserted paradigm wins and both callers receive it.
    pub fn get_or_insert_with(&self, id: EntryId, f: impl FnOnce() -> Paradigm) -> Arc<Paradigm> {
        if let Some(p) = self.get(id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(entry = %id, "paradigm cache hit");
            return p;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let generated = Arc::new(f());
        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = map.get(&id) {
            return Arc::clone(existing);
        }
        if map.len() < self.capacity {
            map.insert(id, Arc::clone(&generated));
        }
        generated
    }

    pub fn len(&self) -> usize {
        self.map.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            len: self.len(),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty(id: u32) -> Paradigm {
        Paradigm::new(EntryId(id))
    }

    #[test]
    fn insert_then_hit() {
        let cache = ParadigmCache::new(4);
        let a = cache.get_or_insert_with(EntryId(0), || empty(0));
        let b = cache.get_or_insert_with(EntryId(0), || panic!("must not regenerate"));
        assert!(Arc::ptr_eq(&a, &b));
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.len), (1, 1, 1));
    }

    #[test]
    fn full_cache_stops_inserting() {
        let cache = ParadigmCache::new(2);
        for id in 0..5 {
            cache.get_or_insert_with(EntryId(id), || empty(id));
        }
        assert_eq!(cache.len(), 2);
        assert!(cache.get(EntryId(0)).is_some());
        assert!(cache.get(EntryId(4)).is_none());
        let p = cache.get_or_insert_with(EntryId(4), || empty(4));
        assert_eq!(p.entry(), EntryId(4));
    }

    #[test]
    fn concurrent_access() {
        let cache = ParadigmCache::new(64);
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for id in 0..32 {
                        cache.get_or_insert_with(EntryId(id), || empty(id));
                    }
                });
            }
        });
        assert_eq!(cache.len(), 32);
        let stats = cache.stats();
        assert_eq!(stats.hits + stats.misses, 128);
    }
}
