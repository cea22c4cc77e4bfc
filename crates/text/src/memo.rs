//! Bounded memoization for pure string functions.

use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use lru::LruCache;

/// A thread-safe, capacity-capped LRU map from inputs to results.
///
/// Results are a pure function of their key, so clearing the cache (or a
/// capacity of zero, which disables it) never changes what callers observe.
pub struct Memo<K: Hash + Eq, V> {
    cache: Option<Mutex<LruCache<K, V>>>,
}
impl<K: Hash + Eq, V: Clone> Memo<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self { cache: NonZeroUsize::new(capacity).map(|capacity| Mutex::new(LruCache::new(capacity))) }
    }

    /// Return the cached result for `key`, computing and storing it on a miss.
    ///
    /// The lock is not held while `compute` runs; two threads missing on the
    /// same key both compute it and the later write wins.
    pub fn get_or_insert_with<Q>(&self, key: &Q, compute: impl FnOnce() -> V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let Some(cache) = &self.cache else {
            return compute();
        };
        if let Some(value) = cache.lock().unwrap_or_else(PoisonError::into_inner).get(key) {
            return value.clone();
        }
        let value = compute();
        cache.lock().unwrap_or_else(PoisonError::into_inner).put(key.to_owned(), value.clone());
        value
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }

    pub fn len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().unwrap_or_else(PoisonError::into_inner).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().unwrap_or_else(PoisonError::into_inner).cap().get())
    }
}
impl<K: Hash + Eq, V> std::fmt::Debug for Memo<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (len, capacity) = match &self.cache {
            Some(cache) => {
                let cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
                (cache.len(), cache.cap().get())
            },
            None => (0, 0),
        };
        f.debug_struct("Memo").field("len", &len).field("capacity", &capacity).finish()
    }
}
