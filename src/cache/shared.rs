use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{FlowError, Result};
use crate::geometry::Size;
use crate::item::FlowItem;
use crate::layout::{Line, pack};

use super::{MeasurementCache, Recorded};

/// Lock-guarded cache handle for hosts that measure items from several threads.
///
/// Writers take the lock per `record`, so measurements for different identities
/// never interfere. [`pack_with`](SharedCache::pack_with) holds one read guard for
/// the whole pass, so a single pack always sees a consistent snapshot.
pub struct SharedCache<K> {
    inner: Arc<RwLock<MeasurementCache<K>>>,
}

impl<K> Clone for SharedCache<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> Default for SharedCache<K> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MeasurementCache::default())),
        }
    }
}

impl<K: Eq + Hash + Clone> SharedCache<K> {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MeasurementCache<K>>> {
        self.inner.read().map_err(|_| FlowError::CachePoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MeasurementCache<K>>> {
        self.inner.write().map_err(|_| FlowError::CachePoisoned)
    }

    pub fn record(&self, key: K, size: Size) -> Result<Recorded> {
        Ok(self.write()?.record(key, size))
    }

    pub fn lookup(&self, key: &K) -> Result<Option<Size>> {
        Ok(self.read()?.lookup(key))
    }

    pub fn prune(&self, valid: &HashSet<K>) -> Result<usize> {
        Ok(self.write()?.prune(valid))
    }

    pub fn take_dirty(&self) -> Result<bool> {
        Ok(self.write()?.take_dirty())
    }

    /// Owned copy of the current cache state.
    pub fn snapshot(&self) -> Result<MeasurementCache<K>> {
        Ok(self.read()?.clone())
    }

    /// Pack `items` against one read-locked view of the cache.
    pub fn pack_with<T>(&self, items: &[T], container_width: f32, spacing: f32) -> Result<Vec<Line>>
    where
        T: FlowItem<Key = K>,
    {
        let guard = self.read()?;
        Ok(pack(items, |key| guard.lookup(key), container_width, spacing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_records_for_distinct_identities() {
        let cache: SharedCache<u32> = SharedCache::new();
        let handles: Vec<_> = (0..8u32)
            .map(|id| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        cache
                            .record(id, Size::new(10.0 + id as f32, 4.0))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = cache.snapshot().unwrap();
        assert_eq!(snapshot.len(), 8);
        for id in 0..8u32 {
            assert_eq!(snapshot.lookup(&id), Some(Size::new(10.0 + id as f32, 4.0)));
        }
    }

    #[test]
    fn pack_with_reads_current_sizes() {
        let cache = SharedCache::new();
        cache.record("a", Size::new(50.0, 10.0)).unwrap();
        cache.record("b", Size::new(60.0, 10.0)).unwrap();
        cache.record("c", Size::new(40.0, 10.0)).unwrap();

        let lines = cache.pack_with(&["a", "b", "c"], 120.0, 10.0).unwrap();
        let indices: Vec<Vec<usize>> = lines.iter().map(|line| line.indices().collect()).collect();
        assert_eq!(indices, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn prune_drops_identities_outside_the_set() {
        let cache = SharedCache::new();
        cache.record("a", Size::new(1.0, 1.0)).unwrap();
        cache.record("b", Size::new(2.0, 1.0)).unwrap();

        let valid: HashSet<_> = ["b"].into_iter().collect();
        assert_eq!(cache.prune(&valid).unwrap(), 1);
        assert_eq!(cache.lookup(&"a").unwrap(), None);
        assert_eq!(cache.lookup(&"b").unwrap(), Some(Size::new(2.0, 1.0)));
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let cache: SharedCache<u32> = SharedCache::new();
        let writer = cache.clone();
        let result = thread::spawn(move || {
            let _guard = writer.inner.write().unwrap();
            panic!("measurement callback failed");
        })
        .join();
        assert!(result.is_err());

        assert!(matches!(
            cache.record(1, Size::new(1.0, 1.0)),
            Err(FlowError::CachePoisoned)
        ));
        assert!(matches!(cache.lookup(&1), Err(FlowError::CachePoisoned)));
        assert!(matches!(
            cache.pack_with(&[1u32], 10.0, 0.0),
            Err(FlowError::CachePoisoned)
        ));
    }

    #[test]
    fn take_dirty_tracks_changes() {
        let cache = SharedCache::new();
        cache.record("a", Size::new(5.0, 5.0)).unwrap();
        assert!(cache.take_dirty().unwrap());
        cache.record("a", Size::new(5.0, 5.0)).unwrap();
        assert!(!cache.take_dirty().unwrap());
    }
}
