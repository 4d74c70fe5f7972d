use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::geometry::Size;

/// Outcome of recording a measurement, used by hosts to decide whether to repack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// First size ever seen for this identity.
    First,
    /// The stored size differed and was replaced.
    Changed,
    /// Same size as before; nothing downstream needs to run.
    Unchanged,
}

impl Recorded {
    pub fn is_change(self) -> bool {
        !matches!(self, Recorded::Unchanged)
    }
}

/// Last observed intrinsic size per item identity.
///
/// Only the measurement pass writes here. Entries for identities that are no
/// longer visible are ignored by lookups and can be dropped with [`prune`].
///
/// [`prune`]: MeasurementCache::prune
#[derive(Debug, Clone)]
pub struct MeasurementCache<K> {
    entries: HashMap<K, Size>,
    dirty: bool,
}

impl<K> Default for MeasurementCache<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            dirty: false,
        }
    }
}

impl<K: Eq + Hash> MeasurementCache<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the size for `key`. Writing an identical size is a no-op.
    pub fn record(&mut self, key: K, size: Size) -> Recorded {
        use std::collections::hash_map::Entry;

        let outcome = match self.entries.entry(key) {
            Entry::Occupied(mut entry) => {
                if same_size(entry.get(), &size) {
                    Recorded::Unchanged
                } else {
                    entry.insert(size);
                    Recorded::Changed
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(size);
                Recorded::First
            }
        };

        if outcome.is_change() {
            self.dirty = true;
        }
        outcome
    }

    pub fn lookup(&self, key: &K) -> Option<Size> {
        self.entries.get(key).copied()
    }

    /// Drop entries whose identity is not in `valid`. Returns how many were removed.
    pub fn prune(&mut self, valid: &HashSet<K>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| valid.contains(key));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any recorded size changed since the last [`take_dirty`](Self::take_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear and return the change flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

// Exact comparison, except that identical bit patterns (NaN included) count as equal
// so repeated writes stay idempotent.
fn same_size(a: &Size, b: &Size) -> bool {
    let same = |x: f32, y: f32| x == y || x.to_bits() == y.to_bits();
    same(a.width, b.width) && same(a.height, b.height)
}
