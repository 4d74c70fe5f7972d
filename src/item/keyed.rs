//! Identity adapter for values that carry no identity of their own.
//!
//! Keys are derived from the value's `Hash` output and the value's occurrence
//! ordinal among equal values, so the same input sequence always yields the
//! same keys and repeated values still get distinct ones. Allocation order and
//! random ids play no part.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use blake3::Hash as Digest;

use super::FlowItem;

/// Stable identity synthesized from a value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueKey(Digest);

impl ValueKey {
    /// Key for the first occurrence of `value`.
    pub fn of<T: Hash + ?Sized>(value: &T) -> Self {
        Self::nth(value, 0)
    }

    /// Key for the `ordinal`-th occurrence of `value` within one sequence.
    pub fn nth<T: Hash + ?Sized>(value: &T, ordinal: u32) -> Self {
        let mut hasher = DigestHasher(blake3::Hasher::new());
        value.hash(&mut hasher);
        hasher.0.update(&ordinal.to_le_bytes());
        Self(hasher.0.finalize())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ValueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.0.to_hex();
        write!(f, "ValueKey({})", &hex.as_str()[..12])
    }
}

/// Feeds `Hash` output into blake3 so keys do not depend on a seeded hasher.
struct DigestHasher(blake3::Hasher);

impl Hasher for DigestHasher {
    fn finish(&self) -> u64 {
        let digest = self.0.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }

    fn write(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }
}

/// A value paired with its synthesized identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyed<T> {
    pub key: ValueKey,
    pub value: T,
}

impl<T> FlowItem for Keyed<T> {
    type Key = ValueKey;

    fn key(&self) -> &Self::Key {
        &self.key
    }
}

/// Attach a stable key to every value, disambiguating repeats by ordinal.
pub fn keyed<T, I>(values: I) -> Vec<Keyed<T>>
where
    T: Hash,
    I: IntoIterator<Item = T>,
{
    let mut seen: HashMap<ValueKey, u32> = HashMap::new();
    values
        .into_iter()
        .map(|value| {
            let ordinal = seen.entry(ValueKey::of(&value)).or_insert(0);
            let key = ValueKey::nth(&value, *ordinal);
            *ordinal += 1;
            Keyed { key, value }
        })
        .collect()
}
