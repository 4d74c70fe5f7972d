use std::hash::Hash;

/// Capability set the packer needs from an item: a stable identity.
///
/// Content stays opaque. Sizes are looked up by key, never by position, so a
/// key must identify the same item across recomputations. Keys are expected to
/// be unique within one sequence; duplicates share a single cached size.
pub trait FlowItem {
    type Key: Eq + Hash + Clone;

    fn key(&self) -> &Self::Key;
}

impl<'a> FlowItem for &'a str {
    type Key = &'a str;

    fn key(&self) -> &Self::Key {
        self
    }
}

macro_rules! self_keyed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FlowItem for $ty {
                type Key = $ty;

                fn key(&self) -> &Self::Key {
                    self
                }
            }
        )*
    };
}

self_keyed!(String, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    fn key_of<T: FlowItem>(item: &T) -> T::Key {
        item.key().clone()
    }

    #[test]
    fn plain_values_are_their_own_key() {
        assert_eq!(key_of(&"chip"), "chip");
        assert_eq!(key_of(&String::from("tag")), "tag");
        assert_eq!(key_of(&7u32), 7);
    }
}
