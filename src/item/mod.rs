//! Item identity: the trait the packer is generic over, plus the adapter that
//! derives keys for plain values.

mod core;
pub mod keyed;

pub use self::core::FlowItem;
pub use keyed::{Keyed, ValueKey, keyed};
