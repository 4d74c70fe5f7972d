//! Layout module orchestrator.
//!
//! [`pack`] decides which items share a line; [`place`] turns those lines into
//! rectangles. Both are stateless and rerun from scratch on every change.

mod pack;
mod place;

pub use pack::{Line, LineEntry, pack};
pub use place::{Alignment, FlowDirection, PlacedItem, Placement, place};
