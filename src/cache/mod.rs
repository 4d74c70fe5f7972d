//! Measurement cache: identity to last observed size.
//!
//! The plain [`MeasurementCache`] serves single-threaded hosts; [`SharedCache`]
//! wraps it in a lock for hosts whose measurement callbacks may overlap.

mod core;
mod shared;

pub use self::core::{MeasurementCache, Recorded};
pub use shared::SharedCache;
