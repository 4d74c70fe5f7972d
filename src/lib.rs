//! Reflow layout for opaque, variably sized items.
//!
//! Items are packed left to right into lines that wrap once the container
//! width is used up, the way text breaks into lines. The crate keeps the two
//! pieces that matter apart: a [`MeasurementCache`] of last known item sizes,
//! written by whoever measures items, and a stateless greedy [`pack`] that turns
//! a sequence of items plus a size lookup into lines. [`WrapFlow`] glues them
//! together with explicit change detection so hosts only repack when a width
//! or a size actually changed.

pub mod cache;
pub mod config;
pub mod error;
pub mod flow;
pub mod geometry;
pub mod item;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod width;

pub use cache::{MeasurementCache, Recorded, SharedCache};
pub use config::FlowConfig;
pub use error::{FlowError, Result};
pub use flow::{FlowLayout, WrapFlow};
pub use geometry::{Rect, Size};
pub use item::{FlowItem, Keyed, ValueKey, keyed};
pub use layout::{Alignment, FlowDirection, Line, LineEntry, PlacedItem, Placement, pack, place};
pub use logging::{LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult};
pub use metrics::{FlowMetrics, MetricSnapshot};
pub use render::{ChipRenderer, RendererSettings};
pub use width::{display_width, measure_label};
