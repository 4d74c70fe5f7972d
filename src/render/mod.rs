//! Terminal rendering for flows of text chips.
//!
//! Painting is host glue: the renderer only reads a finished [`Placement`]
//! and never feeds back into packing.
//!
//! [`Placement`]: crate::layout::Placement

mod core;

pub use self::core::{ChipRenderer, RendererSettings};
