mod core;

pub use self::core::{FlowLayout, WrapFlow};
