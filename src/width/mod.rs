mod utils;

pub use utils::{display_width, measure_label};
