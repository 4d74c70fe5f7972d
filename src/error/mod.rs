mod types;

pub use types::{FlowError, Result};
