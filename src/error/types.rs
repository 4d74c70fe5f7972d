use thiserror::Error;

use crate::logging::LoggingError;

/// Unified result type for the wrapflow crate.
pub type Result<T> = std::result::Result<T, FlowError>;

/// Errors surfaced at the edges of the reflow engine.
///
/// Packing itself never fails; these only come from shared state, config
/// parsing, logging sinks, metrics emission and terminal output.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("measurement cache lock poisoned")]
    CachePoisoned,
    #[error("flow metrics lock poisoned")]
    MetricsPoisoned,
    #[error("invalid flow config: {0}")]
    Config(String),
    #[error("logging failure: {0}")]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
