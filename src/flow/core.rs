use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use crate::cache::{MeasurementCache, Recorded};
use crate::config::FlowConfig;
use crate::error::{FlowError, Result};
use crate::geometry::{Size, non_negative};
use crate::item::FlowItem;
use crate::layout::{Line, Placement, pack, place};
use crate::logging::{LAYOUT_TARGET, LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::FlowMetrics;

/// Result of the most recent reflow pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowLayout {
    lines: Vec<Line>,
    placement: Placement,
    width: f32,
    excluded: usize,
}

impl FlowLayout {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Input positions grouped per line.
    pub fn line_indices(&self) -> Vec<Vec<usize>> {
        self.lines.iter().map(|line| line.indices().collect()).collect()
    }

    /// Container width the layout was computed for.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Total content height, for sizing the container to fit.
    pub fn height(&self) -> f32 {
        self.placement.height
    }

    /// Items not placed in this pass: unmeasured, or everything while the width is zero.
    pub fn excluded(&self) -> usize {
        self.excluded
    }
}

/// Wrapping container state: width, measurements and the derived layout.
///
/// Width and sizes are plain fields written by the host. Each write compares
/// against the stored value and only a real change marks the layout stale;
/// [`layout`](WrapFlow::layout) repacks from scratch when stale and otherwise
/// hands back the previous result.
pub struct WrapFlow<K> {
    config: FlowConfig,
    width: f32,
    cache: MeasurementCache<K>,
    layout: FlowLayout,
    last_keys: Vec<K>,
    stale: bool,
    logger: Option<Logger>,
    metrics: Option<Arc<Mutex<FlowMetrics>>>,
}

impl<K: Eq + Hash + Clone> WrapFlow<K> {
    /// Spacings are clamped to finite non-negative values on the way in, so
    /// packing and placement always agree on them.
    pub fn new(config: FlowConfig) -> Self {
        Self {
            config: config.sanitized(),
            width: 0.0,
            cache: MeasurementCache::new(),
            layout: FlowLayout::default(),
            last_keys: Vec::new(),
            stale: true,
            logger: None,
            metrics: None,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(FlowMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<FlowMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Replace the container settings. Returns whether the sanitized settings changed.
    pub fn set_config(&mut self, config: FlowConfig) -> bool {
        let config = config.sanitized();
        if self.config == config {
            return false;
        }
        self.config = config;
        self.stale = true;
        true
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Push a new container width. Returns whether it differs from the stored one.
    pub fn set_width(&mut self, width: f32) -> bool {
        let width = non_negative(width);
        if width == self.width {
            return false;
        }
        self.width = width;
        self.stale = true;
        self.with_metrics(FlowMetrics::record_width_change);
        true
    }

    /// Store a measurement for `key`; only a first or changed size invalidates the layout.
    pub fn record(&mut self, key: K, size: Size) -> Recorded {
        let outcome = self.cache.record(key, size);
        if outcome.is_change() {
            self.stale = true;
        }
        self.with_metrics(|metrics| metrics.record_measurement(outcome.is_change()));
        outcome
    }

    pub fn lookup(&self, key: &K) -> Option<Size> {
        self.cache.lookup(key)
    }

    pub fn cache(&self) -> &MeasurementCache<K> {
        &self.cache
    }

    /// Forget sizes for identities that are not part of `items`.
    pub fn prune<T>(&mut self, items: &[T]) -> usize
    where
        T: FlowItem<Key = K>,
    {
        let valid: HashSet<K> = items.iter().map(|item| item.key().clone()).collect();
        self.cache.prune(&valid)
    }

    /// True until the first measurement arrives; hosts show an unwrapped row meanwhile.
    pub fn is_measuring(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Current layout for `items`, repacking only if something it depends on changed.
    pub fn layout<T>(&mut self, items: &[T]) -> &FlowLayout
    where
        T: FlowItem<Key = K>,
    {
        if !self.stale && self.same_sequence(items) {
            self.with_metrics(FlowMetrics::record_reuse);
            return &self.layout;
        }

        let lines = pack(
            items,
            |key| self.cache.lookup(key),
            self.width,
            self.config.spacing,
        );
        let placement = place(&lines, self.width, &self.config);
        let packed: usize = lines.iter().map(Line::len).sum();
        let excluded = items.len() - packed;

        self.layout = FlowLayout {
            lines,
            placement,
            width: self.width,
            excluded,
        };
        self.last_keys = items.iter().map(|item| item.key().clone()).collect();
        self.stale = false;
        self.cache.take_dirty();

        self.with_metrics(|metrics| metrics.record_pack(excluded));
        self.log_repack(items.len());
        &self.layout
    }

    /// Log the current metrics snapshot. A no-op without both a logger and metrics.
    pub fn emit_metrics(&self, target: &str) -> Result<()> {
        let (Some(logger), Some(metrics)) = (&self.logger, &self.metrics) else {
            return Ok(());
        };
        let snapshot = metrics
            .lock()
            .map_err(|_| FlowError::MetricsPoisoned)?
            .snapshot();
        logger.log_event(snapshot.to_log_event(target))?;
        Ok(())
    }

    fn same_sequence<T>(&self, items: &[T]) -> bool
    where
        T: FlowItem<Key = K>,
    {
        self.last_keys.len() == items.len()
            && self
                .last_keys
                .iter()
                .zip(items)
                .all(|(known, item)| known == item.key())
    }

    fn with_metrics(&self, update: impl FnOnce(&mut FlowMetrics)) {
        if let Some(metrics) = &self.metrics {
            if let Ok(mut guard) = metrics.lock() {
                update(&mut *guard);
            }
        }
    }

    fn log_repack(&self, item_count: usize) {
        let Some(logger) = &self.logger else {
            return;
        };
        if !logger.enabled(LogLevel::Debug) {
            return;
        }
        let event = event_with_fields(
            LogLevel::Debug,
            LAYOUT_TARGET,
            "repacked",
            [
                json_kv("width", self.layout.width),
                json_kv("items", item_count),
                json_kv("lines", self.layout.lines.len()),
                json_kv("excluded", self.layout.excluded),
                json_kv("height", self.layout.height()),
            ],
        );
        // A broken sink must not affect layout.
        let _ = logger.log_event(event);
    }
}

impl<K: Eq + Hash + Clone> Default for WrapFlow<K> {
    fn default() -> Self {
        Self::new(FlowConfig::default())
    }
}
