use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters describing how much reflow work the container actually did.
#[derive(Debug, Default, Clone)]
pub struct FlowMetrics {
    measurements: u64,
    redundant_measurements: u64,
    width_changes: u64,
    packs: u64,
    reused_layouts: u64,
    excluded_items: u64,
}

impl FlowMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_measurement(&mut self, changed: bool) {
        if changed {
            self.measurements = self.measurements.saturating_add(1);
        } else {
            self.redundant_measurements = self.redundant_measurements.saturating_add(1);
        }
    }

    pub fn record_width_change(&mut self) {
        self.width_changes = self.width_changes.saturating_add(1);
    }

    pub fn record_pack(&mut self, excluded: usize) {
        self.packs = self.packs.saturating_add(1);
        self.excluded_items = self.excluded_items.saturating_add(excluded as u64);
    }

    pub fn record_reuse(&mut self) {
        self.reused_layouts = self.reused_layouts.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            measurements: self.measurements,
            redundant_measurements: self.redundant_measurements,
            width_changes: self.width_changes,
            packs: self.packs,
            reused_layouts: self.reused_layouts,
            excluded_items: self.excluded_items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub measurements: u64,
    pub redundant_measurements: u64,
    pub width_changes: u64,
    pub packs: u64,
    pub reused_layouts: u64,
    pub excluded_items: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "flow_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("measurements".to_string(), json!(self.measurements));
        map.insert(
            "redundant_measurements".to_string(),
            json!(self.redundant_measurements),
        );
        map.insert("width_changes".to_string(), json!(self.width_changes));
        map.insert("packs".to_string(), json!(self.packs));
        map.insert("reused_layouts".to_string(), json!(self.reused_layouts));
        map.insert("excluded_items".to_string(), json!(self.excluded_items));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurements_split_by_change() {
        let mut metrics = FlowMetrics::new();
        metrics.record_measurement(true);
        metrics.record_measurement(false);
        metrics.record_measurement(false);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.measurements, 1);
        assert_eq!(snapshot.redundant_measurements, 2);
    }

    #[test]
    fn snapshot_renders_log_event() {
        let mut metrics = FlowMetrics::new();
        metrics.record_pack(2);
        metrics.record_reuse();

        let event = metrics.snapshot().to_log_event("wrapflow::metrics");
        assert_eq!(event.message, "flow_metrics");
        assert_eq!(event.fields["packs"], json!(1));
        assert_eq!(event.fields["excluded_items"], json!(2));
        assert_eq!(event.fields["reused_layouts"], json!(1));
    }
}
