use serde::Serialize;
use std::sync::Mutex;

/// Counters shared by the simulation driver and the sitrep desk.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub ticks_applied: usize,
    pub ticks_skipped: usize,
    pub summaries: usize,
    pub summary_fallbacks: usize,
    pub intel_queries: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    fn bump(&self, update: impl FnOnce(&mut MetricsSnapshot)) {
        if let Ok(mut metrics) = self.inner.lock() {
            update(&mut metrics);
        }
    }

    pub fn record_tick(&self) {
        self.bump(|m| m.ticks_applied += 1);
    }

    pub fn record_skipped_tick(&self) {
        self.bump(|m| m.ticks_skipped += 1);
    }

    pub fn record_summary(&self) {
        self.bump(|m| m.summaries += 1);
    }

    pub fn record_fallback(&self) {
        self.bump(|m| m.summary_fallbacks += 1);
    }

    pub fn record_intel_query(&self) {
        self.bump(|m| m.intel_queries += 1);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
