//! Tool Execution Metrics
//!
//! Running totals of tool invocations for operational visibility.
//!
//! The runtime calls [`ToolExecutionMetrics::record`] after every completed
//! tool call, whatever its outcome, passing the duration it measured itself.
//! Entries are kept in first-seen order and never evicted.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Aggregated counters for one tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolStats {
    /// Number of recorded calls
    pub count: u64,
    /// Sum of all call durations in milliseconds
    pub total_duration_ms: u64,
    /// Number of calls that ended in error
    pub error_count: u64,
}

impl ToolStats {
    /// Average call duration in milliseconds (integer division)
    pub fn average_duration_ms(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            self.total_duration_ms / self.count
        }
    }

    /// Fraction of calls that ended in error
    pub fn error_rate(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.error_count as f64 / self.count as f64
        }
    }

    fn summary_line(&self, name: &str) -> String {
        format!(
            "{}: {} calls, avg {}ms, {} errors",
            name,
            self.count,
            self.average_duration_ms(),
            self.error_count
        )
    }
}

/// Per-tool execution metrics shared across concurrent invocations.
///
/// All mutation goes through one lock, so a `record` is never observed
/// half-applied.
#[derive(Debug, Default)]
pub struct ToolExecutionMetrics {
    tools: Mutex<IndexMap<String, ToolStats>>,
}

impl ToolExecutionMetrics {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed tool call
    pub fn record(&self, name: &str, duration_ms: u64, is_error: bool) {
        let mut tools = self.tools.lock();
        let stats = tools.entry(name.to_string()).or_default();
        stats.count += 1;
        stats.total_duration_ms = stats.total_duration_ms.saturating_add(duration_ms);
        if is_error {
            stats.error_count += 1;
        }

        debug!(
            tool = %name,
            duration_ms,
            is_error,
            count = stats.count,
            "Recorded tool execution"
        );
    }

    /// Counters for one tool, if it was ever recorded
    pub fn get(&self, name: &str) -> Option<ToolStats> {
        self.tools.lock().get(name).copied()
    }

    /// Copy of every entry in first-seen order
    pub fn snapshot(&self) -> Vec<(String, ToolStats)> {
        self.tools
            .lock()
            .iter()
            .map(|(name, stats)| (name.clone(), *stats))
            .collect()
    }

    /// Number of distinct tools recorded
    pub fn tool_count(&self) -> usize {
        self.tools.lock().len()
    }

    /// Total calls across all tools
    pub fn total_calls(&self) -> u64 {
        self.tools.lock().values().map(|stats| stats.count).sum()
    }

    /// Check whether anything has been recorded
    pub fn is_empty(&self) -> bool {
        self.tools.lock().is_empty()
    }

    /// One line per tool in first-seen order.
    ///
    /// Returns an empty string when nothing has been recorded; every tracked
    /// entry has at least one call, so a line never reads "0 calls".
    pub fn summary(&self) -> String {
        self.tools
            .lock()
            .iter()
            .map(|(name, stats)| stats.summary_line(name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

static GLOBAL_METRICS: Lazy<ToolExecutionMetrics> = Lazy::new(ToolExecutionMetrics::new);

/// Process-wide aggregator
pub fn global_metrics() -> &'static ToolExecutionMetrics {
    &GLOBAL_METRICS
}
