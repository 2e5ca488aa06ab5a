//! Property-based tests for tool execution metrics
//!
//! For any sequence of recorded calls, each tool's counters equal the sums
//! over its calls, and the summary has one line per distinct tool in
//! first-seen order.

use proptest::prelude::*;
use toolgate::ToolExecutionMetrics;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_tool_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("web_search".to_string()),
        Just("web_fetch".to_string()),
        Just("memory_get".to_string()),
        "[a-z_]{3,12}",
    ]
}

fn arb_call() -> impl Strategy<Value = (String, u64, bool)> {
    (arb_tool_name(), 0u64..10_000, any::<bool>())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_counters_equal_sums(calls in prop::collection::vec(arb_call(), 0..40)) {
        let metrics = ToolExecutionMetrics::new();
        for (name, duration, is_error) in &calls {
            metrics.record(name, *duration, *is_error);
        }

        for (name, stats) in metrics.snapshot() {
            let own: Vec<_> = calls.iter().filter(|(n, _, _)| *n == name).collect();
            prop_assert_eq!(stats.count, own.len() as u64);
            prop_assert_eq!(stats.total_duration_ms, own.iter().map(|(_, d, _)| *d).sum::<u64>());
            prop_assert_eq!(stats.error_count, own.iter().filter(|(_, _, e)| *e).count() as u64);
        }
        prop_assert_eq!(metrics.total_calls(), calls.len() as u64);
    }

    #[test]
    fn prop_summary_lines_follow_first_seen_order(
        calls in prop::collection::vec(arb_call(), 0..40)
    ) {
        let metrics = ToolExecutionMetrics::new();
        let mut first_seen: Vec<String> = Vec::new();
        for (name, duration, is_error) in &calls {
            metrics.record(name, *duration, *is_error);
            if !first_seen.contains(name) {
                first_seen.push(name.clone());
            }
        }

        let summary = metrics.summary();
        if first_seen.is_empty() {
            prop_assert_eq!(summary, "");
        } else {
            let lines: Vec<&str> = summary.split('\n').collect();
            prop_assert_eq!(lines.len(), first_seen.len());
            for (line, name) in lines.iter().zip(&first_seen) {
                let prefix = format!("{}: ", name);
                prop_assert!(line.starts_with(&prefix));
            }
        }
    }
}
