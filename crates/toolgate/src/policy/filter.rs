//! 工具过滤模块
//!
//! Narrows a candidate tool list to the permitted subset, e.g. when
//! advertising available tools to the model at session start.

use tracing::debug;

use super::matcher::PolicyMatcher;
use super::resolver::resolve_effective_policy;
use super::types::PolicyConfig;

/// Keep the candidates `config` permits, preserving order and duplicates.
pub fn filter_tools_by_policy<S: AsRef<str>>(
    candidates: &[S],
    config: &PolicyConfig,
) -> Vec<String> {
    let matcher = resolve_effective_policy(config);
    filter_tools_with(candidates, &matcher)
}

/// Same as [`filter_tools_by_policy`] with an already-resolved matcher.
pub fn filter_tools_with<S: AsRef<str>>(
    candidates: &[S],
    matcher: &PolicyMatcher,
) -> Vec<String> {
    let permitted: Vec<String> = candidates
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| matcher.is_allowed(name))
        .map(str::to_string)
        .collect();

    debug!(
        candidates = candidates.len(),
        permitted = permitted.len(),
        "Filtered tools by policy"
    );
    permitted
}
