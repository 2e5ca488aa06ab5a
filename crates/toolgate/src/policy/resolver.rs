//! 策略解析模块
//!
//! Layers a [`PolicyConfig`] into one effective [`PolicyMatcher`]:
//! - a non-empty `allow` replaces the profile's defaults outright
//! - otherwise the profile's expansion plus `alsoAllow` form the allow set
//! - `deny` is applied on top, always winning

use indexmap::IndexSet;
use tracing::debug;

use super::groups::expand_tool_groups;
use super::matcher::{make_tool_policy_matcher, PolicyMatcher};
use super::profile::resolve_profile_allow_list;
use super::types::PolicyConfig;

/// Resolve the effective allow tokens for `config`, before compilation.
///
/// An explicitly empty `allow` is treated the same as an omitted one.
pub fn effective_allow_tokens(config: &PolicyConfig) -> Vec<String> {
    if !config.allow.is_empty() {
        return config.allow.clone();
    }

    let mut merged: IndexSet<String> =
        resolve_profile_allow_list(config.profile.as_deref()).into_iter().collect();
    merged.extend(expand_tool_groups(&config.also_allow));
    merged.into_iter().collect()
}

/// Resolve a session policy into a reusable matcher.
///
/// | profile | allow | alsoAllow | deny | result |
/// |---|---|---|---|---|
/// | full | – | – | – | everything |
/// | minimal | – | – | – | minimal's tools |
/// | minimal | X | – | – | only X |
/// | minimal | – | X | – | minimal's tools and X |
/// | full | – | – | canvas_* | everything except canvas_* |
pub fn resolve_effective_policy(config: &PolicyConfig) -> PolicyMatcher {
    let allow = effective_allow_tokens(config);

    debug!(
        profile = ?config.profile,
        explicit_allow = !config.allow.is_empty(),
        allow = ?allow,
        deny = ?config.deny,
        "Resolved effective tool policy"
    );

    make_tool_policy_matcher(&allow, &config.deny)
}

// =============================================================================
// 单元测试
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    const EVERY_TOOL: &[&str] = &[
        "web_search",
        "web_fetch",
        "memory_search",
        "memory_get",
        "canvas_read",
        "canvas_add_node",
        "canvas_remove_node",
        "suggest_tasks",
        "session_status",
        "unregistered_tool",
    ];

    fn permitted(matcher: &PolicyMatcher) -> Vec<&'static str> {
        EVERY_TOOL
            .iter()
            .copied()
            .filter(|name| matcher.is_allowed(name))
            .collect()
    }

    #[test]
    fn test_full_profile_permits_everything() {
        let matcher = resolve_effective_policy(&PolicyConfig::new().with_profile("full"));
        assert!(matcher.is_unrestricted());
        assert_eq!(permitted(&matcher), EVERY_TOOL.to_vec());
    }

    #[test]
    fn test_empty_config_permits_everything() {
        let matcher = resolve_effective_policy(&PolicyConfig::default());
        assert!(matcher.is_unrestricted());
    }

    #[test]
    fn test_unknown_profile_contributes_no_restriction() {
        let matcher = resolve_effective_policy(&PolicyConfig::new().with_profile("bogus"));
        assert_eq!(permitted(&matcher), EVERY_TOOL.to_vec());
    }

    #[test]
    fn test_minimal_profile_permits_only_its_expansion() {
        let matcher = resolve_effective_policy(&PolicyConfig::new().with_profile("minimal"));
        assert_eq!(permitted(&matcher), vec!["memory_search", "session_status"]);
    }

    #[test]
    fn test_explicit_allow_overrides_profile() {
        let config = PolicyConfig::new()
            .with_profile("minimal")
            .with_allow(strings(&["web_search"]));
        let matcher = resolve_effective_policy(&config);
        assert_eq!(permitted(&matcher), vec!["web_search"]);
    }

    #[test]
    fn test_also_allow_is_additive() {
        let config = PolicyConfig::new()
            .with_profile("minimal")
            .with_also_allow(strings(&["web_search"]));
        let matcher = resolve_effective_policy(&config);
        assert_eq!(
            permitted(&matcher),
            vec!["web_search", "memory_search", "session_status"]
        );
    }

    #[test]
    fn test_also_allow_expands_groups() {
        let config = PolicyConfig::new()
            .with_profile("minimal")
            .with_also_allow(strings(&["group:tasks"]));
        assert_eq!(
            effective_allow_tokens(&config),
            vec!["session_status", "memory_search", "suggest_tasks"]
        );
    }

    // A profile contributing nothing leaves alsoAllow as the whole allow set.
    #[test]
    fn test_also_allow_without_profile_narrows_to_itself() {
        let config = PolicyConfig::new().with_also_allow(strings(&["web_search"]));
        let matcher = resolve_effective_policy(&config);
        assert_eq!(permitted(&matcher), vec!["web_search"]);
    }

    #[test]
    fn test_full_profile_with_wildcard_deny() {
        let config = PolicyConfig::new()
            .with_profile("full")
            .with_deny(strings(&["canvas_*"]));
        let matcher = resolve_effective_policy(&config);
        assert_eq!(
            permitted(&matcher),
            vec![
                "web_search",
                "web_fetch",
                "memory_search",
                "memory_get",
                "suggest_tasks",
                "session_status",
                "unregistered_tool",
            ]
        );
    }

    #[test]
    fn test_deny_wins_over_explicit_allow() {
        let config = PolicyConfig::new()
            .with_profile("minimal")
            .with_allow(strings(&["web_fetch"]))
            .with_deny(strings(&["web_*"]));
        let matcher = resolve_effective_policy(&config);
        assert!(permitted(&matcher).is_empty());
    }

    #[test]
    fn test_empty_explicit_allow_falls_through_to_profile() {
        let config = PolicyConfig::new()
            .with_profile("minimal")
            .with_allow(Vec::new());
        assert_eq!(
            effective_allow_tokens(&config),
            vec!["session_status", "memory_search"]
        );
    }

    #[test]
    fn test_explicit_allow_is_verbatim() {
        let config = PolicyConfig::new()
            .with_profile("research")
            .with_allow(strings(&["group:canvas", "web_*"]))
            .with_also_allow(strings(&["memory_get"]));
        assert_eq!(
            effective_allow_tokens(&config),
            vec!["group:canvas", "web_*"]
        );

        let matcher = resolve_effective_policy(&config);
        assert!(matcher.is_allowed("canvas_read"));
        assert!(matcher.is_allowed("web_fetch"));
        assert!(!matcher.is_allowed("memory_get"));
    }
}
