//! Tool Groups 工具分组模块
//!
//! Static directory of named tool groups, referenced from policy tokens as
//! `group:<name>`. The table is built once on first use and never mutated.
//!
//! The `all` group is derived from every other group (deduplicated union in
//! registration order) instead of being listed by hand.

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;

/// Prefix marking a group reference inside a policy token.
pub const GROUP_PREFIX: &str = "group:";

/// Name of the group holding every known tool.
pub const ALL_GROUP: &str = "all";

/// Built-in groups, in registration order. `all` is appended at init.
const BUILTIN_GROUPS: &[(&str, &[&str])] = &[
    ("web", &["web_search", "web_fetch"]),
    ("memory", &["memory_search", "memory_get"]),
    (
        "canvas",
        &[
            "canvas_read",
            "canvas_add_node",
            "canvas_update_node",
            "canvas_remove_node",
            "canvas_connect_nodes",
        ],
    ),
    ("tasks", &["suggest_tasks"]),
    ("session", &["session_status"]),
];

static GROUPS: Lazy<IndexMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut groups: IndexMap<&'static str, Vec<&'static str>> = BUILTIN_GROUPS
        .iter()
        .map(|(name, members)| (*name, members.to_vec()))
        .collect();

    let all: IndexSet<&'static str> = groups.values().flatten().copied().collect();
    groups.insert(ALL_GROUP, all.into_iter().collect());
    groups
});

/// Members of group `name` (without the `group:` prefix), in registered order.
pub fn group_members(name: &str) -> Option<&'static [&'static str]> {
    GROUPS.get(name).map(Vec::as_slice)
}

/// All group names in registration order (`all` last).
pub fn group_names() -> Vec<&'static str> {
    GROUPS.keys().copied().collect()
}

/// 检查字符串是否为分组引用
pub fn is_group_reference(token: &str) -> bool {
    token.starts_with(GROUP_PREFIX)
}

/// Expand `group:<name>` tokens into literal tool names.
///
/// Non-group tokens pass through untouched (including wildcards). Unknown
/// groups contribute nothing. The result is deduplicated, keeping the first
/// occurrence of each name.
///
/// # Examples
/// ```
/// use toolgate::policy::expand_tool_groups;
///
/// let names = expand_tool_groups(&["group:web", "web_search", "memory_get"]);
/// assert_eq!(names, vec!["web_search", "web_fetch", "memory_get"]);
/// ```
pub fn expand_tool_groups<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut expanded: IndexSet<String> = IndexSet::new();

    for token in tokens {
        let token = token.as_ref();
        match token.strip_prefix(GROUP_PREFIX) {
            Some(group) => {
                if let Some(members) = group_members(group) {
                    expanded.extend(members.iter().map(|name| (*name).to_string()));
                }
            }
            None => {
                expanded.insert(token.to_string());
            }
        }
    }

    expanded.into_iter().collect()
}

// =============================================================================
// 单元测试
// =============================================================================
