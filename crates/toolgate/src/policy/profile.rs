//! Profile 预设配置模块
//!
//! Static registry of named profiles. A profile is a list of default allow
//! tokens (literal tool names or group references).
//!
//! Built-in profiles:
//! - `minimal`: status query and memory search only
//! - `research`: web, memory and session tools
//! - `canvas`: canvas editing, task suggestion and session tools
//! - `full`: no tokens; contributes no restriction at all

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::groups::expand_tool_groups;

/// Profile that contributes no restriction.
pub const FULL_PROFILE: &str = "full";

static PROFILES: Lazy<IndexMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    IndexMap::from([
        ("minimal", vec!["session_status", "memory_search"]),
        ("research", vec!["group:web", "group:memory", "group:session"]),
        ("canvas", vec!["group:canvas", "group:tasks", "group:session"]),
        (FULL_PROFILE, Vec::new()),
    ])
});

/// Raw tokens registered for profile `name`.
pub fn profile_tokens(name: &str) -> Option<&'static [&'static str]> {
    PROFILES.get(name).map(Vec::as_slice)
}

/// 获取所有 Profile 名称（注册顺序）
pub fn profile_names() -> Vec<&'static str> {
    PROFILES.keys().copied().collect()
}

/// 检查 Profile 是否存在
pub fn is_known_profile(name: &str) -> bool {
    PROFILES.contains_key(name)
}

/// Resolve a profile into its literal allow list.
///
/// Absent or unknown profiles resolve to an empty list, as does `full`. An
/// empty list downstream means "do not narrow by allow", never "allow
/// nothing".
pub fn resolve_profile_allow_list(profile: Option<&str>) -> Vec<String> {
    match profile.and_then(profile_tokens) {
        Some(tokens) => expand_tool_groups(tokens),
        None => Vec::new(),
    }
}

// =============================================================================
// 单元测试
// =============================================================================
