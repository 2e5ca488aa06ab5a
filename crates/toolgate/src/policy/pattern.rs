//! 工具名模式编译模块
//!
//! Turns raw policy tokens into [`Pattern`]s:
//! - `*` → [`Pattern::All`]
//! - `group:<name>` → one [`Pattern::Exact`] per member (`group:all` → `All`)
//! - any other token containing `*` → [`Pattern::Regex`]
//! - everything else → [`Pattern::Exact`]
//!
//! Only `*` is a wildcard here; every other character is literal.

use regex::Regex;
use tracing::warn;

use super::groups::{group_members, ALL_GROUP, GROUP_PREFIX};
use super::types::Pattern;

/// Wildcard character recognized in policy tokens.
pub const WILDCARD: char = '*';

/// Compile one policy token.
///
/// Never fails: an unknown group reference or an expression the regex engine
/// rejects compiles to an empty list.
///
/// # Examples
/// ```
/// use toolgate::policy::{compile_pattern, Pattern};
///
/// assert_eq!(compile_pattern("*"), vec![Pattern::All]);
/// assert_eq!(
///     compile_pattern("web_search"),
///     vec![Pattern::Exact("web_search".to_string())]
/// );
/// assert!(compile_pattern("group:nope").is_empty());
/// ```
pub fn compile_pattern(token: &str) -> Vec<Pattern> {
    if token == "*" {
        return vec![Pattern::All];
    }

    if let Some(group) = token.strip_prefix(GROUP_PREFIX) {
        if group == ALL_GROUP {
            return vec![Pattern::All];
        }
        return match group_members(group) {
            Some(members) => members
                .iter()
                .map(|name| Pattern::Exact((*name).to_string()))
                .collect(),
            None => Vec::new(),
        };
    }

    if token.contains(WILDCARD) {
        return match Regex::new(&glob_to_regex(token)) {
            Ok(re) => vec![Pattern::Regex(re)],
            Err(e) => {
                warn!(token = %token, error = %e, "Wildcard token rejected by regex engine");
                Vec::new()
            }
        };
    }

    vec![Pattern::Exact(token.to_string())]
}

/// Compile a token list, preserving encounter order. Duplicates are kept.
pub fn compile_patterns<S: AsRef<str>>(tokens: &[S]) -> Vec<Pattern> {
    tokens
        .iter()
        .flat_map(|token| compile_pattern(token.as_ref()))
        .collect()
}

/// Check whether any pattern matches `name`.
pub fn matches_any(name: &str, patterns: &[Pattern]) -> bool {
    patterns.iter().any(|pattern| pattern.matches(name))
}

/// 将通配符模式转换为正则表达式字符串
///
/// The result is fully anchored and runs in dot-all mode so `*` also spans
/// newlines.
pub fn glob_to_regex(token: &str) -> String {
    let body = token
        .split(WILDCARD)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    format!("(?s)^{}$", body)
}
