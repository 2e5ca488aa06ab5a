//! Tool Policy 模块
//!
//! Resolves a session's [`PolicyConfig`] into a reusable [`PolicyMatcher`]:
//! - `pattern`: token compilation into `All` / `Exact` / `Regex` patterns
//! - `groups`: static tool group directory (`group:<name>` references)
//! - `profile`: static profile registry (default allow tokens)
//! - `matcher`: deny-first evaluation over compiled pattern sets
//! - `resolver`: profile → allow → alsoAllow → deny layering
//! - `filter`: permitted subset of a candidate tool list
//!
//! # Example
//!
//! ```rust
//! use toolgate::policy::{filter_tools_by_policy, PolicyConfig};
//!
//! let config = PolicyConfig::default()
//!     .with_allow(vec!["web_*".to_string()])
//!     .with_deny(vec!["web_fetch".to_string()]);
//! let candidates = ["web_search", "web_fetch", "memory_search"];
//!
//! assert_eq!(filter_tools_by_policy(&candidates, &config), vec!["web_search"]);
//! ```

// =============================================================================
// 子模块声明
// =============================================================================

pub mod filter;
pub mod groups;
pub mod matcher;
pub mod pattern;
pub mod profile;
pub mod resolver;
pub mod types;


// =============================================================================
// 公共导出
// =============================================================================

pub use types::{Pattern, PolicyConfig, PolicyDecision, PolicyError};

pub use pattern::{compile_pattern, compile_patterns, glob_to_regex, matches_any};

pub use groups::{expand_tool_groups, group_members, group_names, is_group_reference};

pub use profile::{is_known_profile, profile_names, profile_tokens, resolve_profile_allow_list};

pub use matcher::{make_tool_policy_matcher, PolicyMatcher};

pub use resolver::resolve_effective_policy;

pub use filter::{filter_tools_by_policy, filter_tools_with};
