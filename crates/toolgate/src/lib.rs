//! # toolgate
//!
//! Tool access policy engine for AI agents.
//!
//! Decides, for every tool an agent proposes to invoke, whether the session's
//! policy permits it. Policies combine:
//! - named tool groups (`group:web`, `group:canvas`, ...)
//! - named default profiles (`minimal`, `research`, `canvas`, `full`)
//! - explicit `allow` / `alsoAllow` / `deny` token lists
//! - `*` wildcard patterns
//!
//! A companion [`metrics::ToolExecutionMetrics`] aggregator records per-tool
//! call counts, durations and errors.
//!
//! ## Quick start
//!
//! ```rust
//! use toolgate::prelude::*;
//!
//! let config = PolicyConfig::default()
//!     .with_profile("minimal")
//!     .with_also_allow(vec!["web_search".to_string()]);
//! let matcher = resolve_effective_policy(&config);
//!
//! assert!(matcher.is_allowed("web_search"));
//! assert!(!matcher.is_allowed("canvas_remove_node"));
//! ```

pub mod config;
pub mod metrics;
pub mod policy;

pub use config::{load_policy_config, parse_policy_config, ConfigError, ConfigFormat};
pub use metrics::{global_metrics, ToolExecutionMetrics, ToolStats};
pub use policy::{
    compile_pattern, compile_patterns, expand_tool_groups, filter_tools_by_policy,
    filter_tools_with, make_tool_policy_matcher, resolve_effective_policy,
    resolve_profile_allow_list, Pattern, PolicyConfig, PolicyDecision, PolicyError,
    PolicyMatcher,
};

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::metrics::{ToolExecutionMetrics, ToolStats};
    pub use crate::policy::{
        filter_tools_by_policy, resolve_effective_policy, PolicyConfig, PolicyDecision,
        PolicyError, PolicyMatcher,
    };
}
