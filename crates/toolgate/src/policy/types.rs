//! Tool Policy 核心类型定义
//!
//! - Pattern: compiled matcher unit (closed set of three variants)
//! - PolicyConfig: caller-supplied session policy
//! - PolicyDecision: explained result of a single evaluation
//! - PolicyError: errors surfaced to callers gating tool execution

use serde::{Deserialize, Serialize};

// =============================================================================
// Pattern 枚举
// =============================================================================

/// A compiled matcher unit.
///
/// Produced by [`compile_pattern`](super::pattern::compile_pattern); never
/// constructed from untrusted input directly.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches every tool name.
    All,
    /// Matches when the tool name equals the value exactly.
    Exact(String),
    /// Matches when the tool name fully matches the glob-derived expression.
    Regex(regex::Regex),
}

impl Pattern {
    /// Check whether `name` matches this pattern.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(value) => value == name,
            Self::Regex(re) => re.is_match(name),
        }
    }

    /// Short label used in decision reasons and logs.
    pub fn describe(&self) -> String {
        match self {
            Self::All => "*".to_string(),
            Self::Exact(value) => value.clone(),
            Self::Regex(re) => format!("/{}/", re.as_str()),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::All, Self::All) => true,
            (Self::Exact(a), Self::Exact(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for Pattern {}

// =============================================================================
// PolicyConfig 结构体
// =============================================================================

/// Session-level policy configuration.
///
/// Owned by the session layer and treated as immutable for the duration of
/// one resolution. Every field is optional when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyConfig {
    /// Default profile identifier (`minimal`, `research`, `canvas`, `full`)
    pub profile: Option<String>,
    /// Explicit allow tokens; non-empty overrides the profile entirely
    pub allow: Vec<String>,
    /// Tokens added on top of the profile's defaults
    pub also_allow: Vec<String>,
    /// Deny tokens; always win over allow
    pub deny: Vec<String>,
}

impl PolicyConfig {
    /// 创建空配置（无任何限制）
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置 Profile
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// 设置 allow 列表
    pub fn with_allow(mut self, tokens: Vec<String>) -> Self {
        self.allow = tokens;
        self
    }

    /// 设置 alsoAllow 列表
    pub fn with_also_allow(mut self, tokens: Vec<String>) -> Self {
        self.also_allow = tokens;
        self
    }

    /// 设置 deny 列表
    pub fn with_deny(mut self, tokens: Vec<String>) -> Self {
        self.deny = tokens;
        self
    }

    /// True when no field contributes anything.
    pub fn is_empty(&self) -> bool {
        self.profile.is_none()
            && self.allow.is_empty()
            && self.also_allow.is_empty()
            && self.deny.is_empty()
    }
}

// =============================================================================
// PolicyDecision 结构体
// =============================================================================

/// Result of evaluating one tool name, with the reason behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDecision {
    /// The tool that was evaluated
    pub tool: String,
    /// 是否允许
    pub allowed: bool,
    /// 决策原因
    pub reason: String,
}

impl PolicyDecision {
    /// 创建允许的决策
    pub fn allow(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            allowed: true,
            reason: reason.into(),
        }
    }

    /// 创建拒绝的决策
    pub fn deny(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            allowed: false,
            reason: reason.into(),
        }
    }
}

// =============================================================================
// PolicyError 错误类型
// =============================================================================

/// Errors returned when gating a tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// The resolved policy does not permit the tool.
    #[error("Tool '{tool}' is not permitted by the session policy")]
    NotPermitted { tool: String },
}

// =============================================================================
// 单元测试
// =============================================================================
