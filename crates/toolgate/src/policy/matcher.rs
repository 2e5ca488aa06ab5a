//! 策略匹配器模块
//!
//! A [`PolicyMatcher`] is the compiled form of one allow/deny pair. It is
//! immutable, cheap to clone and safe to share across threads, so it should
//! be built once per session or turn and reused for every tool check.
//!
//! Evaluation is deny-first:
//! 1. allow and deny both compile to nothing → everything permitted
//! 2. any deny pattern matches → denied
//! 3. no allow patterns → permitted (allow does not narrow)
//! 4. any allow pattern matches → permitted, otherwise denied

use tracing::{debug, trace};

use super::pattern::{compile_patterns, matches_any};
use super::types::{Pattern, PolicyDecision, PolicyError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum MatcherMode {
    /// Neither allow nor deny compiled to any pattern.
    Unrestricted,
    /// An empty `allow` does not narrow: everything not denied is permitted.
    Evaluated {
        deny: Vec<Pattern>,
        allow: Vec<Pattern>,
    },
}

/// Compiled tool policy: `tool name -> permitted?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyMatcher {
    mode: MatcherMode,
}

/// Build a matcher from raw allow and deny tokens.
///
/// Tokens are compiled once here; the returned matcher never recompiles.
pub fn make_tool_policy_matcher<A, D>(allow_tokens: &[A], deny_tokens: &[D]) -> PolicyMatcher
where
    A: AsRef<str>,
    D: AsRef<str>,
{
    let deny = compile_patterns(deny_tokens);
    let allow = compile_patterns(allow_tokens);

    if allow.is_empty() && deny.is_empty() {
        trace!(
            allow_tokens = allow_tokens.len(),
            deny_tokens = deny_tokens.len(),
            "No allow or deny patterns, matcher is unrestricted"
        );
        return PolicyMatcher::unrestricted();
    }

    trace!(
        deny_patterns = deny.len(),
        allow_patterns = allow.len(),
        "Compiled tool policy matcher"
    );

    PolicyMatcher {
        mode: MatcherMode::Evaluated { deny, allow },
    }
}

impl Default for PolicyMatcher {
    fn default() -> Self {
        Self::unrestricted()
    }
}

impl PolicyMatcher {
    /// Matcher that permits every tool.
    pub fn unrestricted() -> Self {
        Self {
            mode: MatcherMode::Unrestricted,
        }
    }

    /// True when the policy compiled to no patterns at all.
    pub fn is_unrestricted(&self) -> bool {
        matches!(self.mode, MatcherMode::Unrestricted)
    }

    /// 检查工具是否被允许
    pub fn is_allowed(&self, name: &str) -> bool {
        match &self.mode {
            MatcherMode::Unrestricted => true,
            MatcherMode::Evaluated { deny, allow } => {
                !matches_any(name, deny) && (allow.is_empty() || matches_any(name, allow))
            }
        }
    }

    /// Evaluate `name` and explain which rule decided.
    pub fn evaluate(&self, name: &str) -> PolicyDecision {
        let (deny, allow) = match &self.mode {
            MatcherMode::Unrestricted => {
                return PolicyDecision::allow(name, "No tool policy configured");
            }
            MatcherMode::Evaluated { deny, allow } => (deny, allow),
        };

        if let Some(pattern) = deny.iter().find(|pattern| pattern.matches(name)) {
            return PolicyDecision::deny(
                name,
                format!(
                    "Tool '{}' matches deny pattern '{}'",
                    name,
                    pattern.describe()
                ),
            );
        }

        if allow.is_empty() {
            return PolicyDecision::allow(name, format!("Tool '{}' is not denied", name));
        }

        match allow.iter().find(|pattern| pattern.matches(name)) {
            Some(pattern) => PolicyDecision::allow(
                name,
                format!(
                    "Tool '{}' matches allow pattern '{}'",
                    name,
                    pattern.describe()
                ),
            ),
            None => PolicyDecision::deny(name, format!("Tool '{}' is not in allow list", name)),
        }
    }

    /// Return [`PolicyError::NotPermitted`] unless `name` is permitted.
    pub fn ensure_allowed(&self, name: &str) -> Result<(), PolicyError> {
        if self.is_allowed(name) {
            Ok(())
        } else {
            debug!(tool = %name, "Tool invocation blocked by policy");
            Err(PolicyError::NotPermitted {
                tool: name.to_string(),
            })
        }
    }

    /// Run `invoke` only when `name` is permitted.
    ///
    /// A denied tool's closure is never called.
    pub fn run_if_allowed<T, F>(&self, name: &str, invoke: F) -> Result<T, PolicyError>
    where
        F: FnOnce() -> T,
    {
        self.ensure_allowed(name)?;
        Ok(invoke())
    }
}

// =============================================================================
// 单元测试
// =============================================================================
