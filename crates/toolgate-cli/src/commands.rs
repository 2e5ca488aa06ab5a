use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use toolgate::policy::{group_members, group_names, profile_names, profile_tokens};
use toolgate::{filter_tools_with, resolve_effective_policy, resolve_profile_allow_list};
use toolgate::{PolicyConfig, PolicyDecision};

use crate::cli::OutputFormat;

#[derive(Debug, Serialize)]
struct GroupEntry {
    name: &'static str,
    members: &'static [&'static str],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileEntry {
    name: &'static str,
    tokens: &'static [&'static str],
    allow_list: Vec<String>,
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Evaluate every tool. Returns `true` when all of them are permitted.
pub fn check(
    out: &mut impl Write,
    tools: &[String],
    config: &PolicyConfig,
    format: OutputFormat,
) -> Result<bool> {
    let matcher = resolve_effective_policy(config);
    let decisions: Vec<PolicyDecision> = tools.iter().map(|tool| matcher.evaluate(tool)).collect();

    match format {
        OutputFormat::Json => write_json(out, &decisions)?,
        OutputFormat::Text => {
            for decision in &decisions {
                let verdict = if decision.allowed { "allowed" } else { "denied" };
                writeln!(out, "{}: {} ({})", decision.tool, verdict, decision.reason)?;
            }
        }
    }

    Ok(decisions.iter().all(|decision| decision.allowed))
}

pub fn filter(
    out: &mut impl Write,
    tools: &[String],
    config: &PolicyConfig,
    format: OutputFormat,
) -> Result<()> {
    let matcher = resolve_effective_policy(config);
    let permitted = filter_tools_with(tools, &matcher);

    match format {
        OutputFormat::Json => write_json(out, &permitted)?,
        OutputFormat::Text => {
            for tool in &permitted {
                writeln!(out, "{}", tool)?;
            }
        }
    }
    Ok(())
}

pub fn groups(out: &mut impl Write, format: OutputFormat) -> Result<()> {
    let entries: Vec<GroupEntry> = group_names()
        .into_iter()
        .filter_map(|name| group_members(name).map(|members| GroupEntry { name, members }))
        .collect();

    match format {
        OutputFormat::Json => write_json(out, &entries)?,
        OutputFormat::Text => {
            for entry in &entries {
                writeln!(out, "group:{}: {}", entry.name, entry.members.join(", "))?;
            }
        }
    }
    Ok(())
}

pub fn profiles(out: &mut impl Write, format: OutputFormat) -> Result<()> {
    let entries: Vec<ProfileEntry> = profile_names()
        .into_iter()
        .filter_map(|name| {
            profile_tokens(name).map(|tokens| ProfileEntry {
                name,
                tokens,
                allow_list: resolve_profile_allow_list(Some(name)),
            })
        })
        .collect();

    match format {
        OutputFormat::Json => write_json(out, &entries)?,
        OutputFormat::Text => {
            for entry in &entries {
                if entry.allow_list.is_empty() {
                    writeln!(out, "{}: (unrestricted)", entry.name)?;
                } else {
                    writeln!(out, "{}: {}", entry.name, entry.allow_list.join(", "))?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_check_text_output() {
        let mut buf = Vec::new();
        let config = PolicyConfig::new().with_profile("minimal");
        let all_allowed = check(
            &mut buf,
            &strings(&["session_status", "web_fetch"]),
            &config,
            OutputFormat::Text,
        )
        .unwrap();

        assert!(!all_allowed);
        assert_eq!(
            output(buf),
            "session_status: allowed (Tool 'session_status' matches allow pattern 'session_status')\n\
             web_fetch: denied (Tool 'web_fetch' is not in allow list)\n"
        );
    }

    #[test]
    fn test_check_all_allowed_succeeds() {
        let mut buf = Vec::new();
        let all_allowed = check(
            &mut buf,
            &strings(&["web_search", "canvas_read"]),
            &PolicyConfig::default(),
            OutputFormat::Text,
        )
        .unwrap();
        assert!(all_allowed);
    }

    #[test]
    fn test_check_json_output() {
        let mut buf = Vec::new();
        let config = PolicyConfig::new().with_deny(strings(&["web_*"]));
        check(&mut buf, &strings(&["web_fetch"]), &config, OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["tool"], "web_fetch");
        assert_eq!(value[0]["allowed"], false);
    }

    #[test]
    fn test_filter_text_output() {
        let mut buf = Vec::new();
        let config = PolicyConfig::new()
            .with_allow(strings(&["web_*"]))
            .with_deny(strings(&["web_fetch"]));
        filter(
            &mut buf,
            &strings(&["web_search", "web_fetch", "memory_search"]),
            &config,
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(output(buf), "web_search\n");
    }

    #[test]
    fn test_groups_lists_every_group() {
        let mut buf = Vec::new();
        groups(&mut buf, OutputFormat::Text).unwrap();
        let text = output(buf);
        assert!(text.contains("group:web: web_search, web_fetch\n"));
        assert!(text.contains("group:all: "));
    }

    #[test]
    fn test_profiles_json_output() {
        let mut buf = Vec::new();
        profiles(&mut buf, OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let entries = value.as_array().unwrap();
        let minimal = entries.iter().find(|entry| entry["name"] == "minimal").unwrap();
        assert_eq!(
            minimal["allowList"],
            serde_json::json!(["session_status", "memory_search"])
        );
        let full = entries.iter().find(|entry| entry["name"] == "full").unwrap();
        assert_eq!(full["allowList"], serde_json::json!([]));
    }
}
