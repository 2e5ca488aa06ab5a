use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use toolgate::{load_policy_config, PolicyConfig};

#[derive(Parser, Debug)]
#[command(name = "toolgate")]
#[command(about = "Evaluate tool access policies for AI agent sessions")]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs to stderr as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether each tool is permitted and explain why
    Check {
        /// Tool names to check
        #[arg(required = true)]
        tools: Vec<String>,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Print the permitted subset of the given tools
    Filter {
        /// Candidate tool names
        tools: Vec<String>,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// List the built-in tool groups
    Groups,

    /// List the built-in profiles and their expansion
    Profiles,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Policy flags shared by `check` and `filter`
#[derive(Args, Debug, Default)]
pub struct PolicyArgs {
    /// Policy file (.json, .yaml or .yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base profile (replaces the file's profile)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Explicit allow token (repeatable)
    #[arg(long = "allow", value_name = "TOKEN")]
    pub allow: Vec<String>,

    /// Extra allow token added to the profile (repeatable)
    #[arg(long = "also-allow", value_name = "TOKEN")]
    pub also_allow: Vec<String>,

    /// Deny token (repeatable)
    #[arg(long = "deny", value_name = "TOKEN")]
    pub deny: Vec<String>,
}

impl PolicyArgs {
    /// Build the session policy: file values first, then flags on top.
    pub fn to_policy_config(&self) -> Result<PolicyConfig> {
        let mut config = match &self.config {
            Some(path) => load_policy_config(path)
                .with_context(|| format!("failed to load policy from '{}'", path.display()))?,
            None => PolicyConfig::default(),
        };

        if let Some(profile) = &self.profile {
            config.profile = Some(profile.clone());
        }
        config.allow.extend(self.allow.iter().cloned());
        config.also_allow.extend(self.also_allow.iter().cloned());
        config.deny.extend(self.deny.iter().cloned());

        Ok(config)
    }
}
