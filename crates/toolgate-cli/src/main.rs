mod cli;
mod commands;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

fn init_logging(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Check { tools, policy } => {
            let config = policy.to_policy_config()?;
            if !commands::check(&mut out, &tools, &config, cli.format)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Filter { tools, policy } => {
            let config = policy.to_policy_config()?;
            commands::filter(&mut out, &tools, &config, cli.format)?;
        }
        Command::Groups => commands::groups(&mut out, cli.format)?,
        Command::Profiles => commands::profiles(&mut out, cli.format)?,
    }

    Ok(ExitCode::SUCCESS)
}
