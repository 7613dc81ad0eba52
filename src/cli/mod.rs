//! Command-line interface parsing and handling.
//!
//! The surface is deliberately tiny: no argument or `summon` starts the
//! session, `--help` and `--version` print and exit, anything else is an
//! unknown command.

use std::error::Error;
use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser, Subcommand};

use crate::commands::commands_help;
use crate::core::config::ConfigStore;
use crate::core::providers::ProviderKind;
use crate::ui::session_loop::run_session;
use crate::utils::logging::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "mahoraga")]
#[command(about = "Mahoraga - Prompt Validation TUI")]
#[command(
    long_about = "Mahoraga scores natural-language prompts for clarity before you hand them to an \
AI agent. Type a prompt, press Enter, and get a score with concrete suggestions.\n\n\
Environment Variables:\n\
  MAHORAGA_CONFIG     Path of the config file (default: per-user config directory)\n\
  MAHORAGA_LOG_FILE   Write diagnostic logs to this file\n\
  MAHORAGA_LOG        Log filter directives (default: mahoraga=debug)"
)]
#[command(disable_version_flag = true, disable_help_subcommand = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Show version
    #[arg(short = 'v', long = "version", action = ArgAction::SetTrue)]
    pub version: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Launch the interactive prompt validator (default)
    Summon,
}

/// What the process should do for a given argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Summon,
    PrintHelp(String),
    PrintVersion(String),
    /// Carries the offending first argument.
    Unknown(String),
}

pub fn version_string() -> String {
    format!(
        "mahoraga v{} ({})",
        env!("CARGO_PKG_VERSION"),
        git_describe(option_env!("VERGEN_GIT_DESCRIBE"))
    )
}

/// vergen writes a placeholder instead of failing when git metadata is missing.
fn git_describe(describe: Option<&str>) -> &str {
    match describe {
        Some(describe) if !describe.is_empty() && !describe.starts_with("VERGEN_") => describe,
        _ => "unknown",
    }
}

fn build_cli() -> clap::Command {
    Args::command().after_help(commands_help())
}

/// Classifies `args` (including the program name, as in `std::env::args_os`).
///
/// Only the first argument decides; anything after it is ignored.
pub fn parse_invocation<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).take(2).collect();
    let mut cli = build_cli();

    match cli.try_get_matches_from_mut(&args) {
        Ok(matches) => match Args::from_arg_matches(&matches) {
            Ok(parsed) if parsed.version => Invocation::PrintVersion(version_string()),
            Ok(_) => Invocation::Summon,
            Err(_) => unknown_command(&args),
        },
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            Invocation::PrintHelp(cli.render_help().to_string())
        }
        Err(_) => unknown_command(&args),
    }
}

fn unknown_command(args: &[OsString]) -> Invocation {
    let first = args
        .get(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_default();
    Invocation::Unknown(first)
}

pub fn main() -> Result<(), Box<dyn Error>> {
    match parse_invocation(std::env::args_os()) {
        Invocation::PrintHelp(help) => {
            println!("{help}");
            Ok(())
        }
        Invocation::PrintVersion(version) => {
            println!("{version}");
            Ok(())
        }
        Invocation::Unknown(command) => {
            eprintln!("Unknown command: {command}");
            eprintln!("Run \"mahoraga --help\" for usage information.");
            std::process::exit(1);
        }
        Invocation::Summon => summon(),
    }
}

fn summon() -> Result<(), Box<dyn Error>> {
    if let Err(err) = init_tracing() {
        eprintln!("Logging disabled: {err}");
    }

    let config_store = ConfigStore::from_default_location()?;
    tracing::info!(version = %version_string(), "summoned");

    tokio::runtime::Runtime::new()?.block_on(run_session(config_store, ProviderKind::default()))
}

#[cfg(test)]
mod tests;
