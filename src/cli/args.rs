//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::{build_launch_args, resolve_config_path, LaunchProfile, TransportMode};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    RunServer(LaunchProfile),
    Cli(CliCommand, LaunchProfile),
}

/// Top-level optional CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Print the files in the configured music directory as JSON.
    #[command(about = "Print the files in the configured music directory as JSON")]
    Tracks,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Music MCP (browse a music folder and drive an external player)",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Select stdio (default) or tcp.
    #[arg(long, value_enum, default_value_t = TransportMode::Stdio)]
    pub transport: TransportMode,
    /// Path to config.toml (overrides MCP_CONFIG_PATH).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Optional CLI command mode.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(&self) -> Result<LaunchProfile> {
        let config_path = resolve_config_path(self.config_override.clone())?;
        let launch_args = build_launch_args(self.transport, &config_path);

        Ok(LaunchProfile {
            config_path,
            transport: self.transport,
            launch_args,
        })
    }

    /// Parse CLI args into either server launch mode or utility command mode.
    pub fn into_command(self) -> Result<ParsedCommand> {
        let profile = self.build()?;
        Ok(match self.command {
            Some(command) => ParsedCommand::Cli(command, profile),
            None => ParsedCommand::RunServer(profile),
        })
    }
}
