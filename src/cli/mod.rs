//! CLI entrypoint module structure.
use anyhow::Result;

use crate::{
    server::config::ServerConfig,
    tools::music::{ListMusicResponse, PlaybackController},
};

pub mod args;
pub mod profile;

pub use args::{CliCommand, LaunchProfileArgs, ParsedCommand};
pub use profile::{build_launch_args, resolve_config_path, LaunchProfile, TransportMode};

/// Execute CLI command mode and return a user-facing result payload.
pub fn execute_cli_command(command: CliCommand, config: &ServerConfig) -> Result<String> {
    match command {
        CliCommand::Tracks => {
            let listing = PlaybackController::new(&config.player).list_tracks()?;
            let payload = ListMusicResponse::from(listing);
            Ok(serde_json::to_string_pretty(&payload)?)
        }
    }
}
