use crate::{cli::LaunchProfile, server::config::ServerConfig};

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(profile: &LaunchProfile, config: &ServerConfig) -> String {
    format!(
        "Loaded config {path}; serving music from {music_dir} in {transport} mode (host={host}, port={port}). Call list_music to find songs, then play_music with a file name or part of one.",
        path = config.source_path.display(),
        music_dir = config.player.music_dir.display(),
        transport = profile.transport.as_str(),
        host = config.server.host,
        port = config.server.port
    )
}
