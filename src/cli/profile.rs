//! LaunchProfile and config path resolution.
use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;

const DEFAULT_CONFIG: &str = "config.toml";
const MCP_CONFIG_ENV: &str = "MCP_CONFIG_PATH";

/// MCP transport mode.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TransportMode {
    Stdio,
    Tcp,
}

impl TransportMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Stdio => "stdio",
            TransportMode::Tcp => "tcp",
        }
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub config_path: PathBuf,
    pub transport: TransportMode,
    pub launch_args: Vec<String>,
}

/// Resolve config path in the order: CLI override → env var → default.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    let path = override_path
        .or_else(|| env::var_os(MCP_CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    absolutize(path)
}

/// Build launch arguments suitable for reproduction/logging.
pub fn build_launch_args(transport: TransportMode, config: &Path) -> Vec<String> {
    vec![
        format!("--transport={}", transport.as_str()),
        format!("--config={}", config.display()),
    ]
}

fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(cwd.join(path))
}
