use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::lib::{errors::ConfigError, paths::is_nonempty_absolute};

pub const DEFAULT_STOP_TIMEOUT_MS: u64 = 2_000;
const STOP_TIMEOUT_RANGE_MS: std::ops::RangeInclusive<u64> = 100..=30_000;

/// Music library and external player settings.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub music_dir: PathBuf,
    pub player_path: PathBuf,
    pub stop_timeout_ms: u64,
}

impl PlayerConfig {
    /// Grace period between SIGTERM and SIGKILL when stopping the player.
    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}

#[derive(Debug, Deserialize)]
pub struct RawPlayerConfig {
    pub music_dir: Option<PathBuf>,
    pub player_path: Option<PathBuf>,
    pub stop_timeout_ms: Option<u64>,
}

pub fn parse_player_section(
    path: PathBuf,
    raw: Option<RawPlayerConfig>,
) -> Result<PlayerConfig, ConfigError> {
    let player_raw = raw.ok_or(ConfigError::MissingField {
        path: path.clone(),
        field: "player",
    })?;

    let music_dir = player_raw.music_dir.ok_or(ConfigError::MissingField {
        path: path.clone(),
        field: "player.music_dir",
    })?;
    validate_absolute(path.as_path(), "player.music_dir", &music_dir)?;

    let player_path = player_raw.player_path.ok_or(ConfigError::MissingField {
        path: path.clone(),
        field: "player.player_path",
    })?;
    validate_absolute(path.as_path(), "player.player_path", &player_path)?;

    let stop_timeout_ms = player_raw
        .stop_timeout_ms
        .unwrap_or(DEFAULT_STOP_TIMEOUT_MS);
    validate_stop_timeout(path.as_path(), stop_timeout_ms)?;

    Ok(PlayerConfig {
        music_dir,
        player_path,
        stop_timeout_ms,
    })
}

fn validate_absolute(path: &Path, field: &'static str, value: &Path) -> Result<(), ConfigError> {
    if is_nonempty_absolute(value) {
        return Ok(());
    }
    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field,
        message: format!("Provide an absolute path: {}", value.display()),
    })
}

fn validate_stop_timeout(path: &Path, timeout_ms: u64) -> Result<(), ConfigError> {
    if STOP_TIMEOUT_RANGE_MS.contains(&timeout_ms) {
        return Ok(());
    }
    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "player.stop_timeout_ms",
        message: "Specify a value between 100 and 30000 milliseconds".into(),
    })
}
