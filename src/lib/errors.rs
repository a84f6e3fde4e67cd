use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing.
    #[error("Configuration file {path} is missing `{field}`")]
    MissingField { path: PathBuf, field: &'static str },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures surfaced by the playback tools.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("No track matching `{name}` was found")]
    TrackNotFound { name: String },
    #[error("Failed to read music directory {path}: {source}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to launch player {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PlaybackError {
    /// True when the caller sent a request that can never succeed as-is.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PlaybackError::TrackNotFound { .. })
    }
}
