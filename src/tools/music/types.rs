//! Request and response payloads for the music tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::playback::{PlayOutcome, PlaybackStatus, StopOutcome, TrackListing};

/// Input for `play_music`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlayMusicRequest {
    /// Full file name (e.g. `青花.mp3`) or any part of it; the first file containing it is played.
    pub name: String,
}

/// Response from `list_music`.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ListMusicResponse {
    /// Directory the playlist was read from.
    pub path: String,
    /// File names, without directories, in directory order.
    pub playlist: Vec<String>,
}

impl From<TrackListing> for ListMusicResponse {
    fn from(listing: TrackListing) -> Self {
        Self {
            path: listing.path.to_string_lossy().to_string(),
            playlist: listing.playlist,
        }
    }
}

/// Response from `play_music`.
#[derive(Debug, Serialize, JsonSchema)]
pub struct PlayMusicResponse {
    pub message: String,
    pub track: String,
    /// Set when `track` was completed from a partial name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocompleted_from: Option<String>,
    /// Identifies this player run in the server logs.
    pub session_id: String,
}

impl From<PlayOutcome> for PlayMusicResponse {
    fn from(outcome: PlayOutcome) -> Self {
        Self {
            message: outcome.message(),
            session_id: outcome.session_id.to_string(),
            track: outcome.track,
            autocompleted_from: outcome.autocompleted_from,
        }
    }
}

/// Response from `stop_music`.
#[derive(Debug, Serialize, JsonSchema)]
pub struct StopMusicResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped: Option<String>,
}

impl From<StopOutcome> for StopMusicResponse {
    fn from(outcome: StopOutcome) -> Self {
        Self {
            message: outcome.message(),
            stopped: outcome.stopped_track().map(str::to_string),
        }
    }
}

/// Response from `query_playing_music`.
#[derive(Debug, Serialize, JsonSchema)]
pub struct PlaybackStatusResponse {
    pub message: String,
    pub playing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    /// RFC 3339 timestamp of when the current track started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
}

impl From<PlaybackStatus> for PlaybackStatusResponse {
    fn from(status: PlaybackStatus) -> Self {
        Self {
            message: status.message(),
            playing: status.is_playing(),
            started_at: status.started_at.map(|at| at.to_rfc3339()),
            track: status.track,
        }
    }
}
