//! Playback controller owning the single player session.

use std::{path::PathBuf, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::{process::Child, sync::Mutex};
use tracing::info;
use uuid::Uuid;

use crate::{
    lib::{
        errors::PlaybackError,
        player::{build_player_command, terminate_player, PlayerCommandConfig, TerminateOutcome},
        telemetry::StopSpan,
    },
    server::config::PlayerConfig,
};

use super::library;

const NOTHING_PLAYING: &str = "Nothing is playing";

/// Files available in the music directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackListing {
    pub path: PathBuf,
    pub playlist: Vec<String>,
}

/// Result of a successful `play_track`.
#[derive(Debug, Clone)]
pub struct PlayOutcome {
    pub track: String,
    /// The name the caller asked for, when it only partially matched `track`.
    pub autocompleted_from: Option<String>,
    /// Same id the stop span logs when this player is shut down.
    pub session_id: Uuid,
}

impl PlayOutcome {
    pub fn message(&self) -> String {
        match &self.autocompleted_from {
            Some(requested) => format!(
                "Autocompleted track name: \"{requested}\" -> \"{track}\". Now playing {track}",
                track = self.track
            ),
            None => format!("Now playing {}", self.track),
        }
    }
}

/// Result of `stop_playback`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped {
        track: Option<String>,
        outcome: TerminateOutcome,
    },
    NothingPlaying,
}

impl StopOutcome {
    pub fn message(&self) -> String {
        match self {
            StopOutcome::Stopped {
                track: Some(track), ..
            } => format!("Stopped {track}"),
            StopOutcome::Stopped { track: None, .. } => "Stopped playback".to_string(),
            StopOutcome::NothingPlaying => NOTHING_PLAYING.to_string(),
        }
    }

    pub fn stopped_track(&self) -> Option<&str> {
        match self {
            StopOutcome::Stopped { track, .. } => track.as_deref(),
            StopOutcome::NothingPlaying => None,
        }
    }
}

/// Snapshot returned by `query_status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub track: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

impl PlaybackStatus {
    pub fn is_playing(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn message(&self) -> String {
        match (&self.track, self.is_playing()) {
            (Some(track), true) => format!("Now playing {track}"),
            _ => NOTHING_PLAYING.to_string(),
        }
    }
}

struct PlayerHandle {
    child: Child,
    session_id: Uuid,
    started_at: DateTime<Utc>,
}

/// `player` is the only liveness signal; `track` outlives it as the last played name.
#[derive(Default)]
struct PlaybackSession {
    track: Option<String>,
    player: Option<PlayerHandle>,
}

/// Shared handle to the playback state. Clones refer to the same session.
#[derive(Clone)]
pub struct PlaybackController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    music_dir: PathBuf,
    player_path: PathBuf,
    stop_timeout: Duration,
    session: Mutex<PlaybackSession>,
}

impl PlaybackController {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                music_dir: config.music_dir.clone(),
                player_path: config.player_path.clone(),
                stop_timeout: config.stop_timeout(),
                session: Mutex::new(PlaybackSession::default()),
            }),
        }
    }

    /// List files directly inside the music directory.
    pub fn list_tracks(&self) -> Result<TrackListing, PlaybackError> {
        let playlist = library::list_tracks(&self.inner.music_dir)?;
        Ok(TrackListing {
            path: self.inner.music_dir.clone(),
            playlist,
        })
    }

    /// Start playing the first file whose name contains `requested`.
    ///
    /// The name is resolved before the running player is touched, so a failed
    /// lookup leaves the current session as it was. An empty request matches
    /// the first file.
    pub async fn play_track(&self, requested: &str) -> Result<PlayOutcome, PlaybackError> {
        let mut session = self.inner.session.lock().await;
        let tracks = library::list_tracks(&self.inner.music_dir)?;
        let found = library::resolve_track(&tracks, requested).ok_or_else(|| {
            PlaybackError::TrackNotFound {
                name: requested.to_string(),
            }
        })?;

        if let Some(previous) = session.player.take() {
            self.stop_player(previous, session.track.as_deref()).await;
        }

        let track_path = self.inner.music_dir.join(&found.name);
        let child = build_player_command(PlayerCommandConfig {
            player_path: &self.inner.player_path,
            track_path: &track_path,
        })
        .spawn()
        .map_err(|source| PlaybackError::Spawn {
            program: self.inner.player_path.clone(),
            source,
        })?;

        let handle = PlayerHandle {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            child,
        };
        info!(
            target: "music_mcp::playback",
            session_id = %handle.session_id,
            pid = handle.child.id(),
            track = %found.name,
            requested = requested,
            autocompleted = found.autocompleted,
            "Started player"
        );

        let outcome = PlayOutcome {
            autocompleted_from: found.autocompleted.then(|| requested.to_string()),
            session_id: handle.session_id,
            track: found.name,
        };
        session.track = Some(outcome.track.clone());
        session.player = Some(handle);
        Ok(outcome)
    }

    /// Stop the active player, if any. Never fails.
    pub async fn stop_playback(&self) -> StopOutcome {
        let mut session = self.inner.session.lock().await;
        match session.player.take() {
            Some(handle) => {
                let outcome = self.stop_player(handle, session.track.as_deref()).await;
                StopOutcome::Stopped {
                    track: session.track.clone(),
                    outcome,
                }
            }
            None => StopOutcome::NothingPlaying,
        }
    }

    /// Report the active track without touching the player.
    pub async fn query_status(&self) -> PlaybackStatus {
        let session = self.inner.session.lock().await;
        match &session.player {
            Some(handle) => PlaybackStatus {
                track: session.track.clone(),
                started_at: Some(handle.started_at),
            },
            None => PlaybackStatus {
                track: None,
                started_at: None,
            },
        }
    }

    /// Last track handed to the player, even if it has since been stopped.
    pub async fn last_track(&self) -> Option<String> {
        self.inner.session.lock().await.track.clone()
    }

    async fn stop_player(&self, mut handle: PlayerHandle, track: Option<&str>) -> TerminateOutcome {
        let span = StopSpan::start(
            handle.session_id,
            track.unwrap_or_default(),
            handle.child.id(),
        );
        let outcome = terminate_player(&mut handle.child, self.inner.stop_timeout).await;
        span.finish(outcome);
        outcome
    }
}
