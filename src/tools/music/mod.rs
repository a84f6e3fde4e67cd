//! MCP tools for browsing the music folder and controlling the external player.

pub mod errors;
pub mod library;
pub mod playback;
pub mod types;

pub use errors::playback_error_to_error_data;
pub use library::{list_tracks, resolve_track, TrackMatch};
pub use playback::{PlayOutcome, PlaybackController, PlaybackStatus, StopOutcome, TrackListing};
pub use types::{
    ListMusicResponse, PlayMusicRequest, PlayMusicResponse, PlaybackStatusResponse,
    StopMusicResponse,
};
