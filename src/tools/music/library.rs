//! Music directory enumeration and track name resolution.

use std::{fs, path::Path};

use tracing::debug;

use crate::lib::errors::PlaybackError;

/// A requested name resolved against the directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMatch {
    pub name: String,
    pub autocompleted: bool,
}

/// List the files directly inside `music_dir`, in directory enumeration order.
///
/// Subdirectories are skipped and nothing is read recursively.
pub fn list_tracks(music_dir: &Path) -> Result<Vec<String>, PlaybackError> {
    let directory_error = |source| PlaybackError::DirectoryAccess {
        path: music_dir.to_path_buf(),
        source,
    };

    let mut playlist = Vec::new();
    for entry in fs::read_dir(music_dir).map_err(directory_error)? {
        let entry = entry.map_err(directory_error)?;
        if entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => playlist.push(name),
            Err(raw) => debug!(
                target: "music_mcp::playback",
                name = ?raw,
                "Skipping file with a non UTF-8 name"
            ),
        }
    }
    Ok(playlist)
}

/// Find the first track whose name contains `requested`.
///
/// The scan keeps listing order; there is no ranking, so an exact name that
/// appears after a longer match loses to it.
pub fn resolve_track(tracks: &[String], requested: &str) -> Option<TrackMatch> {
    tracks
        .iter()
        .find(|candidate| candidate.contains(requested))
        .map(|candidate| TrackMatch {
            name: candidate.clone(),
            autocompleted: candidate != requested,
        })
}
