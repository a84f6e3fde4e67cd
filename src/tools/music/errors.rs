//! Mapping from playback failures to MCP `ErrorData`.

use rmcp::model::ErrorData;
use serde_json::json;

use crate::lib::errors::PlaybackError;

pub fn playback_error_to_error_data(err: PlaybackError) -> ErrorData {
    let message = err.to_string();
    if !err.is_client_error() {
        tracing::warn!(target: "music_mcp::playback", error = %message, "Playback request failed");
    }
    match err {
        PlaybackError::TrackNotFound { name } => {
            ErrorData::invalid_params(message, Some(json!({ "name": name })))
        }
        PlaybackError::DirectoryAccess { path, source } => ErrorData::internal_error(
            message,
            Some(json!({
                "path": path.to_string_lossy(),
                "reason": source.to_string()
            })),
        ),
        PlaybackError::Spawn { program, source } => ErrorData::internal_error(
            message,
            Some(json!({
                "program": program.to_string_lossy(),
                "reason": source.to_string()
            })),
        ),
    }
}
