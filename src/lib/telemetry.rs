//! Telemetry initialization and player lifecycle span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

use super::player::TerminateOutcome;

/// Initialize `tracing` and format developer logs.
///
/// Logs go to stderr; stdout belongs to the stdio transport.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span covering the shutdown of one player session.
pub struct StopSpan {
    span: Span,
    started_at: Instant,
    session_id: Uuid,
}

impl StopSpan {
    pub fn start(session_id: Uuid, track: &str, pid: Option<u32>) -> Self {
        let span = info_span!(
            target: "music_mcp::playback",
            "player_stop",
            %session_id,
            track,
            pid
        );
        Self {
            span,
            started_at: Instant::now(),
            session_id,
        }
    }

    /// Close the span while recording how the player went away.
    pub fn finish(self, outcome: TerminateOutcome) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "music_mcp::playback",
            session_id = %self.session_id,
            outcome = outcome.as_str(),
            elapsed_ms = elapsed_ms,
            "Stopped player"
        );
    }
}

/// Payload for logging MCP runtime state as structured telemetry.
#[derive(Debug, Serialize)]
pub struct RuntimeModeTelemetry<'a> {
    pub transport: &'a str,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub config_path: &'a str,
    pub music_dir: &'a str,
    pub player_path: &'a str,
    pub instructions: &'a str,
    pub launch_args: &'a [String],
}

/// Emit runtime mode to `tracing`.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    info!(
        target: "music_mcp::runtime",
        transport = telemetry.transport,
        host = telemetry.host.unwrap_or(""),
        port = telemetry.port.unwrap_or_default(),
        config_path = telemetry.config_path,
        music_dir = telemetry.music_dir,
        player_path = telemetry.player_path,
        instructions = telemetry.instructions,
        launch_args = ?telemetry.launch_args,
        "Started MCP server"
    );
}
