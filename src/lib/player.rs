//! Shared helpers for launching and stopping the external media player.

use std::{io, path::Path, process::Stdio, time::Duration};

use tokio::{
    process::{Child, Command},
    time,
};
use tracing::{debug, warn};

/// Paths needed to start the player on a single file.
pub struct PlayerCommandConfig<'a> {
    pub player_path: &'a Path,
    pub track_path: &'a Path,
}

/// Build the player command. The child never shares our stdio, which may be
/// carrying the MCP transport.
pub fn build_player_command(config: PlayerCommandConfig<'_>) -> Command {
    let mut command = Command::new(config.player_path);
    command.kill_on_drop(true);
    command.stdin(Stdio::null());
    command.stdout(Stdio::null());
    command.stderr(Stdio::null());
    command.arg(config.track_path);
    command
}

/// How a player process ended up stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminateOutcome {
    /// The process was gone before we asked it to stop.
    AlreadyExited,
    /// The process exited within the grace period after SIGTERM.
    Terminated,
    /// The grace period elapsed (or no graceful signal exists) and the process was killed.
    Killed,
}

impl TerminateOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TerminateOutcome::AlreadyExited => "already_exited",
            TerminateOutcome::Terminated => "terminated",
            TerminateOutcome::Killed => "killed",
        }
    }
}

enum SignalDelivery {
    Sent,
    Gone,
    Unavailable,
}

/// Ask the player to stop, wait up to `grace`, then kill it.
///
/// Never fails: a process that already exited, or disappears between steps,
/// counts as stopped.
pub async fn terminate_player(child: &mut Child, grace: Duration) -> TerminateOutcome {
    if let Ok(Some(status)) = child.try_wait() {
        debug!(
            target: "music_mcp::playback",
            status = %status,
            "Player had already exited"
        );
        return TerminateOutcome::AlreadyExited;
    }

    match send_terminate(child) {
        SignalDelivery::Sent => {}
        SignalDelivery::Gone => {
            let _ = child.wait().await;
            return TerminateOutcome::AlreadyExited;
        }
        SignalDelivery::Unavailable => {
            force_kill(child).await;
            return TerminateOutcome::Killed;
        }
    }

    match time::timeout(grace, child.wait()).await {
        Ok(Ok(_)) => TerminateOutcome::Terminated,
        Ok(Err(err)) => {
            warn!(
                target: "music_mcp::playback",
                error = %err,
                "Failed to wait for player after SIGTERM"
            );
            TerminateOutcome::AlreadyExited
        }
        Err(_) => {
            force_kill(child).await;
            TerminateOutcome::Killed
        }
    }
}

async fn force_kill(child: &mut Child) {
    if let Err(err) = child.kill().await {
        warn!(
            target: "music_mcp::playback",
            error = %err,
            "Failed to kill player process"
        );
    }
}

#[cfg(unix)]
fn send_terminate(child: &Child) -> SignalDelivery {
    let Some(pid) = child.id() else {
        return SignalDelivery::Gone;
    };
    let Ok(pid) = libc::pid_t::try_from(pid) else {
        return SignalDelivery::Unavailable;
    };
    // SAFETY: `pid` refers to our own child, which has not been reaped yet.
    let result = unsafe { libc::kill(pid, libc::SIGTERM) };
    if result == 0 {
        return SignalDelivery::Sent;
    }

    let err = io::Error::last_os_error();
    if err.raw_os_error() == Some(libc::ESRCH) {
        SignalDelivery::Gone
    } else {
        warn!(
            target: "music_mcp::playback",
            pid = pid,
            error = %err,
            "Failed to send SIGTERM to player"
        );
        SignalDelivery::Unavailable
    }
}

#[cfg(not(unix))]
fn send_terminate(_child: &Child) -> SignalDelivery {
    SignalDelivery::Unavailable
}
