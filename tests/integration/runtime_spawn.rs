use std::{
    process::{Command as StdCommand, Stdio},
    time::Duration,
};

use anyhow::Result;
use rmcp::{model::ClientInfo, serve_client};
use serde_json::Value;
use tokio::time::timeout;

use crate::common::{spawn_server_process, MusicFixture, BINARY_PATH};

#[tokio::test]
async fn stdio_spawn_lists_music_tools() -> Result<()> {
    let fixture = MusicFixture::new(&["青花.mp3"])?;
    let config_path = fixture.write_config()?;
    let (mut child, transport, stderr_task) = spawn_server_process(&config_path).await?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let list = client.list_tools(None).await?;
    for expected in [
        "add",
        "list_music",
        "play_music",
        "stop_music",
        "query_playing_music",
    ] {
        assert!(
            list.tools.iter().any(|tool| tool.name.as_ref() == expected),
            "list_tools should include {expected}: {:?}",
            list.tools
        );
    }

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    if let Some(handle) = stderr_task {
        let _ = handle.await;
    }
    Ok(())
}

#[test]
fn tracks_command_prints_playlist() -> Result<()> {
    let fixture = MusicFixture::new(&["青花.mp3"])?;
    let config_path = fixture.write_config()?;

    let output = StdCommand::new(BINARY_PATH)
        .arg("--config")
        .arg(&config_path)
        .arg("tracks")
        .stdin(Stdio::null())
        .output()?;
    assert!(output.status.success(), "tracks should succeed: {output:?}");

    let payload: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        payload.get("playlist"),
        Some(&serde_json::json!(["青花.mp3"]))
    );
    Ok(())
}

#[test]
fn missing_config_exits_with_failure() {
    let status = StdCommand::new(BINARY_PATH)
        .env("MCP_CONFIG_PATH", "/nonexistent/music-mcp/config.toml")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .status()
        .expect("process should start");
    assert_eq!(status.code(), Some(1), "config errors should exit with 1");
}
