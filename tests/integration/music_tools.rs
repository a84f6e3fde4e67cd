use anyhow::Result;
use rmcp::{
    model::{CallToolRequestParam, ClientInfo, ErrorCode, JsonObject},
    serve_client,
    service::{RoleClient, RunningService, ServiceError},
    ServiceExt,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use music_mcp::server::runtime::MusicServer;

use crate::common::MusicFixture;

struct Session {
    client: RunningService<RoleClient, ClientInfo>,
    server_task: JoinHandle<Result<()>>,
}

impl Session {
    async fn start(fixture: &MusicFixture) -> Result<Self> {
        let server = MusicServer::new(&fixture.server_config(), "music-integration".into());
        let (server_transport, client_transport) = tokio::io::duplex(4096);
        let server_task = tokio::spawn(async move {
            server.serve(server_transport).await?.waiting().await?;
            Result::<_, anyhow::Error>::Ok(())
        });
        let client = serve_client(ClientInfo::default(), client_transport).await?;
        Ok(Self {
            client,
            server_task,
        })
    }

    async fn call(&self, name: &'static str, args: Option<Value>) -> Result<Value, ServiceError> {
        let arguments: Option<JsonObject> = args.and_then(|value| value.as_object().cloned());
        let response = self
            .client
            .call_tool(CallToolRequestParam {
                name: name.into(),
                arguments,
            })
            .await?;
        Ok(response
            .structured_content
            .expect("structured_content should exist"))
    }

    async fn finish(self) {
        let _ = self.client.cancel().await;
        let _ = self.server_task.await;
    }
}

#[tokio::test]
async fn list_music_returns_files_only() -> Result<()> {
    let fixture = MusicFixture::new(&["青花.mp3"])?;
    let session = Session::start(&fixture).await?;

    let payload = session.call("list_music", None).await;
    session.finish().await;

    assert_eq!(
        payload.expect("list_music should succeed"),
        json!({
            "path": fixture.music_dir.to_string_lossy(),
            "playlist": ["青花.mp3"]
        })
    );
    Ok(())
}

#[tokio::test]
async fn play_stop_and_query_round_trip() -> Result<()> {
    let fixture = MusicFixture::new(&["青花.mp3", "晴天.mp3"])?;
    let session = Session::start(&fixture).await?;

    let idle = session.call("query_playing_music", None).await;
    let played = session
        .call("play_music", Some(json!({ "name": "青花" })))
        .await;
    fixture.wait_for_log("start 青花.mp3").await;
    let playing = session.call("query_playing_music", None).await;
    let stopped = session.call("stop_music", None).await;
    let after_stop = session.call("query_playing_music", None).await;
    session.finish().await;

    let idle = idle.expect("query should succeed");
    assert_eq!(idle.get("playing"), Some(&json!(false)));
    assert_eq!(idle.get("message"), Some(&json!("Nothing is playing")));

    let played = played.expect("play_music should succeed");
    assert_eq!(played.get("track"), Some(&json!("青花.mp3")));
    assert_eq!(played.get("autocompleted_from"), Some(&json!("青花")));
    let session_id = played
        .get("session_id")
        .and_then(Value::as_str)
        .expect("session_id");
    assert!(uuid::Uuid::parse_str(session_id).is_ok(), "session_id: {session_id}");
    let message = played
        .get("message")
        .and_then(Value::as_str)
        .expect("message");
    assert!(message.contains("Autocompleted"), "message: {message}");
    assert!(message.ends_with("Now playing 青花.mp3"), "message: {message}");

    let playing = playing.expect("query should succeed");
    assert_eq!(playing.get("playing"), Some(&json!(true)));
    assert_eq!(playing.get("track"), Some(&json!("青花.mp3")));
    assert!(playing.get("started_at").and_then(Value::as_str).is_some());

    let stopped = stopped.expect("stop should succeed");
    assert_eq!(stopped.get("message"), Some(&json!("Stopped 青花.mp3")));
    assert_eq!(stopped.get("stopped"), Some(&json!("青花.mp3")));

    let after_stop = after_stop.expect("query should succeed");
    assert_eq!(after_stop.get("playing"), Some(&json!(false)));

    let lines = fixture.wait_for_log("term 青花.mp3").await;
    assert_eq!(lines, vec!["start 青花.mp3", "term 青花.mp3"]);
    Ok(())
}

#[tokio::test]
async fn switching_tracks_stops_the_previous_player() -> Result<()> {
    let fixture = MusicFixture::new(&["a.mp3", "b.mp3"])?;
    let session = Session::start(&fixture).await?;

    let first = session
        .call("play_music", Some(json!({ "name": "a.mp3" })))
        .await;
    fixture.wait_for_log("start a.mp3").await;
    let second = session
        .call("play_music", Some(json!({ "name": "b.mp3" })))
        .await;
    let lines = fixture.wait_for_log("start b.mp3").await;
    let status = session.call("query_playing_music", None).await;
    session.finish().await;

    let first = first.expect("first play should succeed");
    assert_eq!(first.get("message"), Some(&json!("Now playing a.mp3")));
    assert!(first.get("autocompleted_from").is_none());
    second.expect("second play should succeed");
    assert_eq!(lines, vec!["start a.mp3", "term a.mp3", "start b.mp3"]);
    assert_eq!(
        status.expect("query should succeed").get("track"),
        Some(&json!("b.mp3"))
    );
    Ok(())
}

#[tokio::test]
async fn unknown_track_is_an_invalid_params_error() -> Result<()> {
    let fixture = MusicFixture::new(&["青花.mp3"])?;
    let session = Session::start(&fixture).await?;

    let result = session
        .call("play_music", Some(json!({ "name": "稻香" })))
        .await;
    let stopped = session.call("stop_music", None).await;
    session.finish().await;

    match result.expect_err("unknown track should fail") {
        ServiceError::McpError(inner) => {
            assert_eq!(inner.code, ErrorCode::INVALID_PARAMS);
            assert_eq!(
                inner.data.as_ref().and_then(|data| data.get("name")),
                Some(&json!("稻香"))
            );
        }
        other => panic!("Unexpected error: {other:?}"),
    }
    assert_eq!(
        stopped.expect("stop should succeed").get("message"),
        Some(&json!("Nothing is playing"))
    );
    Ok(())
}

#[tokio::test]
async fn add_returns_the_sum() -> Result<()> {
    let fixture = MusicFixture::new(&[])?;
    let session = Session::start(&fixture).await?;

    let sum = session.call("add", Some(json!({ "a": 2, "b": 40 }))).await;
    let overflow = session
        .call("add", Some(json!({ "a": i64::MAX, "b": 1 })))
        .await;
    session.finish().await;

    assert_eq!(sum.expect("add should succeed"), json!({ "result": 42 }));
    match overflow.expect_err("overflow should fail") {
        ServiceError::McpError(inner) => assert_eq!(inner.code, ErrorCode::INVALID_PARAMS),
        other => panic!("Unexpected error: {other:?}"),
    }
    Ok(())
}
