use std::process::ExitCode;

use anyhow::{Context, Error};
use rmcp::ServiceExt;
use tokio::net::TcpListener;

use crate::{
    cli::{LaunchProfile, TransportMode},
    lib::telemetry::{self, RuntimeModeTelemetry},
    server::{
        config::ServerConfig,
        runtime::{build_instructions, MusicServer},
    },
};

/// Bundles a runtime error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }
}

/// Start the MCP server and select stdio/TCP based on the launch profile.
pub async fn run_server(profile: LaunchProfile, config: ServerConfig) -> Result<(), RuntimeExit> {
    let instructions = build_instructions(&profile, &config);
    let server = MusicServer::new(&config, instructions.clone());

    telemetry::emit_runtime_mode(&RuntimeModeTelemetry {
        transport: profile.transport.as_str(),
        host: Some(config.server.host.as_str()),
        port: Some(config.server.port),
        config_path: config.source_path.to_string_lossy().as_ref(),
        music_dir: config.player.music_dir.to_string_lossy().as_ref(),
        player_path: config.player.player_path.to_string_lossy().as_ref(),
        instructions: &instructions,
        launch_args: &profile.launch_args,
    });

    match profile.transport {
        TransportMode::Stdio => run_stdio(server).await,
        TransportMode::Tcp => run_tcp(server, &config).await,
    }
}

async fn run_stdio(server: MusicServer) -> Result<(), RuntimeExit> {
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(RuntimeExit::from_error)?;
    running.waiting().await.map_err(RuntimeExit::from_error)?;
    Ok(())
}

/// Accept connections forever; every connection shares the same playback session.
async fn run_tcp(server: MusicServer, config: &ServerConfig) -> Result<(), RuntimeExit> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind TCP port {addr}"))
        .map_err(RuntimeExit::from_error)?;
    tracing::info!(
        target: "music_mcp::runtime",
        transport = "tcp",
        bind_addr = %addr,
        "Started listening in TCP mode"
    );

    loop {
        let (stream, peer) = listener
            .accept()
            .await
            .with_context(|| format!("failed to accept TCP connection ({addr})"))
            .map_err(RuntimeExit::from_error)?;
        tracing::info!(
            target: "music_mcp::runtime",
            peer = %peer,
            "Accepted connection from MCP client"
        );
        let cloned = server.clone();
        tokio::spawn(async move {
            let result = match cloned.serve(stream).await {
                Ok(running) => running.waiting().await.map(|_| ()).map_err(Error::new),
                Err(err) => Err(Error::new(err)),
            };
            match result {
                Ok(()) => tracing::info!(
                    target: "music_mcp::runtime",
                    peer = %peer,
                    "MCP client disconnected"
                ),
                Err(err) => tracing::warn!(
                    target: "music_mcp::runtime",
                    peer = %peer,
                    error = %err,
                    "MCP connection ended with an error"
                ),
            }
        });
    }
}
