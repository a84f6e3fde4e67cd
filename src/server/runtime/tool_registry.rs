use std::sync::Arc;

use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler},
    model::{ErrorData, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, Json,
};

use crate::{
    server::config::ServerConfig,
    tools::{
        self,
        calculator::{self, AddRequest, AddResponse},
        music::{
            self, ListMusicResponse, PlayMusicRequest, PlayMusicResponse, PlaybackController,
            PlaybackStatusResponse, StopMusicResponse,
        },
        ServerToolRouter,
    },
};

#[derive(Clone)]
pub struct MusicServer {
    instructions: Arc<String>,
    tool_router: ServerToolRouter<Self>,
    playback: PlaybackController,
}

impl MusicServer {
    pub fn new(config: &ServerConfig, instructions: String) -> Self {
        let router = tools::build_router(Self::tool_router);
        let playback = PlaybackController::new(&config.player);
        Self {
            instructions: Arc::new(instructions),
            tool_router: router,
            playback,
        }
    }
}

#[tool_router(router = tool_router)]
impl MusicServer {
    #[tool(name = "add", description = "Add two integer numbers together")]
    async fn add(
        &self,
        Parameters(request): Parameters<AddRequest>,
    ) -> Result<Json<AddResponse>, ErrorData> {
        calculator::add(&request).map(Json)
    }

    #[tool(
        name = "list_music",
        description = "List the audio files in the music directory (subdirectories are not searched). Useful before playing a song."
    )]
    async fn list_music(&self) -> Result<Json<ListMusicResponse>, ErrorData> {
        self.playback
            .list_tracks()
            .map(|listing| Json(listing.into()))
            .map_err(music::playback_error_to_error_data)
    }

    #[tool(
        name = "play_music",
        description = "Play a song by file name, e.g. `青花.mp3`. A partial name plays the first file that contains it. Replaces the song currently playing."
    )]
    async fn play_music(
        &self,
        Parameters(request): Parameters<PlayMusicRequest>,
    ) -> Result<Json<PlayMusicResponse>, ErrorData> {
        self.playback
            .play_track(&request.name)
            .await
            .map(|outcome| Json(outcome.into()))
            .map_err(music::playback_error_to_error_data)
    }

    #[tool(name = "stop_music", description = "Stop the song that is currently playing")]
    async fn stop_music(&self) -> Result<Json<StopMusicResponse>, ErrorData> {
        Ok(Json(self.playback.stop_playback().await.into()))
    }

    #[tool(
        name = "query_playing_music",
        description = "Report which song is currently playing"
    )]
    async fn query_playing_music(&self) -> Result<Json<PlaybackStatusResponse>, ErrorData> {
        Ok(Json(self.playback.query_status().await.into()))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for MusicServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }
}
