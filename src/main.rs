//! Entry point for Music MCP.
use std::process::ExitCode;

use anyhow::Error;
use clap::Parser;
use music_mcp::{
    cli::{execute_cli_command, CliCommand, LaunchProfile, LaunchProfileArgs, ParsedCommand},
    lib::telemetry,
    server::{
        config::ServerConfig,
        runtime::{self, RuntimeExit},
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let args = LaunchProfileArgs::parse();
    let command = args.into_command().map_err(RuntimeExit::from_error)?;

    match command {
        ParsedCommand::RunServer(profile) => run_server(profile).await,
        ParsedCommand::Cli(command, profile) => handle_cli_command(command, &profile),
    }
}

fn load_config(profile: &LaunchProfile) -> Result<ServerConfig, RuntimeExit> {
    ServerConfig::load_from_path(profile.config_path.clone())
        .map_err(|err| RuntimeExit::from_error(Error::new(err)))
}

async fn run_server(profile: LaunchProfile) -> Result<(), RuntimeExit> {
    let config = load_config(&profile)?;
    runtime::run_server(profile, config).await
}

fn handle_cli_command(command: CliCommand, profile: &LaunchProfile) -> Result<(), RuntimeExit> {
    let config = load_config(profile)?;
    let message = execute_cli_command(command, &config).map_err(RuntimeExit::from_error)?;
    println!("{message}");
    Ok(())
}
