//! Column Games - Unified CLI

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use column_games::{Cli, ClientConfig, Command};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, host } => {
            info!(%host, port, "Starting score service");
            column_server::serve(host, port).await
        }
        command => run_client(cli.config, cli.server_url, command).await,
    }
}

/// Runs an account or leaderboard command against the configured service.
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_client(
    config_path: PathBuf,
    server_url: Option<String>,
    command: Command,
) -> Result<()> {
    let config = ClientConfig::resolve(&config_path, server_url)?;
    info!(server_url = %config.server_url(), "Using score service");

    if let Command::Leaderboard = command {
        return column_games::print_leaderboard(&config).await;
    }

    let mut manager = column_games::session_manager(&config);
    let message = match command {
        Command::Signup { username, password } => {
            column_games::sign_up(&mut manager, &username, &password).await
        }
        Command::Signin { username, password } => {
            column_games::sign_in(&mut manager, &username, &password).await
        }
        Command::Signout => column_games::sign_out(&mut manager),
        Command::Whoami => column_games::who_am_i(&mut manager).await,
        Command::Serve { .. } | Command::Leaderboard => return Ok(()),
    };

    println!("{}", message);
    Ok(())
}
