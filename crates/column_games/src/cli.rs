//! Command-line interface for column_games.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Column Games - accounts, scores and leaderboards for column-drop games
#[derive(Parser, Debug)]
#[command(name = "column_games")]
#[command(about = "Accounts, scores and leaderboards for Connect4 and TOOT", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the client config file
    #[arg(long, global = true, default_value = "column_games.toml")]
    pub config: PathBuf,

    /// Score service URL, overrides config and environment
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the account and score service
    Serve {
        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Create an account and remember it
    Signup {
        /// Account name
        username: String,
        /// Account password
        password: String,
    },

    /// Sign in and remember the credentials
    Signin {
        /// Account name
        username: String,
        /// Account password
        password: String,
    },

    /// Forget the remembered credentials
    Signout,

    /// Show who is signed in
    Whoami,

    /// Print the leaderboard
    Leaderboard,
}
