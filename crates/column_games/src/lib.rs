//! Column Games - command-line front end
//!
//! Account sign-up and sign-in, remembered sessions, the leaderboard, and
//! the account and score service itself.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod commands;
mod config;

pub use cli::{Cli, Command};
pub use commands::{
    leaderboard, print_leaderboard, session_manager, sign_in, sign_out, sign_up, who_am_i,
};
pub use config::{ClientConfig, ConfigError, SERVER_URL_ENV};
