//! Column Server - account and score service
//!
//! Stores accounts and per-game win/loss tallies in memory and serves the
//! routes listed in [`column_match::routes`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod accounts;
mod api;

pub use accounts::{Account, AccountBook, LEADERBOARD_SIZE, SignUpError, Tally};
pub use api::router;

use anyhow::Result;
use tracing::{info, instrument};

/// Serves the account and score routes on `host:port` until the process exits.
#[instrument]
pub async fn serve(host: String, port: u16) -> Result<()> {
    let app = router(AccountBook::new());
    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!(address = %listener.local_addr()?, "Score service ready");
    axum::serve(listener, app).await?;
    Ok(())
}
