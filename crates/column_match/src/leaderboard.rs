//! Leaderboard text fetched from the score service.

use tracing::{instrument, warn};

use crate::RemoteService;

/// Fetches the leaderboard, one display line per entry.
///
/// Any failure is logged and yields an empty list, leaving the display
/// blank.
#[instrument(skip(remote))]
pub async fn fetch_leaderboard(remote: &dyn RemoteService) -> Vec<String> {
    match remote.leaderboard().await {
        Ok(text) => text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect(),
        Err(e) => {
            warn!(error = %e, "Leaderboard fetch failed");
            Vec::new()
        }
    }
}
