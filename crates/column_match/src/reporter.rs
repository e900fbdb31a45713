//! Sends the finished match's result to the score service.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::{GameKind, Outcome, RemoteService, ScoreEvent};

/// Score event for `outcome`, seen from player 1 (the signed-in user).
pub fn score_event(outcome: Outcome) -> Option<ScoreEvent> {
    match outcome {
        Outcome::Player1Win => Some(ScoreEvent::Win),
        Outcome::Player2Win => Some(ScoreEvent::Loss),
        Outcome::Tie | Outcome::NoWinner => None,
    }
}

/// Reports a match outcome once, without making the match wait.
pub struct ScoreReporter {
    remote: Arc<dyn RemoteService>,
    username: Option<String>,
    kind: GameKind,
}

impl std::fmt::Debug for ScoreReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreReporter")
            .field("username", &self.username)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl ScoreReporter {
    /// Creates a reporter crediting `username` (if signed in) for `kind` matches.
    #[instrument(skip(remote))]
    pub fn new(remote: Arc<dyn RemoteService>, username: Option<String>, kind: GameKind) -> Self {
        Self {
            remote,
            username,
            kind,
        }
    }

    /// Username credited with the result.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Starts the remote call for `outcome` in the background.
    ///
    /// Ties, no-winner results and signed-out users send nothing. Failures
    /// are logged by the spawned task. Returns the task so callers may await
    /// delivery; the match never does.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub fn report(&self, outcome: Outcome) -> Option<JoinHandle<()>> {
        let Some(event) = score_event(outcome) else {
            debug!("Outcome has no score event");
            return None;
        };
        let Some(username) = self.username.clone() else {
            debug!("No signed-in user, score not reported");
            return None;
        };
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "No async runtime, score report dropped");
                return None;
            }
        };

        info!(?event, username = %username, "Reporting score");
        let remote = Arc::clone(&self.remote);
        let kind = self.kind;
        Some(handle.spawn(async move {
            if let Err(e) = remote.report(kind, event, &username).await {
                warn!(error = %e, username = %username, "Score report failed");
            }
        }))
    }
}
