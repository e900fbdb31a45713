//! Client side of the remote account and score service.

use async_trait::async_trait;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::GameKind;

/// HTTP routes exposed by the account and score service.
pub mod routes {
    use crate::{GameKind, ScoreEvent};

    /// Create an account.
    pub const SIGN_UP: &str = "/signup";
    /// Check credentials.
    pub const SIGN_IN: &str = "/signin";
    /// Leaderboard text.
    pub const LEADERBOARD: &str = "/data";
    /// Four-in-row win.
    pub const WIN_FOUR_IN_ROW: &str = "/winc4";
    /// Four-in-row loss.
    pub const LOSE_FOUR_IN_ROW: &str = "/losec4";
    /// Dual-letter win.
    pub const WIN_DUAL_LETTER: &str = "/wintoot";
    /// Dual-letter loss.
    pub const LOSE_DUAL_LETTER: &str = "/losetoot";

    /// Route reporting `event` for a `kind` match.
    pub fn score(kind: GameKind, event: ScoreEvent) -> &'static str {
        match (kind, event) {
            (GameKind::FourInRow, ScoreEvent::Win) => WIN_FOUR_IN_ROW,
            (GameKind::FourInRow, ScoreEvent::Loss) => LOSE_FOUR_IN_ROW,
            (GameKind::DualLetter, ScoreEvent::Win) => WIN_DUAL_LETTER,
            (GameKind::DualLetter, ScoreEvent::Loss) => LOSE_DUAL_LETTER,
        }
    }
}

/// Username and password pair sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// True if either field is empty.
    pub fn is_blank(&self) -> bool {
        self.username.is_empty() || self.password.is_empty()
    }
}

/// Score change recorded for the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreEvent {
    /// Played and won.
    Win,
    /// Played and lost.
    Loss,
}

/// Remote call failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Remote error: {} at {}:{}", message, file, line)]
pub struct RemoteError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RemoteError {
    /// Creates a new remote error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("HTTP error: {}", err))
    }
}

/// Operations of the account and score service.
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Creates an account.
    async fn create_account(&self, credentials: &Credentials) -> Result<(), RemoteError>;

    /// Returns whether the credentials match an account.
    async fn sign_in(&self, credentials: &Credentials) -> Result<bool, RemoteError>;

    /// Fetches the newline-delimited leaderboard text.
    async fn leaderboard(&self) -> Result<String, RemoteError>;

    /// Records `event` for `username` in a `kind` match.
    async fn report(
        &self,
        kind: GameKind,
        event: ScoreEvent,
        username: &str,
    ) -> Result<(), RemoteError>;
}

/// [`RemoteService`] over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRemote {
    /// Creates a client for the service at `base_url`.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }
}

#[async_trait]
impl RemoteService for HttpRemote {
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    async fn create_account(&self, credentials: &Credentials) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(self.url(routes::SIGN_UP))
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::new(format!(
                "Account creation failed: {} - {}",
                status, body
            )));
        }

        info!("Account created");
        Ok(())
    }

    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    async fn sign_in(&self, credentials: &Credentials) -> Result<bool, RemoteError> {
        let response = self
            .client
            .post(self.url(routes::SIGN_IN))
            .json(credentials)
            .send()
            .await?
            .error_for_status()?;

        let answer: serde_json::Value = response.json().await?;
        debug!(%answer, "Sign-in response");

        // Older servers answer with the strings "true" / "false".
        match answer {
            serde_json::Value::Bool(signed_in) => Ok(signed_in),
            serde_json::Value::String(text) => Ok(text == "true"),
            other => Err(RemoteError::new(format!(
                "Unexpected sign-in response: {}",
                other
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn leaderboard(&self) -> Result<String, RemoteError> {
        let body = self
            .client
            .get(self.url(routes::LEADERBOARD))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        // The service sends the text as a JSON string; accept raw text too.
        Ok(serde_json::from_str::<String>(&body).unwrap_or(body))
    }

    #[instrument(skip(self))]
    async fn report(
        &self,
        kind: GameKind,
        event: ScoreEvent,
        username: &str,
    ) -> Result<(), RemoteError> {
        self.client
            .post(self.url(routes::score(kind, event)))
            .json(&username)
            .send()
            .await?
            .error_for_status()?;

        info!("Score reported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_routes_follow_game_kind() {
        assert_eq!(routes::score(GameKind::FourInRow, ScoreEvent::Win), "/winc4");
        assert_eq!(routes::score(GameKind::DualLetter, ScoreEvent::Loss), "/losetoot");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let remote = HttpRemote::new("http://localhost:8080/");
        assert_eq!(remote.url(routes::SIGN_IN), "http://localhost:8080/signin");
    }

    #[test]
    fn test_blank_credentials() {
        assert!(Credentials::new(String::new(), "pw".into()).is_blank());
        assert!(!Credentials::new("ann".into(), "pw".into()).is_blank());
    }
}
