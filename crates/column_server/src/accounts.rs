//! In-memory account book: credentials and per-game tallies.

use std::collections::HashMap;
use std::sync::Arc;

use column_match::{Credentials, GameKind, ScoreEvent};
use derive_getters::Getters;
use derive_more::Display;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Leaderboard entries shown per game.
pub const LEADERBOARD_SIZE: usize = 5;

/// Games played and won in one game kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct Tally {
    /// Matches that ended with a win or a loss.
    played: u32,
    /// Matches won.
    won: u32,
}

impl Tally {
    fn record(&mut self, event: ScoreEvent) {
        self.played += 1;
        if event == ScoreEvent::Win {
            self.won += 1;
        }
    }

    /// Win percentage, `0` when nothing was played.
    pub fn win_rate(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            f64::from(self.won) / f64::from(self.played) * 100.0
        }
    }
}

/// A stored account.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Account {
    /// Account password.
    password: String,
    /// Four-in-row results.
    four_in_row: Tally,
    /// Dual-letter results.
    dual_letter: Tally,
}

impl Account {
    fn new(password: String) -> Self {
        Self {
            password,
            four_in_row: Tally::default(),
            dual_letter: Tally::default(),
        }
    }

    /// Results for `kind`.
    pub fn tally(&self, kind: GameKind) -> &Tally {
        match kind {
            GameKind::FourInRow => &self.four_in_row,
            GameKind::DualLetter => &self.dual_letter,
        }
    }

    fn tally_mut(&mut self, kind: GameKind) -> &mut Tally {
        match kind {
            GameKind::FourInRow => &mut self.four_in_row,
            GameKind::DualLetter => &mut self.dual_letter,
        }
    }
}

/// Why an account could not be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, derive_more::Error)]
pub enum SignUpError {
    /// Username or password empty.
    #[display("Username and password are required")]
    Blank,
    /// Username already registered.
    #[display("Username already exists")]
    Taken,
}

/// Shared account storage.
#[derive(Debug, Clone, Default)]
pub struct AccountBook {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl AccountBook {
    /// Creates an empty book.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating account book");
        Self::default()
    }

    /// Registers a new account with empty tallies.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn create(&self, credentials: &Credentials) -> Result<(), SignUpError> {
        if credentials.is_blank() {
            return Err(SignUpError::Blank);
        }

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&credentials.username) {
            warn!("Username already exists");
            return Err(SignUpError::Taken);
        }

        accounts.insert(
            credentials.username.clone(),
            Account::new(credentials.password.clone()),
        );
        info!("Account created");
        Ok(())
    }

    /// True if the credentials match a stored account.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn verify(&self, credentials: &Credentials) -> bool {
        let accounts = self.accounts.read().await;
        let matched = accounts
            .get(&credentials.username)
            .is_some_and(|account| account.password == credentials.password);
        debug!(matched, "Checked credentials");
        matched
    }

    /// Records a result; unknown usernames are ignored.
    #[instrument(skip(self))]
    pub async fn record(&self, kind: GameKind, event: ScoreEvent, username: &str) -> bool {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(username) {
            Some(account) => {
                account.tally_mut(kind).record(event);
                info!("Result recorded");
                true
            }
            None => {
                warn!("Result for unknown user ignored");
                false
            }
        }
    }

    /// Snapshot of one account.
    pub async fn account(&self, username: &str) -> Option<Account> {
        self.accounts.read().await.get(username).cloned()
    }

    /// Leaderboard text for both games.
    #[instrument(skip(self))]
    pub async fn leaderboard(&self) -> String {
        let accounts = self.accounts.read().await;
        let mut text = String::new();

        for (i, kind) in [GameKind::FourInRow, GameKind::DualLetter].into_iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(&format!(
                "{} champion players (top {}):\n",
                kind.title(),
                LEADERBOARD_SIZE
            ));

            let mut ranked: Vec<(&String, &Tally)> = accounts
                .iter()
                .map(|(name, account)| (name, account.tally(kind)))
                .collect();
            ranked.sort_by(|(a_name, a), (b_name, b)| {
                b.won
                    .cmp(&a.won)
                    .then(a.played.cmp(&b.played))
                    .then(a_name.cmp(b_name))
            });

            for (rank, (name, tally)) in ranked.into_iter().take(LEADERBOARD_SIZE).enumerate() {
                text.push_str(&format!(
                    "{}) {}:  WINS-{} PLAYED-{}  WINRATE-{:.0}%\n",
                    rank + 1,
                    name,
                    tally.won,
                    tally.played,
                    tally.win_rate()
                ));
            }
        }

        text
    }
}
