//! Test doubles for the board engine and the remote service.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use column_match::{
    BotTier, Credentials, Engine, GameKind, Letter, LetterPlacement, LineSignal, PiecePlacement,
    PlayerId, RemoteError, RemoteService, ScoreEvent,
};

/// Everything the scripted engine was asked to do.
#[derive(Debug, Default)]
pub struct EngineLog {
    pub configured: Vec<GameKind>,
    pub resets: usize,
    pub searches: Vec<(BotTier, PlayerId)>,
    pub win_checks: usize,
    pub notifications: Vec<String>,
}

/// Engine that stacks pieces per column and answers win checks from a script.
pub struct ScriptedEngine {
    rows: usize,
    heights: Vec<usize>,
    wins: VecDeque<bool>,
    signals: VecDeque<LineSignal>,
    bot_columns: VecDeque<usize>,
    bot_letter: Letter,
    stray_row: Option<usize>,
    log: Arc<Mutex<EngineLog>>,
}

impl ScriptedEngine {
    pub fn new() -> (Self, Arc<Mutex<EngineLog>>) {
        let log = Arc::new(Mutex::new(EngineLog::default()));
        let engine = Self {
            rows: 0,
            heights: Vec::new(),
            wins: VecDeque::new(),
            signals: VecDeque::new(),
            bot_columns: VecDeque::new(),
            bot_letter: Letter::O,
            stray_row: None,
            log: Arc::clone(&log),
        };
        (engine, log)
    }

    /// Answers for successive four-in-row win checks; `false` once exhausted.
    pub fn with_wins(mut self, wins: impl IntoIterator<Item = bool>) -> Self {
        self.wins = wins.into_iter().collect();
        self
    }

    /// Answers for successive dual-letter win checks; nothing once exhausted.
    pub fn with_signals(mut self, signals: impl IntoIterator<Item = LineSignal>) -> Self {
        self.signals = signals.into_iter().collect();
        self
    }

    /// Columns successive bot searches drop into.
    pub fn with_bot_columns(mut self, columns: impl IntoIterator<Item = usize>) -> Self {
        self.bot_columns = columns.into_iter().collect();
        self
    }

    /// Row reported when a bot search names a column the board lacks.
    pub fn with_stray_bot_row(mut self, row: usize) -> Self {
        self.stray_row = Some(row);
        self
    }

    fn bot_drop(&mut self, column: usize) -> usize {
        match (self.heights.get(column.wrapping_sub(1)), self.stray_row) {
            (None, Some(row)) => row,
            _ => self.drop_into(column),
        }
    }

    fn drop_into(&mut self, column: usize) -> usize {
        let Some(height) = self.heights.get_mut(column - 1) else {
            return 0;
        };
        if *height >= self.rows {
            return 0;
        }
        *height += 1;
        self.rows - *height + 1
    }

    fn bot_column(&mut self) -> usize {
        match self.bot_columns.pop_front() {
            Some(column) => column,
            None => self
                .heights
                .iter()
                .position(|h| *h < self.rows)
                .map_or(1, |i| i + 1),
        }
    }

    fn search_piece(&mut self, player: PlayerId, tier: BotTier) -> PiecePlacement {
        self.log.lock().unwrap().searches.push((tier, player));
        let column = self.bot_column();
        let row = self.bot_drop(column);
        PiecePlacement::new(row, column)
    }

    fn search_letter(&mut self, player: PlayerId, tier: BotTier) -> LetterPlacement {
        self.log.lock().unwrap().searches.push((tier, player));
        let column = self.bot_column();
        let row = self.bot_drop(column);
        LetterPlacement::new(row, column, self.bot_letter)
    }
}

impl Engine for ScriptedEngine {
    fn configure(&mut self, kind: GameKind) {
        self.rows = kind.rows();
        self.heights = vec![0; kind.columns()];
        self.log.lock().unwrap().configured.push(kind);
    }

    fn reset_board(&mut self) {
        self.heights.fill(0);
        self.log.lock().unwrap().resets += 1;
    }

    fn place_piece(&mut self, column: usize, _player: PlayerId) -> usize {
        self.drop_into(column)
    }

    fn is_winning_move(&self, _row: usize, _column: usize, _player: PlayerId) -> bool {
        let mut log = self.log.lock().unwrap();
        log.win_checks += 1;
        // Answers are indexed by how many checks came before.
        self.wins.get(log.win_checks - 1).copied().unwrap_or(false)
    }

    fn easy_piece(&mut self, player: PlayerId) -> PiecePlacement {
        self.search_piece(player, BotTier::Easy)
    }

    fn medium_piece(&mut self, player: PlayerId) -> PiecePlacement {
        self.search_piece(player, BotTier::Medium)
    }

    fn hard_piece(&mut self, player: PlayerId) -> PiecePlacement {
        self.search_piece(player, BotTier::Hard)
    }

    fn place_letter(&mut self, column: usize, _letter: Letter) -> usize {
        self.drop_into(column)
    }

    fn win_signal(&self, _row: usize, _column: usize) -> LineSignal {
        let mut log = self.log.lock().unwrap();
        log.win_checks += 1;
        self.signals
            .get(log.win_checks - 1)
            .copied()
            .unwrap_or(LineSignal::Nothing)
    }

    fn easy_letter(&mut self, player: PlayerId) -> LetterPlacement {
        self.search_letter(player, BotTier::Easy)
    }

    fn medium_letter(&mut self, player: PlayerId) -> LetterPlacement {
        self.search_letter(player, BotTier::Medium)
    }

    fn hard_letter(&mut self, player: PlayerId) -> LetterPlacement {
        self.search_letter(player, BotTier::Hard)
    }

    fn notify(&mut self, message: &str) {
        self.log.lock().unwrap().notifications.push(message.to_string());
    }
}

/// Remote service that records calls and answers from configuration.
#[derive(Debug, Default)]
pub struct FakeRemote {
    pub accept_sign_in: bool,
    pub fail: bool,
    pub sign_in_calls: Mutex<Vec<Credentials>>,
    pub accounts: Mutex<Vec<Credentials>>,
    pub reports: Mutex<Vec<(GameKind, ScoreEvent, String)>>,
    pub leaderboard: String,
}

impl FakeRemote {
    pub fn accepting() -> Self {
        Self {
            accept_sign_in: true,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), RemoteError> {
        if self.fail {
            Err(RemoteError::new("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteService for FakeRemote {
    async fn create_account(&self, credentials: &Credentials) -> Result<(), RemoteError> {
        self.check()?;
        self.accounts.lock().unwrap().push(credentials.clone());
        Ok(())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<bool, RemoteError> {
        self.sign_in_calls.lock().unwrap().push(credentials.clone());
        self.check()?;
        Ok(self.accept_sign_in)
    }

    async fn leaderboard(&self) -> Result<String, RemoteError> {
        self.check()?;
        Ok(self.leaderboard.clone())
    }

    async fn report(
        &self,
        kind: GameKind,
        event: ScoreEvent,
        username: &str,
    ) -> Result<(), RemoteError> {
        self.check()?;
        self.reports
            .lock()
            .unwrap()
            .push((kind, event, username.to_string()));
        Ok(())
    }
}
