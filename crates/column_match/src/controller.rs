//! Match controller: the turn state machine.
//!
//! The controller owns the single [`Match`] of a page visit and is the only
//! code that mutates it. A move is resolved completely, including a chained
//! bot reply, before `apply_move` returns; `&mut self` keeps callers from
//! interleaving a second move.

use std::sync::Arc;

use derive_getters::Getters;
use derive_more::Display;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::classifier::{WinSignal, classify};
use crate::{
    BotDispatcher, Engine, GameKind, Letter, MoverKind, Outcome, Phase, PhraseAssignment,
    PlayerId, RemoteService, ScoreReporter,
};

/// State of one match.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Match {
    /// Game being played.
    game_kind: GameKind,
    /// Seat whose move is expected.
    active_player: PlayerId,
    /// Mover for player 2; player 1 is always human.
    opponent: MoverKind,
    /// Accepted moves so far.
    move_count: u32,
    /// Lifecycle phase.
    phase: Phase,
    /// Word ownership, dual-letter only.
    phrase_assignment: Option<PhraseAssignment>,
    /// Letter used by human moves that do not name one.
    selected_letter: Letter,
    /// Set once, on the transition into [`Phase::Terminal`].
    outcome: Option<Outcome>,
}

impl Match {
    /// Fresh match awaiting opponent selection.
    pub fn new(game_kind: GameKind) -> Self {
        Self {
            game_kind,
            active_player: PlayerId::One,
            opponent: MoverKind::Human,
            move_count: 0,
            phase: Phase::AwaitingOpponentSelection,
            phrase_assignment: match game_kind {
                GameKind::FourInRow => None,
                GameKind::DualLetter => Some(PhraseAssignment::new()),
            },
            selected_letter: Letter::T,
            outcome: None,
        }
    }

    /// Mover occupying `player`'s seat.
    pub fn mover_kind(&self, player: PlayerId) -> MoverKind {
        match player {
            PlayerId::One => MoverKind::Human,
            PlayerId::Two => self.opponent,
        }
    }
}

/// Notifications from the controller to the board view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// Player 2's mover was chosen.
    OpponentSelected {
        /// The chosen mover.
        opponent: MoverKind,
    },
    /// The two words changed owners.
    PhrasesSwapped {
        /// Assignment after the swap.
        phrases: PhraseAssignment,
    },
    /// The human's letter changed.
    LetterSelected {
        /// The new letter.
        letter: Letter,
    },
    /// The engine accepted a move.
    PiecePlaced {
        /// Seat that moved.
        player: PlayerId,
        /// Row the piece landed in.
        row: usize,
        /// Column played.
        column: usize,
        /// Letter played, dual-letter only.
        letter: Option<Letter>,
    },
    /// A move was refused because the column is full.
    ColumnRejected {
        /// The full column.
        column: usize,
    },
    /// The turn moved to `player`.
    TurnPassed {
        /// Seat now to move.
        player: PlayerId,
    },
    /// The match reached its outcome.
    MatchOver {
        /// Final outcome.
        outcome: Outcome,
    },
    /// The match was discarded and recreated.
    Restarted {
        /// Game of the new match.
        kind: GameKind,
    },
}

/// How a call to [`MatchController::apply_move`] resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Column full; nothing changed.
    Rejected {
        /// The full column.
        column: usize,
    },
    /// Play continues; `next` is to move.
    Continued {
        /// Seat to move next.
        next: PlayerId,
    },
    /// The match ended.
    Finished(Outcome),
}

/// Operation called outside its precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, derive_more::Error)]
pub enum MatchError {
    /// Operation not allowed in the current phase.
    #[display("{} is not allowed while the match is {:?}", operation, phase)]
    WrongPhase {
        /// Operation attempted.
        operation: &'static str,
        /// Phase at the time.
        phase: Phase,
    },
    /// Column outside the board.
    #[display("Column {} is outside 1..={}", column, columns)]
    ColumnOutOfRange {
        /// Column requested.
        column: usize,
        /// Columns of this game.
        columns: usize,
    },
    /// Phrases are frozen after the first move.
    #[display("Phrases cannot be swapped after the first move")]
    PhrasesFrozen,
    /// Dual-letter operation on a four-in-row match.
    #[display("Operation only applies to the dual-letter game")]
    NotDualLetter,
    /// Four-in-row moves carry no letter.
    #[display("Four-in-row moves cannot carry a letter")]
    SymbolNotAllowed,
}

/// Drives a match from opponent selection to its outcome.
pub struct MatchController {
    state: Match,
    engine: Box<dyn Engine>,
    dispatcher: BotDispatcher,
    reporter: ScoreReporter,
    events: mpsc::UnboundedSender<MatchEvent>,
    pending_report: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for MatchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchController")
            .field("state", &self.state)
            .field("reporter", &self.reporter)
            .finish_non_exhaustive()
    }
}

impl MatchController {
    /// Creates a controller for a fresh `kind` match and readies the engine.
    ///
    /// `username` is credited with the result when the match ends.
    #[instrument(skip(engine, remote, events))]
    pub fn new(
        kind: GameKind,
        mut engine: Box<dyn Engine>,
        remote: Arc<dyn RemoteService>,
        username: Option<String>,
        events: mpsc::UnboundedSender<MatchEvent>,
    ) -> Self {
        info!("Creating match controller");
        engine.configure(kind);
        engine.reset_board();
        Self {
            state: Match::new(kind),
            engine,
            dispatcher: BotDispatcher,
            reporter: ScoreReporter::new(remote, username, kind),
            events,
            pending_report: None,
        }
    }

    /// Current match state.
    pub fn state(&self) -> &Match {
        &self.state
    }

    /// Takes the in-flight score report task, if one was started.
    pub fn take_pending_report(&mut self) -> Option<JoinHandle<()>> {
        self.pending_report.take()
    }

    /// Chooses player 2's mover and starts play.
    ///
    /// May be repeated until the first move is played.
    #[instrument(skip(self))]
    pub fn select_opponent(&mut self, opponent: MoverKind) -> Result<(), MatchError> {
        let reselect = self.state.phase == Phase::InProgress && self.state.move_count == 0;
        if self.state.phase != Phase::AwaitingOpponentSelection && !reselect {
            return Err(self.wrong_phase("select_opponent"));
        }

        self.state.opponent = opponent;
        self.state.phase = Phase::InProgress;
        info!(opponent = opponent.label(), reselect, "Opponent selected");
        self.emit(MatchEvent::OpponentSelected { opponent });
        Ok(())
    }

    /// Exchanges the two words between the players.
    #[instrument(skip(self))]
    pub fn swap_phrases(&mut self) -> Result<PhraseAssignment, MatchError> {
        if self.state.phase == Phase::Terminal {
            return Err(self.wrong_phase("swap_phrases"));
        }
        if self.state.move_count > 0 {
            return Err(MatchError::PhrasesFrozen);
        }
        let phrases = self
            .state
            .phrase_assignment
            .as_mut()
            .ok_or(MatchError::NotDualLetter)?;

        phrases.swap();
        let phrases = *phrases;
        info!(
            player_one = phrases.word_of(PlayerId::One).spelling(),
            "Phrases swapped"
        );
        self.emit(MatchEvent::PhrasesSwapped { phrases });
        Ok(phrases)
    }

    /// Sets the letter used by human moves that do not name one.
    #[instrument(skip(self))]
    pub fn select_letter(&mut self, letter: Letter) -> Result<(), MatchError> {
        if self.state.game_kind != GameKind::DualLetter {
            return Err(MatchError::NotDualLetter);
        }
        if self.state.phase == Phase::Terminal {
            return Err(self.wrong_phase("select_letter"));
        }
        self.state.selected_letter = letter;
        debug!("Letter selected");
        self.emit(MatchEvent::LetterSelected { letter });
        Ok(())
    }

    /// Plays the active human's move in `column` (1-based).
    ///
    /// For dual-letter matches `symbol` defaults to the selected letter.
    /// If the next seat is a bot, its reply is played before returning.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError`] if the match is not in progress, the column
    /// is off the board, or a letter is given for a four-in-row match. A
    /// full column is not an error: it yields [`MoveOutcome::Rejected`].
    #[instrument(skip(self), fields(player = %self.state.active_player))]
    pub fn apply_move(
        &mut self,
        column: usize,
        symbol: Option<Letter>,
    ) -> Result<MoveOutcome, MatchError> {
        if self.state.phase != Phase::InProgress {
            return Err(self.wrong_phase("apply_move"));
        }
        let kind = self.state.game_kind;
        if !kind.has_column(column) {
            return Err(MatchError::ColumnOutOfRange {
                column,
                columns: kind.columns(),
            });
        }
        let letter = match (kind, symbol) {
            (GameKind::FourInRow, Some(_)) => return Err(MatchError::SymbolNotAllowed),
            (GameKind::FourInRow, None) => None,
            (GameKind::DualLetter, symbol) => Some(symbol.unwrap_or(self.state.selected_letter)),
        };

        let mover = self.state.active_player;
        let row = match letter {
            None => self.engine.place_piece(column, mover),
            Some(letter) => self.engine.place_letter(column, letter),
        };

        if row == 0 {
            warn!(column, "Column is full, move rejected");
            self.engine.notify(&format!("Column {column} is full."));
            self.emit(MatchEvent::ColumnRejected { column });
            return Ok(MoveOutcome::Rejected { column });
        }

        if let Some(outcome) = self.accept(mover, row, column, letter) {
            return Ok(MoveOutcome::Finished(outcome));
        }

        while self.state.phase == Phase::InProgress {
            let bot = self.state.active_player;
            let Some(tier) = self.state.mover_kind(bot).bot_tier() else {
                break;
            };

            match self
                .dispatcher
                .next_move(self.engine.as_mut(), kind, tier, bot)
            {
                Ok(reply) => {
                    if let Some(outcome) = self.accept(bot, reply.row, reply.column, reply.letter) {
                        return Ok(MoveOutcome::Finished(outcome));
                    }
                }
                Err(e) => {
                    error!(error = %e, "Ending match after engine inconsistency");
                    self.engine.notify(&format!(
                        "The {} could not make a legal move. The match is over.",
                        self.state.opponent.label()
                    ));
                    return Ok(MoveOutcome::Finished(self.finish(Outcome::NoWinner)));
                }
            }
        }

        Ok(MoveOutcome::Continued {
            next: self.state.active_player,
        })
    }

    /// Discards the match and starts a fresh one of the same game.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        let kind = self.state.game_kind;
        self.engine.configure(kind);
        self.engine.reset_board();
        self.state = Match::new(kind);
        self.pending_report = None;
        info!(%kind, "Match restarted");
        self.emit(MatchEvent::Restarted { kind });
    }

    /// Records an accepted move and classifies it. Returns the outcome if
    /// the move ended the match, otherwise passes the turn.
    fn accept(
        &mut self,
        mover: PlayerId,
        row: usize,
        column: usize,
        letter: Option<Letter>,
    ) -> Option<Outcome> {
        self.state.move_count += 1;
        debug!(%mover, row, column, ?letter, move_count = self.state.move_count, "Move accepted");
        self.emit(MatchEvent::PiecePlaced {
            player: mover,
            row,
            column,
            letter,
        });

        let signal = match letter {
            None => WinSignal::Line(self.engine.is_winning_move(row, column, mover)),
            Some(_) => WinSignal::Letters(self.engine.win_signal(row, column)),
        };
        let phrases = self.state.phrase_assignment.unwrap_or_default();

        if let Some(outcome) = classify(signal, mover, &phrases) {
            return Some(self.finish(outcome));
        }

        self.state.active_player = mover.other();
        self.emit(MatchEvent::TurnPassed {
            player: self.state.active_player,
        });
        None
    }

    /// Enters [`Phase::Terminal`] and reports the outcome.
    fn finish(&mut self, outcome: Outcome) -> Outcome {
        debug_assert_ne!(self.state.phase, Phase::Terminal, "match finished twice");
        self.state.phase = Phase::Terminal;
        self.state.outcome = Some(outcome);
        info!(%outcome, move_count = self.state.move_count, "Match over");

        self.engine.notify(&outcome.announcement());
        self.emit(MatchEvent::MatchOver { outcome });
        self.pending_report = self.reporter.report(outcome);
        outcome
    }

    fn wrong_phase(&self, operation: &'static str) -> MatchError {
        warn!(operation, phase = ?self.state.phase, "Operation rejected in current phase");
        MatchError::WrongPhase {
            operation,
            phase: self.state.phase,
        }
    }

    fn emit(&self, event: MatchEvent) {
        if self.events.send(event).is_err() {
            debug!("Board view gone, event dropped");
        }
    }
}
