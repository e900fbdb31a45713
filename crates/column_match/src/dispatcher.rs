//! Routes automated-opponent turns to the engine's search entry points.

use derive_more::Display;
use tracing::{error, info, instrument};

use crate::{BotTier, Engine, GameKind, Letter, PlayerId};

/// A move the engine chose and committed for a bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotMove {
    /// Row the piece landed in.
    pub row: usize,
    /// Column the piece was dropped into.
    pub column: usize,
    /// Letter dropped, dual-letter only.
    pub letter: Option<Letter>,
}

/// The engine proposed a move it could not place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, derive_more::Error)]
#[display("{} {} bot proposed an illegal move in column {}", kind, tier, column)]
pub struct BotError {
    /// Game being played.
    pub kind: GameKind,
    /// Tier that produced the move.
    pub tier: BotTier,
    /// Column the engine reported.
    pub column: usize,
}

/// Stateless selector over the six search entry points.
#[derive(Debug, Clone, Copy, Default)]
pub struct BotDispatcher;

impl BotDispatcher {
    /// Asks the engine for `player`'s move at `tier`.
    ///
    /// # Errors
    ///
    /// Returns [`BotError`] if the engine reports row `0` or a column outside
    /// the board, which the match must treat as fatal.
    #[instrument(skip(self, engine))]
    pub fn next_move(
        &self,
        engine: &mut dyn Engine,
        kind: GameKind,
        tier: BotTier,
        player: PlayerId,
    ) -> Result<BotMove, BotError> {
        let chosen = match kind {
            GameKind::FourInRow => {
                let placement = match tier {
                    BotTier::Easy => engine.easy_piece(player),
                    BotTier::Medium => engine.medium_piece(player),
                    BotTier::Hard => engine.hard_piece(player),
                };
                BotMove {
                    row: placement.row,
                    column: placement.column,
                    letter: None,
                }
            }
            GameKind::DualLetter => {
                let placement = match tier {
                    BotTier::Easy => engine.easy_letter(player),
                    BotTier::Medium => engine.medium_letter(player),
                    BotTier::Hard => engine.hard_letter(player),
                };
                BotMove {
                    row: placement.row,
                    column: placement.column,
                    letter: Some(placement.letter),
                }
            }
        };

        if chosen.row == 0 || !kind.has_column(chosen.column) {
            error!(column = chosen.column, "Engine proposed an unplaceable bot move");
            return Err(BotError {
                kind,
                tier,
                column: chosen.column,
            });
        }

        info!(row = chosen.row, column = chosen.column, letter = ?chosen.letter, "Bot moved");
        Ok(chosen)
    }
}
