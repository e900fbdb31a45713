//! Contract of the external board engine.
//!
//! The engine owns the board, checks move legality, detects completed lines
//! and searches moves for automated opponents. This crate only consumes the
//! contract; it never looks inside the board.
//!
//! Rows are 1-based from the top of the board. A returned row of `0` means
//! the column was full and nothing was placed.

use serde::{Deserialize, Serialize};

use crate::{GameKind, Letter, PlayerId};

/// Result of a piece search in the four-in-row game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct PiecePlacement {
    /// Row the piece landed in, `0` if nothing was placed.
    pub row: usize,
    /// Column the piece was dropped into.
    pub column: usize,
}

/// Result of a letter search in the dual-letter game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct LetterPlacement {
    /// Row the letter landed in, `0` if nothing was placed.
    pub row: usize,
    /// Column the letter was dropped into.
    pub column: usize,
    /// Letter that was dropped.
    pub letter: Letter,
}

/// Word signal the engine reports after a dual-letter move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineSignal {
    /// No word completed (code 0).
    Nothing,
    /// The first word was completed (code 1).
    FirstWord,
    /// The second word was completed (code 2).
    SecondWord,
    /// Both words completed at once (code 3).
    Tie,
}

impl LineSignal {
    /// Decodes the engine's numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Nothing),
            1 => Some(Self::FirstWord),
            2 => Some(Self::SecondWord),
            3 => Some(Self::Tie),
            _ => None,
        }
    }

    /// Numeric code of this signal.
    pub fn code(self) -> u8 {
        match self {
            Self::Nothing => 0,
            Self::FirstWord => 1,
            Self::SecondWord => 2,
            Self::Tie => 3,
        }
    }
}

/// Synchronous call interface of the board engine.
///
/// The six search entry points commit the move they choose and report
/// where it landed.
pub trait Engine {
    /// Selects the game the board is laid out for.
    fn configure(&mut self, kind: GameKind);

    /// Clears the board.
    fn reset_board(&mut self);

    /// Drops `player`'s piece into `column`; returns the row, `0` if full.
    fn place_piece(&mut self, column: usize, player: PlayerId) -> usize;

    /// True if the piece at (`row`, `column`) completed a line for `player`.
    fn is_winning_move(&self, row: usize, column: usize, player: PlayerId) -> bool;

    /// Easy four-in-row search.
    fn easy_piece(&mut self, player: PlayerId) -> PiecePlacement;

    /// Medium four-in-row search.
    fn medium_piece(&mut self, player: PlayerId) -> PiecePlacement;

    /// Hard four-in-row search.
    fn hard_piece(&mut self, player: PlayerId) -> PiecePlacement;

    /// Drops `letter` into `column`; returns the row, `0` if full.
    fn place_letter(&mut self, column: usize, letter: Letter) -> usize;

    /// Word signal for the letter at (`row`, `column`).
    fn win_signal(&self, row: usize, column: usize) -> LineSignal;

    /// Easy dual-letter search.
    fn easy_letter(&mut self, player: PlayerId) -> LetterPlacement;

    /// Medium dual-letter search.
    fn medium_letter(&mut self, player: PlayerId) -> LetterPlacement;

    /// Hard dual-letter search.
    fn hard_letter(&mut self, player: PlayerId) -> LetterPlacement;

    /// Shows a transient message to the user.
    fn notify(&mut self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_codes() {
        for code in 0..=3 {
            let signal = LineSignal::from_code(code).expect("known code");
            assert_eq!(signal.code(), code);
        }
        assert_eq!(LineSignal::from_code(4), None);
    }
}
