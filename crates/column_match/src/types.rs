//! Core domain types shared by every match component.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::instrument;

/// Which of the two column-drop games a match plays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameKind {
    /// Four pieces of one colour in a line.
    FourInRow,
    /// Spell one of two words with `T` and `O` letters.
    DualLetter,
}

impl GameKind {
    /// Number of column inputs for this game.
    pub fn columns(self) -> usize {
        match self {
            Self::FourInRow => 7,
            Self::DualLetter => 6,
        }
    }

    /// Number of rows per column.
    pub fn rows(self) -> usize {
        match self {
            Self::FourInRow => 6,
            Self::DualLetter => 4,
        }
    }

    /// Human-readable title used in messages and the leaderboard.
    pub fn title(self) -> &'static str {
        match self {
            Self::FourInRow => "Connect4",
            Self::DualLetter => "TOOT",
        }
    }

    /// Returns true if `column` (1-based) names a column of this game.
    pub fn has_column(self, column: usize) -> bool {
        (1..=self.columns()).contains(&column)
    }
}

/// Difficulty tier of an automated opponent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BotTier {
    /// Easy bot.
    Easy,
    /// Medium bot.
    Medium,
    /// Hard bot.
    Hard,
}

/// Who produces the moves for a player seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoverKind {
    /// A person at the keyboard.
    Human,
    /// An automated opponent of the given tier.
    Bot(BotTier),
}

impl MoverKind {
    /// Returns the tier if this mover is automated.
    pub fn bot_tier(self) -> Option<BotTier> {
        match self {
            Self::Human => None,
            Self::Bot(tier) => Some(tier),
        }
    }

    /// Display label shown next to the opponent's seat.
    pub fn label(self) -> &'static str {
        match self {
            Self::Human => "Player 2",
            Self::Bot(BotTier::Easy) => "Easy Bot",
            Self::Bot(BotTier::Medium) => "Medium Bot",
            Self::Bot(BotTier::Hard) => "Hard Bot",
        }
    }
}

/// One of the two seats in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    /// Player 1, always human, moves first.
    One,
    /// Player 2, human or bot.
    Two,
}

impl PlayerId {
    /// Returns the other seat.
    pub fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Seat number as the engine expects it (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Outcome in which this seat wins.
    pub fn winning_outcome(self) -> Outcome {
        match self {
            Self::One => Outcome::Player1Win,
            Self::Two => Outcome::Player2Win,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Match lifecycle phase. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the opponent to be chosen.
    AwaitingOpponentSelection,
    /// Moves are being played.
    InProgress,
    /// Outcome fixed; no more moves.
    Terminal,
}

/// A letter piece in the dual-letter game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum Letter {
    /// The letter `T`.
    T,
    /// The letter `O`.
    O,
}

impl Letter {
    /// The letter as a char.
    pub fn as_char(self) -> char {
        match self {
            Self::T => 'T',
            Self::O => 'O',
        }
    }
}

/// One of the two target words of the dual-letter game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Word {
    /// `TOOT`, reported by the engine as code 1.
    First,
    /// `OTTO`, reported by the engine as code 2.
    Second,
}

impl Word {
    /// Spelling of the word.
    pub fn spelling(self) -> &'static str {
        match self {
            Self::First => "TOOT",
            Self::Second => "OTTO",
        }
    }

    /// The other word.
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Which word each player is trying to spell.
///
/// Player 1 starts with [`Word::First`]. Only the match controller swaps
/// it, and only before the first accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhraseAssignment {
    player_one: Word,
}

impl PhraseAssignment {
    /// Player 1 on the first word, player 2 on the second.
    pub fn new() -> Self {
        Self {
            player_one: Word::First,
        }
    }

    /// Word owned by `player`.
    pub fn word_of(&self, player: PlayerId) -> Word {
        match player {
            PlayerId::One => self.player_one,
            PlayerId::Two => self.player_one.other(),
        }
    }

    /// Player currently owning `word`.
    pub fn owner_of(&self, word: Word) -> PlayerId {
        if self.player_one == word {
            PlayerId::One
        } else {
            PlayerId::Two
        }
    }

    /// Exchanges the two words.
    #[instrument]
    pub(crate) fn swap(&mut self) {
        self.player_one = self.player_one.other();
    }
}

impl Default for PhraseAssignment {
    fn default() -> Self {
        Self::new()
    }
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player 1 completed a line or word.
    Player1Win,
    /// Player 2 completed a line or word.
    Player2Win,
    /// Both words appeared at once.
    Tie,
    /// The match ended without a result (engine inconsistency).
    NoWinner,
}

impl Outcome {
    /// Winning seat, if any.
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            Self::Player1Win => Some(PlayerId::One),
            Self::Player2Win => Some(PlayerId::Two),
            Self::Tie | Self::NoWinner => None,
        }
    }

    /// Message shown to the user when the match ends.
    pub fn announcement(self) -> String {
        match self {
            Self::Player1Win => format!("{} has won!", PlayerId::One),
            Self::Player2Win => format!("{} has won!", PlayerId::Two),
            Self::Tie => "There was a tie!".to_string(),
            Self::NoWinner => "No winner...".to_string(),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player1Win => write!(f, "Player 1 wins"),
            Self::Player2Win => write!(f, "Player 2 wins"),
            Self::Tie => write!(f, "Tie"),
            Self::NoWinner => write!(f, "No winner"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_table() {
        assert_eq!(GameKind::FourInRow.columns(), 7);
        assert_eq!(GameKind::DualLetter.columns(), 6);
        assert!(GameKind::DualLetter.has_column(6));
        assert!(!GameKind::DualLetter.has_column(7));
        assert!(!GameKind::FourInRow.has_column(0));
    }

    #[test]
    fn test_phrase_swap_moves_both_words() {
        let mut phrases = PhraseAssignment::new();
        assert_eq!(phrases.owner_of(Word::First), PlayerId::One);
        phrases.swap();
        assert_eq!(phrases.word_of(PlayerId::One), Word::Second);
        assert_eq!(phrases.owner_of(Word::First), PlayerId::Two);
    }

    #[test]
    fn test_game_kind_parses_from_cli_text() {
        assert_eq!("four_in_row".parse::<GameKind>().unwrap(), GameKind::FourInRow);
        assert_eq!("hard".parse::<BotTier>().unwrap(), BotTier::Hard);
    }
}
