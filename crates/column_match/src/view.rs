//! Board view: projects match events onto displayable cells and controls.

use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::{GameKind, Letter, MatchEvent, MoverKind, PhraseAssignment, PlayerId};

/// What a cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    /// Four-in-row disc of a player.
    Disc(PlayerId),
    /// Dual-letter tile.
    Tile(Letter),
}

/// Projection of a match onto the screen.
///
/// Holds only what is displayed; every change comes from a [`MatchEvent`].
#[derive(Debug, Clone)]
pub struct BoardView {
    kind: GameKind,
    /// `cells[row - 1][column - 1]`, row 1 at the top.
    cells: Vec<Vec<Option<Piece>>>,
    column_enabled: Vec<bool>,
    highlighted: PlayerId,
    opponent: Option<MoverKind>,
    phrases: Option<PhraseAssignment>,
    letter: Letter,
    opponent_selection_enabled: bool,
    phrase_swap_enabled: bool,
    banner: Option<String>,
}

impl BoardView {
    /// Empty board for `kind`.
    pub fn new(kind: GameKind) -> Self {
        Self {
            kind,
            cells: vec![vec![None; kind.columns()]; kind.rows()],
            column_enabled: vec![true; kind.columns()],
            highlighted: PlayerId::One,
            opponent: None,
            phrases: match kind {
                GameKind::FourInRow => None,
                GameKind::DualLetter => Some(PhraseAssignment::new()),
            },
            letter: Letter::T,
            opponent_selection_enabled: true,
            phrase_swap_enabled: kind == GameKind::DualLetter,
            banner: None,
        }
    }

    /// Updates the projection for one event.
    #[instrument(skip(self))]
    pub fn apply(&mut self, event: &MatchEvent) {
        match *event {
            MatchEvent::OpponentSelected { opponent } => self.opponent = Some(opponent),
            MatchEvent::PhrasesSwapped { phrases } => self.phrases = Some(phrases),
            MatchEvent::LetterSelected { letter } => self.letter = letter,
            MatchEvent::PiecePlaced {
                player,
                row,
                column,
                letter,
            } => {
                let piece = match letter {
                    Some(letter) => Piece::Tile(letter),
                    None => Piece::Disc(player),
                };
                if let Some(cell) = self
                    .cells
                    .get_mut(row.wrapping_sub(1))
                    .and_then(|r| r.get_mut(column.wrapping_sub(1)))
                {
                    *cell = Some(piece);
                }
                if row == 1 {
                    self.set_column(column, false);
                }
                self.opponent_selection_enabled = false;
                self.phrase_swap_enabled = false;
            }
            MatchEvent::ColumnRejected { column } => {
                debug!(column, "Column reported full");
                self.set_column(column, false);
            }
            MatchEvent::TurnPassed { player } => self.highlighted = player,
            MatchEvent::MatchOver { outcome } => {
                self.column_enabled.fill(false);
                self.opponent_selection_enabled = false;
                self.phrase_swap_enabled = false;
                self.banner = Some(outcome.announcement());
            }
            MatchEvent::Restarted { kind } => *self = Self::new(kind),
        }
    }

    /// Applies every event already queued on `events`.
    pub fn drain(&mut self, events: &mut mpsc::UnboundedReceiver<MatchEvent>) {
        while let Ok(event) = events.try_recv() {
            self.apply(&event);
        }
    }

    /// Piece at (`row`, `column`), both 1-based.
    pub fn piece(&self, row: usize, column: usize) -> Option<Piece> {
        self.cells
            .get(row.checked_sub(1)?)?
            .get(column.checked_sub(1)?)
            .copied()
            .flatten()
    }

    /// Whether the input control of `column` accepts clicks.
    pub fn is_column_enabled(&self, column: usize) -> bool {
        column
            .checked_sub(1)
            .and_then(|i| self.column_enabled.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// True once every column input is locked.
    pub fn is_locked(&self) -> bool {
        self.column_enabled.iter().all(|enabled| !enabled)
    }

    /// Whether the opponent choice is still offered.
    pub fn is_opponent_selection_enabled(&self) -> bool {
        self.opponent_selection_enabled
    }

    /// Whether the phrase swap control is usable.
    pub fn is_phrase_swap_enabled(&self) -> bool {
        self.phrase_swap_enabled
    }

    /// Highlighted seat.
    pub fn highlighted(&self) -> PlayerId {
        self.highlighted
    }

    /// Terminal message, once the match is over.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Renders the board as text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.seat_line(PlayerId::One));
        out.push('\n');
        out.push_str(&self.seat_line(PlayerId::Two));
        out.push('\n');

        for row in &self.cells {
            out.push('|');
            for cell in row {
                out.push(match cell {
                    None => '.',
                    Some(Piece::Disc(PlayerId::One)) => 'X',
                    Some(Piece::Disc(PlayerId::Two)) => 'O',
                    Some(Piece::Tile(letter)) => letter.as_char(),
                });
                out.push('|');
            }
            out.push('\n');
        }

        for (i, enabled) in self.column_enabled.iter().enumerate() {
            out.push(' ');
            out.push(if *enabled {
                char::from_digit((i + 1) as u32, 10).unwrap_or('?')
            } else {
                '-'
            });
        }
        out.push('\n');

        if let Some(banner) = &self.banner {
            out.push_str(banner);
            out.push('\n');
        } else if self.kind == GameKind::DualLetter {
            out.push_str(&format!("Letter: {}\n", self.letter));
        }
        out
    }

    fn seat_line(&self, player: PlayerId) -> String {
        let marker = if self.highlighted == player && self.banner.is_none() {
            '>'
        } else {
            ' '
        };
        let name = match player {
            PlayerId::One => "Player 1",
            PlayerId::Two => self.opponent.map_or("Player 2", MoverKind::label),
        };
        match &self.phrases {
            Some(phrases) => format!("{marker} {name}: {}", phrases.word_of(player).spelling()),
            None => format!("{marker} {name}"),
        }
    }

    fn set_column(&mut self, column: usize, enabled: bool) {
        if let Some(slot) = column
            .checked_sub(1)
            .and_then(|i| self.column_enabled.get_mut(i))
        {
            *slot = enabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome;

    #[test]
    fn test_filling_top_row_disables_column() {
        let mut view = BoardView::new(GameKind::FourInRow);
        view.apply(&MatchEvent::PiecePlaced {
            player: PlayerId::Two,
            row: 1,
            column: 3,
            letter: None,
        });
        assert_eq!(view.piece(1, 3), Some(Piece::Disc(PlayerId::Two)));
        assert!(!view.is_column_enabled(3));
        assert!(view.is_column_enabled(4));
    }

    #[test]
    fn test_match_over_locks_everything() {
        let mut view = BoardView::new(GameKind::DualLetter);
        view.apply(&MatchEvent::MatchOver {
            outcome: Outcome::Tie,
        });
        assert!(view.is_locked());
        assert!(!view.is_opponent_selection_enabled());
        assert!(!view.is_phrase_swap_enabled());
        assert_eq!(view.banner(), Some("There was a tie!"));
    }

    #[test]
    fn test_render_shows_letters_and_phrases() {
        let mut view = BoardView::new(GameKind::DualLetter);
        view.apply(&MatchEvent::PiecePlaced {
            player: PlayerId::One,
            row: 4,
            column: 1,
            letter: Some(Letter::O),
        });
        let text = view.render();
        assert!(text.contains("Player 1: TOOT"));
        assert!(text.contains("|O|.|.|.|.|.|"));
    }

    #[test]
    fn test_restart_clears_board() {
        let mut view = BoardView::new(GameKind::FourInRow);
        view.apply(&MatchEvent::PiecePlaced {
            player: PlayerId::One,
            row: 6,
            column: 1,
            letter: None,
        });
        assert!(!view.is_opponent_selection_enabled());
        view.apply(&MatchEvent::Restarted {
            kind: GameKind::FourInRow,
        });
        assert_eq!(view.piece(6, 1), None);
        assert!(view.is_opponent_selection_enabled());
    }
}
