//! Turns the engine's raw win signal into a match outcome.

use tracing::{debug, instrument};

use crate::{LineSignal, Outcome, PhraseAssignment, PlayerId, Word};

/// Raw signal read from the engine after an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinSignal {
    /// Four-in-row: whether the move completed a line.
    Line(bool),
    /// Dual-letter: which word, if any, the move completed.
    Letters(LineSignal),
}

/// Classifies `signal` for the move just played by `mover`.
///
/// Returns `None` while the match has no decision yet. Dual-letter word
/// signals resolve through `phrases`, which is frozen from the first move
/// on, so the owner of a word never changes mid-match.
#[instrument]
pub fn classify(signal: WinSignal, mover: PlayerId, phrases: &PhraseAssignment) -> Option<Outcome> {
    let outcome = match signal {
        WinSignal::Line(true) => Some(mover.winning_outcome()),
        WinSignal::Line(false) => None,
        WinSignal::Letters(LineSignal::Nothing) => None,
        WinSignal::Letters(LineSignal::Tie) => Some(Outcome::Tie),
        WinSignal::Letters(LineSignal::FirstWord) => {
            Some(phrases.owner_of(Word::First).winning_outcome())
        }
        WinSignal::Letters(LineSignal::SecondWord) => {
            Some(phrases.owner_of(Word::Second).winning_outcome())
        }
    };
    debug!(?outcome, "Classified win signal");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swapped() -> PhraseAssignment {
        let mut phrases = PhraseAssignment::new();
        phrases.swap();
        phrases
    }

    #[test]
    fn test_line_win_goes_to_mover() {
        let phrases = PhraseAssignment::new();
        assert_eq!(
            classify(WinSignal::Line(true), PlayerId::Two, &phrases),
            Some(Outcome::Player2Win)
        );
        assert_eq!(classify(WinSignal::Line(false), PlayerId::One, &phrases), None);
    }

    #[test]
    fn test_first_word_goes_to_its_owner_not_the_mover() {
        assert_eq!(
            classify(
                WinSignal::Letters(LineSignal::FirstWord),
                PlayerId::One,
                &swapped()
            ),
            Some(Outcome::Player2Win)
        );
        assert_eq!(
            classify(
                WinSignal::Letters(LineSignal::SecondWord),
                PlayerId::Two,
                &swapped()
            ),
            Some(Outcome::Player1Win)
        );
    }

    #[test]
    fn test_tie_ignores_assignment_and_mover() {
        for phrases in [PhraseAssignment::new(), swapped()] {
            for mover in [PlayerId::One, PlayerId::Two] {
                assert_eq!(
                    classify(WinSignal::Letters(LineSignal::Tie), mover, &phrases),
                    Some(Outcome::Tie)
                );
            }
        }
    }

    #[test]
    fn test_nothing_is_undecided() {
        assert_eq!(
            classify(
                WinSignal::Letters(LineSignal::Nothing),
                PlayerId::One,
                &PhraseAssignment::new()
            ),
            None
        );
    }
}
