//! Draw detection.

use std::fmt;

use super::{Color, Piece, Position, Square};

/// Why a position is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    /// Halfmove clock reached 50
    HalfmoveClock,
    /// The placement+side key occurred three times
    ThreefoldRepetition,
    /// Each side is down to a single bishop, on opposite shades: with
    /// captures impossible, the forced-capture game cannot progress
    OppositeBishops,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::HalfmoveClock => write!(f, "Halfmove clock"),
            DrawReason::ThreefoldRepetition => write!(f, "Threefold repetition"),
            DrawReason::OppositeBishops => write!(f, "Opposite-colored lone bishops"),
        }
    }
}

impl Position {
    /// Check the draw rules against this position and the history of
    /// placement keys (including this position's own key).
    #[must_use]
    pub fn draw_reason(&self, placement_history: &[String]) -> Option<DrawReason> {
        if self.halfmove_clock >= 50 {
            return Some(DrawReason::HalfmoveClock);
        }

        let key = self.placement_key();
        if placement_history.iter().filter(|k| **k == key).count() >= 3 {
            return Some(DrawReason::ThreefoldRepetition);
        }

        if self.is_opposite_bishop_endgame() {
            return Some(DrawReason::OppositeBishops);
        }

        None
    }

    fn is_opposite_bishop_endgame(&self) -> bool {
        let mut bishops: [Option<Square>; 2] = [None, None];
        let mut counts = [0usize; 2];
        for (sq, color, piece) in self.occupied() {
            counts[color.index()] += 1;
            if piece == Piece::Bishop {
                bishops[color.index()] = Some(sq);
            }
        }
        if counts != [1, 1] {
            return false;
        }
        match (bishops[Color::White.index()], bishops[Color::Black.index()]) {
            (Some(white), Some(black)) => white.is_light() != black.is_light(),
            _ => false,
        }
    }
}
