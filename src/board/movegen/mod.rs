//! Legal move generation under forced-capture rules.
//!
//! Per-piece generators feed a shared accumulator that enforces the
//! mandatory-capture invariant: the first capture found discards every
//! quiet move collected so far, and only captures are kept from then
//! on. The final set is therefore exactly "all captures" when any
//! capture exists, else "all non-captures", regardless of scan order.
//!
//! An empty set means the side to move has won: with no legal move,
//! that side is the winner in this variant.

mod kings;
mod knights;
mod pawns;
mod sliders;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{Move, MoveList, Piece, Position};

pub(crate) use sliders::SliderType;

/// Movement options that vary with the search configuration.
#[derive(Clone, Copy, Debug)]
pub struct MoveRules {
    /// Generate en-passant captures
    pub en_passant: bool,
    /// Restrict promotion to the queen instead of fanning out over
    /// queen, rook, knight, bishop and king
    pub force_queen: bool,
}

impl Default for MoveRules {
    fn default() -> Self {
        MoveRules {
            en_passant: true,
            force_queen: false,
        }
    }
}

/// The generated move set plus whether it is capture-mandated.
#[derive(Clone, Debug)]
pub struct MoveSet {
    pub moves: MoveList,
    /// True when the set consists of mandatory captures
    pub captures: bool,
}

impl MoveSet {
    /// Fisher–Yates shuffle of the move order, used by randomized
    /// search to avoid deterministic bias at tied valuations.
    pub(crate) fn shuffle(&mut self, rng: &mut StdRng) {
        self.moves.as_mut_slice().shuffle(rng);
    }
}

/// Accumulator enforcing the mandatory-capture invariant.
pub(crate) struct MoveAccumulator {
    moves: MoveList,
    captures_only: bool,
}

impl MoveAccumulator {
    fn new() -> Self {
        MoveAccumulator {
            moves: MoveList::new(),
            captures_only: false,
        }
    }

    pub(crate) fn push(&mut self, mv: Move, capture: bool) {
        if capture {
            if !self.captures_only {
                self.moves.clear();
                self.captures_only = true;
            }
            self.moves.push(mv);
        } else if !self.captures_only {
            self.moves.push(mv);
        }
    }

    fn finish(self) -> MoveSet {
        MoveSet {
            captures: self.captures_only && !self.moves.is_empty(),
            moves: self.moves,
        }
    }
}

impl Position {
    /// Generate the complete legal move set for the side to move.
    #[must_use]
    pub fn legal_moves(&self, rules: &MoveRules) -> MoveSet {
        let mut acc = MoveAccumulator::new();
        let side = self.side_to_move();
        for (sq, color, piece) in self.occupied() {
            if color != side {
                continue;
            }
            match piece {
                Piece::Pawn => self.pawn_moves(sq, rules, &mut acc),
                Piece::Knight => self.knight_moves(sq, &mut acc),
                Piece::King => self.king_moves(sq, &mut acc),
                Piece::Bishop => self.slider_moves(sq, SliderType::Bishop, &mut acc),
                Piece::Rook => self.slider_moves(sq, SliderType::Rook, &mut acc),
                Piece::Queen => self.slider_moves(sq, SliderType::Queen, &mut acc),
            }
        }
        acc.finish()
    }

    /// Generate legal moves under the default rules.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        self.legal_moves(&MoveRules::default()).moves
    }

    /// True when the side to move has at least one legal move.
    #[must_use]
    pub fn has_legal_move(&self) -> bool {
        !self.generate_moves().is_empty()
    }
}
