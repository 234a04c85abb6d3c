use super::MoveAccumulator;
use crate::board::{Move, Position, Square};

/// Type of sliding piece for move generation
#[derive(Clone, Copy)]
pub(crate) enum SliderType {
    Bishop,
    Rook,
    Queen,
}

impl SliderType {
    fn directions(self) -> &'static [(isize, isize)] {
        const DIAGONAL: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
        const STRAIGHT: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        const ALL: [(isize, isize); 8] = [
            (1, 1),
            (1, -1),
            (-1, 1),
            (-1, -1),
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
        ];
        match self {
            SliderType::Bishop => &DIAGONAL,
            SliderType::Rook => &STRAIGHT,
            SliderType::Queen => &ALL,
        }
    }
}

impl Position {
    /// Walk each ray until the first occupied cell, capturing it if
    /// hostile.
    pub(crate) fn slider_moves(&self, from: Square, slider: SliderType, acc: &mut MoveAccumulator) {
        let color = self.side_to_move();
        for &(dr, df) in slider.directions() {
            let mut r = from.rank() as isize + dr;
            let mut f = from.file() as isize + df;
            while (0..8).contains(&r) && (0..8).contains(&f) {
                let to = Square(r as usize, f as usize);
                match self.piece_at(to) {
                    None => acc.push(Move::new(from, to), false),
                    Some((target_color, _)) => {
                        if target_color != color {
                            acc.push(Move::new(from, to), true);
                        }
                        break;
                    }
                }
                r += dr;
                f += df;
            }
        }
    }
}
