use once_cell::sync::Lazy;

use super::MoveAccumulator;
use crate::board::{Move, Position, Square};

/// Knight target squares per origin, built once on first use.
static KNIGHT_TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    std::array::from_fn(|idx| {
        let sq = Square::from_index(idx);
        let r = sq.rank() as isize;
        let f = sq.file() as isize;
        let jumps = [
            (2, 1),
            (2, -1),
            (-2, 1),
            (-2, -1),
            (1, 2),
            (1, -2),
            (-1, 2),
            (-1, -2),
        ];
        jumps
            .iter()
            .filter_map(|(dr, df)| {
                let (tr, tf) = (r + dr, f + df);
                if (0..8).contains(&tr) && (0..8).contains(&tf) {
                    Some(Square(tr as usize, tf as usize))
                } else {
                    None
                }
            })
            .collect()
    })
});

impl Position {
    pub(crate) fn knight_moves(&self, from: Square, acc: &mut MoveAccumulator) {
        let color = self.side_to_move();
        for &to in &KNIGHT_TARGETS[from.as_index()] {
            match self.piece_at(to) {
                None => acc.push(Move::new(from, to), false),
                Some((target_color, _)) if target_color != color => {
                    acc.push(Move::new(from, to), true);
                }
                Some(_) => {}
            }
        }
    }
}
