//! Deterministic start-layout generation.
//!
//! Maps a seed in 1..=960 to a back-rank arrangement: light-square
//! bishop, dark-square bishop, queen, then a fixed permutation table for
//! the remaining {king, rook, rook, knight, knight}. The mapping is
//! bit-exact across implementations; callers rely on the seed numbering,
//! and seed 519 is the classical RNBQKBNR order.

use super::error::LayoutError;
use super::Piece;

pub const SEED_MIN: u32 = 1;
pub const SEED_MAX: u32 = 960;

/// Seed that produces the classical back rank.
pub const CLASSICAL_SEED: u32 = 519;

/// The ten arrangements of {king, rook, rook, knight, knight} with the
/// king between the rooks, indexed by the final seed quotient.
const KRN_TABLE: [[Piece; 5]; 10] = {
    use Piece::{King, Knight, Rook};
    [
        [Knight, Knight, Rook, King, Rook],
        [Knight, Rook, Knight, King, Rook],
        [Knight, Rook, King, Knight, Rook],
        [Knight, Rook, King, Rook, Knight],
        [Rook, Knight, Knight, King, Rook],
        [Rook, Knight, King, Knight, Rook],
        [Rook, Knight, King, Rook, Knight],
        [Rook, King, Knight, Knight, Rook],
        [Rook, King, Knight, Rook, Knight],
        [Rook, King, Rook, Knight, Knight],
    ]
};

/// Generate the back rank for a layout seed.
pub fn back_rank(seed: u32) -> Result<[Piece; 8], LayoutError> {
    if !(SEED_MIN..=SEED_MAX).contains(&seed) {
        return Err(LayoutError::SeedOutOfRange { seed });
    }

    let mut rank: [Option<Piece>; 8] = [None; 8];
    let mut n = seed - 1;

    // Light-square bishop on b, d, f or h.
    rank[(2 * (n % 4) + 1) as usize] = Some(Piece::Bishop);
    n /= 4;

    // Dark-square bishop on a, c, e or g.
    rank[(2 * (n % 4)) as usize] = Some(Piece::Bishop);
    n /= 4;

    // Queen on the n-th free file.
    let queen_slot = n % 6;
    n /= 6;
    let mut free = rank.iter().enumerate().filter(|(_, p)| p.is_none());
    let (queen_file, _) = free
        .nth(queen_slot as usize)
        .expect("six files remain after placing both bishops");
    rank[queen_file] = Some(Piece::Queen);

    // Remaining five files in permutation-table order.
    let pieces = KRN_TABLE[n as usize];
    let mut next = 0;
    for slot in rank.iter_mut() {
        if slot.is_none() {
            *slot = Some(pieces[next]);
            next += 1;
        }
    }

    Ok(rank.map(|p| p.expect("all eight files are filled")))
}

/// The classical RNBQKBNR back rank.
#[must_use]
pub fn classical_back_rank() -> [Piece; 8] {
    back_rank(CLASSICAL_SEED).expect("classical seed is in range")
}
