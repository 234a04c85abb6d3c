//! Search configuration and level presets.

use crate::board::MoveRules;

/// Material values used by the static valuation. Values count against
/// their owner: shedding material moves a side toward the win.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceValues {
    pub pawn: i32,
    /// A pawn that has left its starting rank, when the active-pawns
    /// rule is on
    pub active_pawn: i32,
    pub rook: i32,
    pub knight: i32,
    pub bishop: i32,
    pub queen: i32,
    pub king: i32,
}

impl Default for PieceValues {
    fn default() -> Self {
        PieceValues {
            pawn: 100,
            active_pawn: 160,
            rook: 500,
            knight: 300,
            bishop: 300,
            queen: 900,
            king: 400,
        }
    }
}

impl PieceValues {
    pub(crate) fn value_of(&self, piece: crate::board::Piece, active_pawn: bool) -> i32 {
        use crate::board::Piece;
        match piece {
            Piece::Pawn => {
                if active_pawn {
                    self.active_pawn
                } else {
                    self.pawn
                }
            }
            Piece::Rook => self.rook,
            Piece::Knight => self.knight,
            Piece::Bishop => self.bishop,
            Piece::Queen => self.queen,
            Piece::King => self.king,
        }
    }
}

/// Immutable-per-search bag of heuristic toggles and numeric limits.
///
/// Build one directly, or map a named level 1..=20 to a preset with
/// [`SearchConfig::from_level`]. The RNG seed makes every randomized
/// choice (move shuffling, handicap sampling, tie-breaking, oyster
/// picks) reproducible.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Iterative-deepening depth ceiling in plies
    pub max_depth: u32,
    /// Node budget governing when deepening stops
    pub node_budget: u64,
    /// Keep deepening until the budget is actually met, instead of
    /// stopping when the projection for the next depth exceeds it
    pub whole_budget: bool,
    /// Return a single legal move immediately, without scoring
    pub skip_forced_move: bool,
    /// Play a uniformly random legal move with no search at all
    pub oyster: bool,
    /// Shuffle generated move lists to avoid deterministic bias at tied
    /// valuations
    pub randomize: bool,
    /// Percentage of surplus candidate moves to discard at own nodes
    pub handicap_percent: u32,
    /// Prune own moves that leave the opponent more replies than the
    /// observed minimum
    pub minimize_liberty: bool,
    /// Floor below which liberty minimization never constrains the
    /// opponent's reply count
    pub reply_floor: usize,
    /// Average opponent replies, falling back to worst-case when a
    /// losing line appears; off means plain minimax
    pub pessimistic: bool,
    /// Prefer the shortest known winning (or losing) sequence
    pub accelerated_endgame: bool,
    /// Filter root moves by opportunity tag
    pub opportunistic: bool,
    /// Break deep-valuation ties with the static valuation
    pub best_static: bool,
    /// Promote to queen only
    pub force_queen: bool,
    /// Generate en-passant captures
    pub en_passant: bool,
    /// Revalue pawns that have left their starting rank
    pub active_pawns: bool,
    pub values: PieceValues,
    /// Seed for the injected pseudo-random generator
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 5,
            node_budget: 20_000,
            whole_budget: false,
            skip_forced_move: true,
            oyster: false,
            randomize: true,
            handicap_percent: 0,
            minimize_liberty: true,
            reply_floor: 2,
            pessimistic: true,
            accelerated_endgame: true,
            opportunistic: true,
            best_static: true,
            force_queen: false,
            en_passant: true,
            active_pawns: true,
            values: PieceValues::default(),
            seed: 0x5EED,
        }
    }
}

impl SearchConfig {
    /// Deterministic preset for a named level 1..=20 (clamped).
    ///
    /// Level 1 is the oyster: a deliberately unbeatable-to-lose-against
    /// random mover. Handicap fades out and depth, budget and the
    /// heuristic set grow as levels rise; the top levels explore the
    /// whole node budget.
    #[must_use]
    pub fn from_level(level: u32) -> SearchConfig {
        let level = level.clamp(1, 20);
        let mut config = SearchConfig {
            oyster: level == 1,
            minimize_liberty: level >= 6,
            opportunistic: level >= 8,
            best_static: level >= 9,
            accelerated_endgame: level >= 10,
            pessimistic: level >= 12,
            whole_budget: level >= 19,
            active_pawns: level >= 7,
            ..SearchConfig::default()
        };
        let (max_depth, node_budget, handicap_percent) = match level {
            1 => (0, 0, 0),
            2 => (1, 100, 80),
            3 => (2, 400, 60),
            4 => (2, 1_000, 40),
            5 => (3, 2_500, 30),
            6 => (3, 5_000, 20),
            7 => (4, 10_000, 10),
            8 => (4, 15_000, 0),
            9 => (5, 20_000, 0),
            10 => (5, 30_000, 0),
            11 => (6, 50_000, 0),
            12 => (6, 75_000, 0),
            13 => (7, 100_000, 0),
            14 => (8, 200_000, 0),
            15 => (9, 400_000, 0),
            16 => (10, 800_000, 0),
            17 => (11, 1_500_000, 0),
            18 => (12, 3_000_000, 0),
            19 => (14, 6_000_000, 0),
            _ => (16, 10_000_000, 0),
        };
        config.max_depth = max_depth;
        config.node_budget = node_budget;
        config.handicap_percent = handicap_percent;
        config
    }

    /// Movement options implied by this configuration.
    #[must_use]
    pub fn move_rules(&self) -> MoveRules {
        MoveRules {
            en_passant: self.en_passant,
            force_queen: self.force_queen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_deterministic() {
        for level in 1..=20 {
            let a = SearchConfig::from_level(level);
            let b = SearchConfig::from_level(level);
            assert_eq!(a.max_depth, b.max_depth);
            assert_eq!(a.node_budget, b.node_budget);
            assert_eq!(a.handicap_percent, b.handicap_percent);
        }
    }

    #[test]
    fn level_one_is_the_oyster() {
        let config = SearchConfig::from_level(1);
        assert!(config.oyster);
        assert!(!SearchConfig::from_level(2).oyster);
    }

    #[test]
    fn out_of_range_levels_clamp() {
        assert!(SearchConfig::from_level(0).oyster);
        assert_eq!(
            SearchConfig::from_level(99).max_depth,
            SearchConfig::from_level(20).max_depth
        );
    }

    #[test]
    fn budgets_grow_with_level() {
        let mut previous = 0;
        for level in 2..=20 {
            let config = SearchConfig::from_level(level);
            assert!(config.node_budget >= previous, "level {level}");
            previous = config.node_budget;
        }
    }

    #[test]
    fn handicap_fades_out() {
        assert_eq!(SearchConfig::from_level(2).handicap_percent, 80);
        assert_eq!(SearchConfig::from_level(8).handicap_percent, 0);
    }
}
