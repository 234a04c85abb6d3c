//! Game façade for external collaborators.
//!
//! The remote-protocol adapter, renderers and tournament drivers all
//! consume the engine through this surface: load or emit a position,
//! apply moves, request the engine's choice, and query the game state.
//! Fallible inputs leave the game untouched on error. The tree of the
//! last search stays alive until the next search or an explicit
//! [`Game::release_search`]; callers hosting many concurrent games must
//! release it between moves to bound memory.

use log::debug;

use crate::board::{
    Color, DrawReason, LayoutError, Move, NotationError, Piece, PlayError, Position,
    PROMOTION_PIECES,
};
use crate::search::{find_best_move, DepthCallback, SearchConfig, SearchTree};

/// One game of the forced-capture variant: a position, the active
/// search configuration, the move history and the last search tree.
pub struct Game {
    position: Position,
    config: SearchConfig,
    history: Vec<Move>,
    /// Placement+side keys of every position seen, for the repetition
    /// rule
    placement_history: Vec<String>,
    last_move: Option<Move>,
    last_move_text: Option<String>,
    last_valuation: i32,
    last_tree: Option<SearchTree>,
}

impl Game {
    /// A new game from the classical starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Position::classical(), SearchConfig::default())
    }

    /// A new game at a named engine level 1..=20.
    #[must_use]
    pub fn with_level(level: u32) -> Self {
        Self::from_position(Position::classical(), SearchConfig::from_level(level))
    }

    /// A new game from a start-layout seed in 1..=960. Seed 519 gives
    /// the classical arrangement.
    pub fn from_seed(seed: u32) -> Result<Self, LayoutError> {
        Ok(Self::from_position(
            Position::from_seed(seed)?,
            SearchConfig::default(),
        ))
    }

    fn from_position(position: Position, config: SearchConfig) -> Self {
        let placement_history = vec![position.placement_key()];
        Game {
            position,
            config,
            history: Vec::new(),
            placement_history,
            last_move: None,
            last_move_text: None,
            last_valuation: 0,
            last_tree: None,
        }
    }

    /// Replace the position from a notation string, resetting history
    /// and the search tree.
    ///
    /// On failure the previous game state is left untouched.
    pub fn load_notation(&mut self, notation: &str) -> Result<(), NotationError> {
        let position = Position::try_from_notation(notation)?;
        debug!("loaded position {}", position.to_notation());
        self.placement_history = vec![position.placement_key()];
        self.position = position;
        self.history.clear();
        self.last_move = None;
        self.last_move_text = None;
        self.last_valuation = 0;
        self.last_tree = None;
        Ok(())
    }

    /// Render the current position in the native 4-field notation.
    #[must_use]
    pub fn to_notation(&self) -> String {
        self.position.to_notation()
    }

    /// The current position.
    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The active search configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replace the search configuration.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Switch to the preset of a named level 1..=20.
    pub fn set_level(&mut self, level: u32) {
        self.config = SearchConfig::from_level(level);
    }

    /// Apply a move from its canonical integer encoding, validating
    /// legality. The game is untouched on error.
    pub fn play_encoded(&mut self, encoded: u32) -> Result<Move, PlayError> {
        let mv = Move::try_from_encoded(encoded)?;
        self.play_move(mv)?;
        Ok(mv)
    }

    /// Apply a move, validating it against the legal move set. The game
    /// is untouched on error.
    pub fn play_move(&mut self, mv: Move) -> Result<(), PlayError> {
        if self.position.pending_promotion().is_some() {
            return Err(PlayError::PromotionPending);
        }
        let legal = self.position.legal_moves(&self.config.move_rules()).moves;
        if !legal.contains(mv) {
            return Err(PlayError::Illegal { mv: mv.to_string() });
        }
        self.commit(mv);
        Ok(())
    }

    /// Apply a textual move descriptor ("Nxa3", "bxa3", "a8=Q",
    /// "b2a3"). Parsing matches against the legal move set, so an
    /// illegal move fails without mutating anything.
    pub fn play_text(&mut self, text: &str) -> Result<Move, PlayError> {
        if self.position.pending_promotion().is_some() {
            return Err(PlayError::PromotionPending);
        }
        let mv = self
            .position
            .parse_move_text(text, &self.config.move_rules())?;
        self.commit(mv);
        Ok(mv)
    }

    /// Apply a move without legality validation, for trusted input such
    /// as replaying a recorded game.
    pub fn force_move(&mut self, mv: Move) {
        self.commit(mv);
    }

    fn commit(&mut self, mv: Move) {
        let text = self.position.move_to_text(mv);
        self.position.apply_move(mv);
        self.history.push(mv);
        self.placement_history.push(self.position.placement_key());
        self.last_move = Some(mv);
        self.last_move_text = Some(text);
    }

    /// Resolve a pending promotion left by a bare last-rank pawn move.
    pub fn resolve_promotion(&mut self, piece: Piece) -> Result<(), PlayError> {
        if !PROMOTION_PIECES.contains(&piece)
            || (self.config.force_queen && piece != Piece::Queen)
        {
            return Err(PlayError::InvalidPromotion {
                piece: piece.to_char(),
            });
        }
        if !self.position.set_promotion(piece) {
            return Err(PlayError::NoPendingPromotion);
        }
        // The entries recorded at commit time still show the
        // unpromoted pawn.
        if let Some(last) = self.placement_history.last_mut() {
            *last = self.position.placement_key();
        }
        if let (Some(last_mv), Some(entry)) = (self.last_move, self.history.last_mut()) {
            let resolved = Move::promoting(last_mv.from(), last_mv.to(), piece);
            *entry = resolved;
            self.last_move = Some(resolved);
        }
        if let Some(text) = self.last_move_text.as_mut() {
            text.push('=');
            text.push(piece.to_char().to_ascii_uppercase());
        }
        Ok(())
    }

    /// Run the engine for the side to move under the active
    /// configuration and return its chosen move, without applying it.
    ///
    /// Returns `None` when the side to move has no legal move (it has
    /// already won), or while a promotion is pending. The previous
    /// search tree is released before the new search starts; the new
    /// tree stays available through [`Game::search_tree`].
    pub fn engine_move(&mut self) -> Option<Move> {
        self.engine_move_observed(None)
    }

    /// [`Game::engine_move`] with a per-depth progress callback.
    /// Observing a search must not change its outcome.
    pub fn engine_move_observed(&mut self, callback: Option<DepthCallback<'_>>) -> Option<Move> {
        if self.position.pending_promotion().is_some() {
            return None;
        }
        self.last_tree = None;
        let result = find_best_move(&self.position, &self.config, callback);
        debug!(
            "engine chose {:?} at depth {} ({} nodes, valuation {})",
            result.best, result.depth, result.nodes, result.valuation
        );
        self.last_valuation = result.valuation;
        let best = result.best;
        self.last_tree = Some(result.tree);
        best
    }

    /// Run the engine and apply its chosen move. Returns the move, or
    /// `None` when the side to move has already won.
    pub fn play_engine_move(&mut self) -> Option<Move> {
        let mv = self.engine_move()?;
        self.commit(mv);
        Some(mv)
    }

    /// Release all memory held by the last search.
    pub fn release_search(&mut self) {
        self.last_tree = None;
    }

    /// The tree of the last search, until it is released.
    #[must_use]
    pub fn search_tree(&self) -> Option<&SearchTree> {
        self.last_tree.as_ref()
    }

    /// The side to move.
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// True when the side to move has no legal move, which ends the
    /// game in that side's favor.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.legal_move_count() == 0
    }

    /// Game-over check for a chosen side, as if it were that side's
    /// turn.
    #[must_use]
    pub fn is_game_over_for(&self, side: Color) -> bool {
        let mut hypothetical = self.position.clone();
        hypothetical.white_to_move = side == Color::White;
        hypothetical
            .legal_moves(&self.config.move_rules())
            .moves
            .is_empty()
    }

    /// The winner, if any: the side to move once it has no legal move.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        if self.is_game_over() {
            Some(self.position.side_to_move())
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.draw_reason().is_some()
    }

    /// Why the game is drawn, if it is.
    #[must_use]
    pub fn draw_reason(&self) -> Option<DrawReason> {
        self.position.draw_reason(&self.placement_history)
    }

    /// The last applied move, if any.
    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Text of the last applied move, formatted before it was applied.
    #[must_use]
    pub fn last_move_text(&self) -> Option<&str> {
        self.last_move_text.as_deref()
    }

    /// Deep valuation reported by the last search.
    #[must_use]
    pub fn last_valuation(&self) -> i32 {
        self.last_valuation
    }

    /// The move history as canonical integer encodings.
    #[must_use]
    pub fn encoded_history(&self) -> Vec<u32> {
        self.history.iter().map(|mv| mv.encoded()).collect()
    }

    fn legal_move_count(&self) -> usize {
        self.position
            .legal_moves(&self.config.move_rules())
            .moves
            .len()
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    #[test]
    fn failed_load_leaves_the_game_untouched() {
        let mut game = Game::new();
        game.play_text("e4").unwrap();
        let notation = game.to_notation();
        let history = game.encoded_history();

        assert!(game.load_notation("rnbqkbnr/ppppxppp w - 0").is_err());
        assert_eq!(game.to_notation(), notation);
        assert_eq!(game.encoded_history(), history);
        assert!(game.last_move().is_some());
    }

    #[test]
    fn illegal_move_leaves_the_game_untouched() {
        let mut game = Game::new();
        let notation = game.to_notation();
        // e2e5 is not a legal pawn move.
        let err = game.play_move(Move::new(Square(1, 4), Square(4, 4)));
        assert!(matches!(err, Err(PlayError::Illegal { .. })));
        assert_eq!(game.to_notation(), notation);
        assert!(game.encoded_history().is_empty());
    }

    #[test]
    fn pending_promotion_blocks_play_until_resolved() {
        let mut game = Game::new();
        game.load_notation("7k/P7/8/8/8/8/8/7K w - 0").unwrap();
        game.force_move(Move::new(Square(6, 0), Square(7, 0)));
        assert!(game.position().pending_promotion().is_some());

        let err = game.play_text("Kg7");
        assert!(matches!(err, Err(PlayError::PromotionPending)));
        assert!(game.engine_move().is_none());

        assert!(matches!(
            game.resolve_promotion(Piece::Pawn),
            Err(PlayError::InvalidPromotion { .. })
        ));
        game.resolve_promotion(Piece::Queen).unwrap();
        assert_eq!(
            game.position().piece_at(Square(7, 0)),
            Some((Color::White, Piece::Queen))
        );
        // History now carries the resolved promotion encoding.
        assert_eq!(
            game.encoded_history(),
            vec![Move::promoting(Square(6, 0), Square(7, 0), Piece::Queen).encoded()]
        );
        assert_eq!(game.last_move_text(), Some("a8=Q"));
        assert!(matches!(
            game.resolve_promotion(Piece::Queen),
            Err(PlayError::NoPendingPromotion)
        ));
    }

    #[test]
    fn promotion_resolution_fixes_the_repetition_key() {
        let mut game = Game::new();
        game.load_notation("7k/P7/8/8/8/8/8/7K w - 0").unwrap();
        game.force_move(Move::new(Square(6, 0), Square(7, 0)));
        game.resolve_promotion(Piece::Rook).unwrap();
        let key = game.placement_history.last().unwrap();
        assert!(key.starts_with("R6k/"), "key was {key}");
    }

    #[test]
    fn force_queen_config_restricts_resolution() {
        let mut game = Game::new();
        let config = SearchConfig {
            force_queen: true,
            ..SearchConfig::default()
        };
        game.set_config(config);
        game.load_notation("7k/P7/8/8/8/8/8/7K w - 0").unwrap();
        game.force_move(Move::new(Square(6, 0), Square(7, 0)));
        assert!(matches!(
            game.resolve_promotion(Piece::Rook),
            Err(PlayError::InvalidPromotion { .. })
        ));
        game.resolve_promotion(Piece::Queen).unwrap();
    }
}
