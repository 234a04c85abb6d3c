//! Board representation and game rules of the forced-capture variant.
//!
//! Every available capture is mandatory, and a side with no legal move
//! wins. Kings are ordinary capturable pieces; there is no check, no
//! checkmate and no castling.
//!
//! # Example
//! ```
//! use antichess_engine::board::Position;
//!
//! let position = Position::classical();
//! let moves = position.generate_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod draw;
mod error;
pub mod layout;
mod movegen;
mod notation;
mod san;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use draw::DrawReason;
pub use error::{
    LayoutError, MoveCodecError, MoveTextError, NotationError, PlayError, SquareError,
};
pub use movegen::{MoveRules, MoveSet};
pub use state::Position;
pub use types::{Color, Move, MoveList, Piece, Square};

pub(crate) use types::PROMOTION_PIECES;
