//! Rank-based position notation.
//!
//! The native form has four fields: piece placement (ranks 8 down to 1),
//! side to move, en-passant target and halfmove clock, e.g.
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - 0`. Full FEN input
//! is also accepted; the castling field is skipped since the variant has
//! no castling. The en-passant field may be a square, a bare file
//! letter, or `-`.

use std::str::FromStr;

use super::error::NotationError;
use super::{Color, Piece, Position, Square};

impl Position {
    /// Parse a position from notation.
    ///
    /// Returns an error if the string is malformed; no partial state
    /// escapes a failed parse.
    pub fn try_from_notation(notation: &str) -> Result<Self, NotationError> {
        let parts: Vec<&str> = notation.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(NotationError::TooFewParts { found: parts.len() });
        }

        let mut position = Position::empty();

        for (rank_idx, rank_str) in parts[0].split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(NotationError::InvalidRank { rank: rank_idx });
            }
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let color = if c.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let piece =
                        Piece::from_char(c).ok_or(NotationError::InvalidPiece { char: c })?;
                    if file >= 8 {
                        return Err(NotationError::TooManyFiles {
                            rank: rank_idx,
                            files: file + 1,
                        });
                    }
                    position.set_piece(Square(7 - rank_idx, file), color, piece);
                    file += 1;
                }
            }
        }

        position.white_to_move = match parts[1] {
            "w" => true,
            "b" => false,
            other => {
                return Err(NotationError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        // Six or more parts means full FEN layout with a castling field
        // to skip; otherwise the native 4-field layout.
        let (ep_idx, clock_idx) = if parts.len() >= 6 { (3, 4) } else { (2, 3) };

        if let Some(&field) = parts.get(ep_idx) {
            position.en_passant_target = parse_en_passant(field, position.side_to_move())?;
        }
        if let Some(&field) = parts.get(clock_idx) {
            position.halfmove_clock = parse_clock(field)?;
        }

        Ok(position)
    }

    /// Render the position in the native 4-field notation.
    #[must_use]
    pub fn to_notation(&self) -> String {
        let side = if self.white_to_move { "w" } else { "b" };
        let ep = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        format!(
            "{} {} {} {}",
            self.placement_string(),
            side,
            ep,
            self.halfmove_clock
        )
    }

    /// The piece-placement plus side-to-move prefix of the notation,
    /// used as the repetition key for draw detection.
    #[must_use]
    pub fn placement_key(&self) -> String {
        let side = if self.white_to_move { "w" } else { "b" };
        format!("{} {}", self.placement_string(), side)
    }

    fn placement_string(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some((color, piece)) = self.piece_at(Square(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_notation_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }
        rows.join("/")
    }
}

fn parse_en_passant(field: &str, side_to_move: Color) -> Result<Option<Square>, NotationError> {
    if field == "-" {
        return Ok(None);
    }
    let chars: Vec<char> = field.chars().collect();
    match chars.as_slice() {
        // Bare file letter: the target rank follows from the side that
        // just double-pushed.
        [file @ 'a'..='h'] => {
            let rank = if side_to_move == Color::White { 5 } else { 2 };
            Ok(Some(Square(rank, *file as usize - 'a' as usize)))
        }
        ['a'..='h', '1'..='8'] => Ok(Some(field.parse::<Square>().map_err(|_| {
            NotationError::InvalidEnPassant {
                found: field.to_string(),
            }
        })?)),
        _ => Err(NotationError::InvalidEnPassant {
            found: field.to_string(),
        }),
    }
}

fn parse_clock(field: &str) -> Result<u32, NotationError> {
    if field == "-" {
        return Ok(0);
    }
    field.parse().map_err(|_| NotationError::InvalidClock {
        found: field.to_string(),
    })
}

impl FromStr for Position {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::try_from_notation(s)
    }
}
