//! Error types for board operations.

use std::fmt;

/// Error type for position-notation parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Notation string has too few parts (needs at least placement and side)
    TooFewParts { found: usize },
    /// Invalid piece character in the placement string
    InvalidPiece { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant field
    InvalidEnPassant { found: String },
    /// Too many ranks in the placement string
    InvalidRank { rank: usize },
    /// Too many files in a rank
    TooManyFiles { rank: usize, files: usize },
    /// Invalid halfmove clock field
    InvalidClock { found: String },
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::TooFewParts { found } => {
                write!(f, "notation must have at least 2 parts, found {found}")
            }
            NotationError::InvalidPiece { char } => {
                write!(f, "invalid piece character '{char}' in notation")
            }
            NotationError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            NotationError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant field '{found}'")
            }
            NotationError::InvalidRank { rank } => {
                write!(f, "invalid rank index {rank} in notation")
            }
            NotationError::TooManyFiles { rank, files } => {
                write!(f, "too many files ({files}) in rank {rank}")
            }
            NotationError::InvalidClock { found } => {
                write!(f, "invalid halfmove clock '{found}'")
            }
        }
    }
}

impl std::error::Error for NotationError {}

/// Error type for canonical move-integer decoding failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveCodecError {
    /// A coordinate digit is outside 0..=7
    CoordinateOutOfRange { field: &'static str, value: u32 },
    /// The promotion field does not name a piece
    PromotionOutOfRange { value: u32 },
}

impl fmt::Display for MoveCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCodecError::CoordinateOutOfRange { field, value } => {
                write!(f, "{field} out of range in encoded move {value}")
            }
            MoveCodecError::PromotionOutOfRange { value } => {
                write!(f, "invalid promotion code in encoded move {value}")
            }
        }
    }
}

impl std::error::Error for MoveCodecError {}

/// Error type for textual move-descriptor parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveTextError {
    /// Empty move text
    Empty,
    /// Invalid piece character
    InvalidPiece { char: char },
    /// Invalid square in the descriptor
    InvalidSquare { notation: String },
    /// Ambiguous descriptor (multiple legal moves match)
    AmbiguousMove { text: String },
    /// No legal move matches the descriptor
    NoMatchingMove { text: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
}

impl fmt::Display for MoveTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveTextError::Empty => write!(f, "empty move text"),
            MoveTextError::InvalidPiece { char } => {
                write!(f, "invalid piece character '{char}' in move text")
            }
            MoveTextError::InvalidSquare { notation } => {
                write!(f, "invalid square in move text '{notation}'")
            }
            MoveTextError::AmbiguousMove { text } => {
                write!(f, "ambiguous move '{text}'")
            }
            MoveTextError::NoMatchingMove { text } => {
                write!(f, "no legal move matches '{text}'")
            }
            MoveTextError::InvalidPromotion { char } => {
                write!(f, "invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for MoveTextError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "file {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for start-layout generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Seed outside 1..=960
    SeedOutOfRange { seed: u32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::SeedOutOfRange { seed } => {
                write!(f, "layout seed {seed} out of range (must be 1-960)")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Error type for move application failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    /// The encoded move failed to decode
    Codec(MoveCodecError),
    /// The textual descriptor failed to parse or match a legal move
    Text(MoveTextError),
    /// The move is well-formed but not legal in the current position
    Illegal { mv: String },
    /// A promotion is pending and must be resolved first
    PromotionPending,
    /// No promotion is pending to resolve
    NoPendingPromotion,
    /// The offered promotion piece is not allowed
    InvalidPromotion { piece: char },
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::Codec(e) => write!(f, "{e}"),
            PlayError::Text(e) => write!(f, "{e}"),
            PlayError::Illegal { mv } => write!(f, "illegal move '{mv}'"),
            PlayError::PromotionPending => {
                write!(f, "a pending promotion must be resolved first")
            }
            PlayError::NoPendingPromotion => {
                write!(f, "no promotion is pending")
            }
            PlayError::InvalidPromotion { piece } => {
                write!(f, "invalid promotion piece '{piece}'")
            }
        }
    }
}

impl std::error::Error for PlayError {}

impl From<MoveCodecError> for PlayError {
    fn from(e: MoveCodecError) -> Self {
        PlayError::Codec(e)
    }
}

impl From<MoveTextError> for PlayError {
    fn from(e: MoveTextError) -> Self {
        PlayError::Text(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation_error_display() {
        let err = NotationError::TooFewParts { found: 1 };
        assert!(err.to_string().contains('1'));
        let err = NotationError::InvalidPiece { char: 'z' };
        assert!(err.to_string().contains("'z'"));
        let err = NotationError::InvalidSideToMove {
            found: "x".to_string(),
        };
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn codec_error_display() {
        let err = MoveCodecError::CoordinateOutOfRange {
            field: "origin rank",
            value: 8000,
        };
        assert!(err.to_string().contains("origin rank"));
        assert!(err.to_string().contains("8000"));
    }

    #[test]
    fn move_text_error_display() {
        let err = MoveTextError::NoMatchingMove {
            text: "Qh7".to_string(),
        };
        assert!(err.to_string().contains("Qh7"));
        let err = MoveTextError::AmbiguousMove {
            text: "Rd1".to_string(),
        };
        assert!(err.to_string().contains("Rd1"));
    }

    #[test]
    fn layout_error_display() {
        let err = LayoutError::SeedOutOfRange { seed: 961 };
        assert!(err.to_string().contains("961"));
    }

    #[test]
    fn play_error_from_codec() {
        let err: PlayError = MoveCodecError::PromotionOutOfRange { value: 70000 }.into();
        assert!(matches!(err, PlayError::Codec(_)));
    }

    #[test]
    fn play_error_from_move_text() {
        let err: PlayError = MoveTextError::Empty.into();
        assert!(matches!(err, PlayError::Text(_)));
        assert_eq!(err.to_string(), "empty move text");
    }
}
