//! Textual move descriptors.
//!
//! The accepted form is algebraic-like: optional piece letter, optional
//! origin disambiguation, optional capture marker, destination square,
//! optional promotion suffix ("Nxa3", "bxa3", "a8=Q", "Rab1"). Plain
//! coordinate pairs ("b2a3", "a7a8q") are accepted too. There is no
//! castling and no check in this variant; trailing '+' or '#' are
//! tolerated and ignored on input, never produced on output.

use super::error::MoveTextError;
use super::movegen::MoveRules;
use super::{Move, Piece, Position, Square};

impl Position {
    /// Format a move as text, with origin disambiguation where several
    /// like pieces reach the same destination.
    #[must_use]
    pub fn move_to_text(&self, mv: Move) -> String {
        let piece = self
            .piece_at(mv.from())
            .map(|(_, p)| p)
            .expect("move_to_text: no piece on the origin square");

        let capture = self.piece_at(mv.to()).is_some()
            || (piece == Piece::Pawn && mv.from().file() != mv.to().file());

        let mut text = String::new();
        if piece == Piece::Pawn {
            if capture {
                text.push((b'a' + mv.from().file() as u8) as char);
            }
        } else {
            text.push(piece.to_char().to_ascii_uppercase());
            let (needs_file, needs_rank) = self.needs_disambiguation(mv, piece);
            if needs_file {
                text.push((b'a' + mv.from().file() as u8) as char);
            }
            if needs_rank {
                text.push((b'1' + mv.from().rank() as u8) as char);
            }
        }

        if capture {
            text.push('x');
        }
        text.push_str(&mv.to().to_string());
        if let Some(promo) = mv.promotion() {
            text.push('=');
            text.push(promo.to_char().to_ascii_uppercase());
        }
        text
    }

    /// Determine if disambiguation is needed for a piece move.
    /// Returns (`needs_file`, `needs_rank`).
    fn needs_disambiguation(&self, mv: Move, piece: Piece) -> (bool, bool) {
        let moves = self.generate_moves();
        let rivals: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|m| {
                m.to() == mv.to()
                    && m.from() != mv.from()
                    && self.piece_at(m.from()).map(|(_, p)| p) == Some(piece)
            })
            .collect();

        if rivals.is_empty() {
            return (false, false);
        }

        let same_file = rivals.iter().any(|m| m.from().file() == mv.from().file());
        let same_rank = rivals.iter().any(|m| m.from().rank() == mv.from().rank());

        match (same_file, same_rank) {
            (false, _) => (true, false),
            (true, false) => (false, true),
            (true, true) => (true, true),
        }
    }

    /// Parse a textual move descriptor against the legal move set.
    ///
    /// Fails without mutating anything when the text is malformed,
    /// matches no legal move, or matches more than one.
    pub fn parse_move_text(&self, text: &str, rules: &MoveRules) -> Result<Move, MoveTextError> {
        let text = text.trim().trim_end_matches(['+', '#']);
        if text.is_empty() {
            return Err(MoveTextError::Empty);
        }

        let legal = self.legal_moves(rules).moves;

        if let Some((from, to, promo)) = parse_coordinate_pair(text) {
            let wanted = match promo {
                Some(p) => Move::promoting(from, to, p),
                None => Move::new(from, to),
            };
            return if legal.contains(wanted) {
                Ok(wanted)
            } else {
                Err(MoveTextError::NoMatchingMove {
                    text: text.to_string(),
                })
            };
        }

        let chars: Vec<char> = text.chars().collect();
        let (piece, rest) = if chars[0].is_ascii_uppercase() {
            let p = Piece::from_char(chars[0]).ok_or(MoveTextError::InvalidPiece {
                char: chars[0],
            })?;
            (p, &chars[1..])
        } else {
            (Piece::Pawn, &chars[..])
        };

        let parsed = parse_descriptor_tail(rest, text)?;

        let matches: Vec<Move> = legal
            .iter()
            .copied()
            .filter(|m| {
                m.to() == parsed.dest
                    && self.piece_at(m.from()).map(|(_, p)| p) == Some(piece)
                    && parsed
                        .origin_file
                        .map_or(true, |f| m.from().file() == f)
                    && parsed
                        .origin_rank
                        .map_or(true, |r| m.from().rank() == r)
                    && m.promotion() == parsed.promotion
            })
            .collect();

        match matches.as_slice() {
            [] => Err(MoveTextError::NoMatchingMove {
                text: text.to_string(),
            }),
            [mv] => Ok(*mv),
            _ => Err(MoveTextError::AmbiguousMove {
                text: text.to_string(),
            }),
        }
    }
}

struct DescriptorTail {
    origin_file: Option<usize>,
    origin_rank: Option<usize>,
    dest: Square,
    promotion: Option<Piece>,
}

/// Parse the descriptor after the piece letter:
/// `[file][rank][x]<dest>[=promotion]`.
fn parse_descriptor_tail(chars: &[char], text: &str) -> Result<DescriptorTail, MoveTextError> {
    let invalid = || MoveTextError::InvalidSquare {
        notation: text.to_string(),
    };

    let mut idx = 0;
    let mut origin_file = None;
    let mut origin_rank = None;
    let mut squares: Vec<(usize, usize)> = Vec::new();
    let mut promotion = None;

    while idx < chars.len() {
        let c = chars[idx];
        match c {
            'x' => idx += 1,
            '=' => {
                idx += 1;
                let promo_char = *chars.get(idx).ok_or_else(invalid)?;
                promotion = Some(Piece::from_char(promo_char).ok_or(
                    MoveTextError::InvalidPromotion { char: promo_char },
                )?);
                idx += 1;
            }
            'a'..='h' => {
                let file = c as usize - 'a' as usize;
                if chars.get(idx + 1).is_some_and(char::is_ascii_digit) {
                    let rank_char = chars[idx + 1];
                    if !('1'..='8').contains(&rank_char) {
                        return Err(invalid());
                    }
                    squares.push((rank_char as usize - '1' as usize, file));
                    idx += 2;
                } else {
                    // A lone file letter disambiguates the origin.
                    origin_file = Some(file);
                    idx += 1;
                }
            }
            '1'..='8' => {
                origin_rank = Some(c as usize - '1' as usize);
                idx += 1;
            }
            _ => return Err(invalid()),
        }
    }

    // The last full square is the destination; an earlier one, if any,
    // is a fully spelled origin ("Ra4b4").
    let dest = match squares.as_slice() {
        [(r, f)] => Square(*r, *f),
        [(or, of), (r, f)] => {
            origin_rank = Some(*or);
            origin_file = Some(*of);
            Square(*r, *f)
        }
        _ => return Err(invalid()),
    };

    Ok(DescriptorTail {
        origin_file,
        origin_rank,
        dest,
        promotion,
    })
}

/// Recognize plain coordinate text like "b2a3" or "a7a8q".
fn parse_coordinate_pair(text: &str) -> Option<(Square, Square, Option<Piece>)> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 4 && chars.len() != 5 {
        return None;
    }
    let square = |file: char, rank: char| -> Option<Square> {
        if ('a'..='h').contains(&file) && ('1'..='8').contains(&rank) {
            Some(Square(
                rank as usize - '1' as usize,
                file as usize - 'a' as usize,
            ))
        } else {
            None
        }
    };
    let from = square(chars[0], chars[1])?;
    let to = square(chars[2], chars[3])?;
    let promo = if chars.len() == 5 {
        // Promotion letters are lowercase in coordinate text; anything
        // else means this is not a coordinate pair.
        if !chars[4].is_ascii_lowercase() {
            return None;
        }
        Some(Piece::from_char(chars[4])?)
    } else {
        None
    };
    Some((from, to, promo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    fn rules() -> MoveRules {
        MoveRules::default()
    }

    #[test]
    fn parses_pawn_push() {
        let position = Position::classical();
        let mv = position.parse_move_text("e4", &rules()).unwrap();
        assert_eq!(mv, Move::new(Square(1, 4), Square(3, 4)));
    }

    #[test]
    fn parses_piece_move() {
        let position = Position::classical();
        let mv = position.parse_move_text("Nf3", &rules()).unwrap();
        assert_eq!(mv, Move::new(Square(0, 6), Square(2, 5)));
    }

    #[test]
    fn parses_coordinate_pair() {
        let position = Position::classical();
        let mv = position.parse_move_text("e2e4", &rules()).unwrap();
        assert_eq!(mv, Move::new(Square(1, 4), Square(3, 4)));
    }

    #[test]
    fn parses_capture_marker() {
        let position = Position::try_from_notation("8/7p/8/8/8/b7/1P6/1N6 w - -").unwrap();
        let mv = position.parse_move_text("bxa3", &rules()).unwrap();
        assert_eq!(mv, Move::new(Square(1, 1), Square(2, 0)));
        let mv = position.parse_move_text("Nxa3", &rules()).unwrap();
        assert_eq!(mv, Move::new(Square(0, 1), Square(2, 0)));
    }

    #[test]
    fn parses_promotion_suffix() {
        let position = Position::try_from_notation("8/P7/8/8/8/8/8/7N w - -").unwrap();
        let mv = position.parse_move_text("a8=K", &rules()).unwrap();
        assert_eq!(mv.promotion(), Some(Piece::King));
        let mv = position.parse_move_text("a7a8q", &rules()).unwrap();
        assert_eq!(mv.promotion(), Some(Piece::Queen));
    }

    #[test]
    fn rejects_illegal_and_unknown() {
        let position = Position::classical();
        assert!(matches!(
            position.parse_move_text("e5", &rules()),
            Err(MoveTextError::NoMatchingMove { .. })
        ));
        assert!(matches!(
            position.parse_move_text("", &rules()),
            Err(MoveTextError::Empty)
        ));
        assert!(matches!(
            position.parse_move_text("Xa3", &rules()),
            Err(MoveTextError::InvalidPiece { .. })
        ));
    }

    #[test]
    fn rejects_ambiguous_descriptor() {
        // Two rooks on the first rank can both reach d1.
        let position = Position::try_from_notation("8/8/8/8/8/8/8/R2k3R w - -").unwrap();
        // Forced capture: both rooks must take the king on d1... which
        // makes "Rxd1" ambiguous.
        assert!(matches!(
            position.parse_move_text("Rxd1", &rules()),
            Err(MoveTextError::AmbiguousMove { .. })
        ));
        let mv = position.parse_move_text("Raxd1", &rules()).unwrap();
        assert_eq!(mv.from(), Square(0, 0));
    }

    #[test]
    fn disambiguation_in_output() {
        let position = Position::try_from_notation("8/8/8/8/8/8/8/R2k3R w - -").unwrap();
        let mv = Move::new(Square(0, 0), Square(0, 3));
        assert_eq!(position.move_to_text(mv), "Raxd1");
        assert_eq!(position.side_to_move(), Color::White);
    }

    #[test]
    fn pawn_capture_text_includes_file() {
        let position = Position::try_from_notation("8/7p/8/8/8/b7/1P6/1N6 w - -").unwrap();
        let mv = Move::new(Square(1, 1), Square(2, 0));
        assert_eq!(position.move_to_text(mv), "bxa3");
    }

    #[test]
    fn tolerates_check_decorations() {
        let position = Position::classical();
        let mv = position.parse_move_text("Nf3+", &rules()).unwrap();
        assert_eq!(mv, Move::new(Square(0, 6), Square(2, 5)));
    }
}
