//! Serde round-trip tests for the public value types.
#![cfg(feature = "serde")]

use antichess_engine::{Color, Move, Piece, Square};

#[test]
fn move_round_trips_through_json() {
    let mv = Move::promoting(Square(6, 3), Square(7, 4), Piece::King);
    let json = serde_json::to_string(&mv).unwrap();
    let back: Move = serde_json::from_str(&json).unwrap();
    assert_eq!(back, mv);
}

#[test]
fn square_round_trips_through_json() {
    for idx in 0..64 {
        let sq = Square::from_index(idx);
        let json = serde_json::to_string(&sq).unwrap();
        let back: Square = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sq);
    }
}

#[test]
fn piece_and_color_round_trip_through_json() {
    for piece in Piece::ALL {
        let json = serde_json::to_string(&piece).unwrap();
        let back: Piece = serde_json::from_str(&json).unwrap();
        assert_eq!(back, piece);
    }
    for color in Color::BOTH {
        let json = serde_json::to_string(&color).unwrap();
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
    }
}
