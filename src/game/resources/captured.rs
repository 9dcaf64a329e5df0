//! Captured pieces tracking resource
//!
//! Tracks pieces captured by each player and calculates material advantage.
//! Used for the sidebar display next to each player label.
//!
//! # Material Values
//!
//! Standard chess piece values in pawns:
//! - Pawn: 1
//! - Knight/Bishop: 3
//! - Rook: 5
//! - Queen: 9
//! - King: 0 (cannot be captured)
//!
//! # Material Advantage
//!
//! Positive advantage means White is ahead, negative means Black is ahead.
//! Example: if White captured (Rook=5, Pawn=1) and Black captured (Knight=3),
//! White's advantage is (5+1) - 3 = +3 pawns.

use shakmaty::{Color, Piece, Role};

/// Pieces captured by each side, in capture order
///
/// - `white_captured`: Black pieces that White has captured
/// - `black_captured`: White pieces that Black has captured
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CapturedPieces {
    pub white_captured: Vec<Piece>,
    pub black_captured: Vec<Piece>,
}

impl CapturedPieces {
    /// Credit `captured` to the opposite colour's list
    pub fn add_capture(&mut self, captured: Piece) {
        match captured.color {
            Color::White => self.black_captured.push(captured),
            Color::Black => self.white_captured.push(captured),
        }
    }

    /// Pieces taken by `capturer`
    pub fn captured_by(&self, capturer: Color) -> &[Piece] {
        match capturer {
            Color::White => &self.white_captured,
            Color::Black => &self.black_captured,
        }
    }

    /// Capture list as piece symbols, e.g. `"pnQ"`
    pub fn symbols(&self, capturer: Color) -> String {
        self.captured_by(capturer).iter().map(|p| p.char()).collect()
    }

    /// Material difference in pawn units, White-positive
    pub fn material_advantage(&self) -> i32 {
        let white_score: i32 = self.white_captured.iter().map(|p| piece_value(p.role)).sum();
        let black_score: i32 = self.black_captured.iter().map(|p| piece_value(p.role)).sum();
        white_score - black_score
    }

    pub fn clear(&mut self) {
        self.white_captured.clear();
        self.black_captured.clear();
    }
}

/// Standard piece value in pawns
pub fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 1,
        Role::Knight | Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => 0,
    }
}
