//! Resource module unit tests
//!
//! These tests exercise several resources together the way the session
//! drives them after a move: legal-move lookup, capture bookkeeping,
//! history replay and evaluation grading. They run against plain
//! `shakmaty` positions with no engine involved.

use super::*;
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{CastlingMode, Chess, Color, Piece, Position, Role, Square};

fn play(position: &mut Chess, history: &mut MoveHistory, captured: &mut CapturedPieces, from: Square, to: Square) {
    let set = LegalMoveSet::from_position(position);
    let mv = set.get(from, to, None).cloned().expect("legal move");
    history.add_move(SanPlus::from_move(position.clone(), &mv).to_string());
    if let Some(role) = mv.capture() {
        captured.add_capture(Piece { color: !position.turn(), role });
    }
    position.play_unchecked(&mv);
}

// ============================================================================
// Move bookkeeping
// ============================================================================

#[test]
fn test_history_replay_matches_played_position() {
    //! Tests that the SAN record reproduces the board it was built from
    //!
    //! Each executed move appends exactly one SAN string. Replaying the
    //! record from a fresh board must land on the same position, which is
    //! what PGN export relies on.

    let mut position = Chess::default();
    let mut history = MoveHistory::default();
    let mut captured = CapturedPieces::default();

    play(&mut position, &mut history, &mut captured, Square::E2, Square::E4);
    play(&mut position, &mut history, &mut captured, Square::D7, Square::D5);
    play(&mut position, &mut history, &mut captured, Square::E4, Square::D5);

    assert_eq!(history.moves, vec!["e4", "d5", "exd5"]);
    assert_eq!(captured.symbols(Color::White), "p");
    let replayed = history.replay().unwrap();
    assert_eq!(replayed.board(), position.board());
    assert_eq!(replayed.turn(), position.turn());
}

#[test]
fn test_en_passant_capture_is_recorded() {
    //! Tests that en passant credits the pawn even though the target square was empty

    let fen: Fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
    let mut position: Chess = fen.into_position(CastlingMode::Standard).unwrap();
    let mut history = MoveHistory::default();
    let mut captured = CapturedPieces::default();

    play(&mut position, &mut history, &mut captured, Square::E5, Square::D6);

    assert_eq!(history.last_move(), Some("exd6"));
    assert_eq!(captured.white_captured, vec![Piece { color: Color::Black, role: Role::Pawn }]);
}

#[test]
fn test_castling_records_no_capture() {
    //! Tests that castling is not mistaken for capturing the rook

    let fen: Fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1".parse().unwrap();
    let mut position: Chess = fen.into_position(CastlingMode::Standard).unwrap();
    let mut history = MoveHistory::default();
    let mut captured = CapturedPieces::default();

    play(&mut position, &mut history, &mut captured, Square::E1, Square::G1);

    assert_eq!(history.last_move(), Some("O-O"));
    assert_eq!(captured, CapturedPieces::default());
}

// ============================================================================
// Evaluation
// ============================================================================

#[test]
fn test_evaluation_sequence_after_blunder() {
    //! Tests grading across a short sequence of engine scores
    //!
    //! A quiet opening move, a small concession and then a queen hang
    //! should grade Brilliant, Best and Blunder in that order.

    let mut tracker = EvalTracker::default();
    assert_eq!(tracker.update(0.1), MoveQuality::Brilliant);
    assert_eq!(tracker.update(-0.4), MoveQuality::Best);
    assert_eq!(tracker.update(-9.0), MoveQuality::Blunder);
    assert_eq!(tracker.display_score(), "-9.0");
    assert!(eval_bar_ratio(tracker.score) < 0.1);
}
