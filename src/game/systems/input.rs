//! Two-click board input
//!
//! The first click on one of the human's pieces selects it. The second
//! click resolves against the legal-move set: a plain legal move is
//! returned for execution, a pawn reaching the last rank opens the
//! promotion sub-phase, anything else is dropped. The selection is always
//! cleared after the second click.

use crate::game::resources::{LegalMoveSet, PendingPromotion, Selection};
use shakmaty::{Chess, Color, Move, Position, Square};
use tracing::debug;

/// Result of one board click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareClick {
    /// A piece was selected; carries its destinations
    Selected(Square),
    /// Second click did not form a legal move
    Deselected,
    /// Second click formed this legal move
    Move(Move),
    /// Second click was a pawn to the last rank
    PromotionPending,
    /// Click on an empty or enemy square with nothing selected
    Ignored,
}

/// Resolve a click on `square` for the human playing `human`
///
/// Pure with respect to the board: the returned move has not been played.
pub fn handle_square_click(
    board: &Chess,
    legal: &LegalMoveSet,
    selection: &mut Selection,
    promotion: &mut PendingPromotion,
    human: Color,
    square: Square,
) -> SquareClick {
    let Some(from) = selection.selected else {
        return select_piece(board, legal, selection, human, square);
    };

    let outcome = if legal.is_promotion_pair(from, square) {
        debug!("[INPUT] Promotion pending {}{}", from, square);
        promotion.start(from, square, human);
        SquareClick::PromotionPending
    } else if let Some(mv) = legal.get(from, square, None) {
        SquareClick::Move(mv.clone())
    } else {
        debug!("[INPUT] No legal move {}{}, selection cleared", from, square);
        SquareClick::Deselected
    };
    selection.clear();
    outcome
}

fn select_piece(
    board: &Chess,
    legal: &LegalMoveSet,
    selection: &mut Selection,
    human: Color,
    square: Square,
) -> SquareClick {
    match board.board().piece_at(square) {
        Some(piece) if piece.color == human => {
            let targets = legal.targets_from(square);
            debug!("[INPUT] Selected {:?} on {} ({} targets)", piece.role, square, targets.len());
            selection.select(square, targets);
            SquareClick::Selected(square)
        }
        _ => SquareClick::Ignored,
    }
}
