//! Promotion system - Completes a pending pawn promotion
//!
//! The board is untouched while the dialog is open. Once a piece is chosen
//! the fully specified move is looked up in the legal-move set and handed
//! back for execution.

use crate::game::resources::{LegalMoveSet, PendingPromotion, PROMOTION_CHOICES};
use shakmaty::{Move, Role};
use tracing::{info, warn};

/// Resolve the pending promotion to `role`
///
/// Clears the pending state when a legal move is found. Returns `None`, and
/// leaves the dialog open, for roles that are not promotion choices.
pub fn resolve_promotion(
    pending: &mut PendingPromotion,
    legal: &LegalMoveSet,
    role: Role,
) -> Option<Move> {
    if !PROMOTION_CHOICES.contains(&role) {
        warn!("[PROMOTION] {:?} is not a promotion piece", role);
        return None;
    }
    let (from, to) = pending.squares()?;
    let mv = legal.get(from, to, Some(role)).cloned()?;
    info!("[PROMOTION] Promoting pawn {}{} to {:?}", from, to, role);
    pending.clear();
    Some(mv)
}
