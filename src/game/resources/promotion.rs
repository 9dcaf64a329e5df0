//! Pawn promotion resource for tracking pending promotions
//!
//! When the human's second click moves a pawn onto the last rank, the
//! origin and destination are stored here and the session enters the
//! promoting sub-phase. The board is not touched until a piece is chosen.

use shakmaty::{Color, Role, Square};

/// Pieces offered to the human, in dialog order
pub const PROMOTION_CHOICES: [Role; 4] = [Role::Queen, Role::Rook, Role::Bishop, Role::Knight];

/// A pawn move waiting for its promotion piece
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Option<Square>,
    pub to: Option<Square>,
    pub color: Option<Color>,
}

impl PendingPromotion {
    pub fn start(&mut self, from: Square, to: Square, color: Color) {
        self.from = Some(from);
        self.to = Some(to);
        self.color = Some(color);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    /// Origin and destination of the pending move
    pub fn squares(&self) -> Option<(Square, Square)> {
        Some((self.from?, self.to?))
    }
}

/// Map a promotion key (`q`, `r`, `b`, `n`) to its role
pub fn promotion_role(key: char) -> Option<Role> {
    let role = Role::from_char(key.to_ascii_lowercase())?;
    PROMOTION_CHOICES.contains(&role).then_some(role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_clear() {
        //! A started promotion reports its squares until cleared
        let mut pending = PendingPromotion::default();
        assert!(!pending.is_active());
        pending.start(Square::A7, Square::A8, Color::White);
        assert_eq!(pending.squares(), Some((Square::A7, Square::A8)));
        pending.clear();
        assert!(pending.squares().is_none());
    }

    #[test]
    fn test_promotion_keys() {
        //! Only the four promotion pieces are accepted
        assert_eq!(promotion_role('N'), Some(Role::Knight));
        assert_eq!(promotion_role('q'), Some(Role::Queen));
        assert_eq!(promotion_role('k'), None);
        assert_eq!(promotion_role('p'), None);
    }
}
