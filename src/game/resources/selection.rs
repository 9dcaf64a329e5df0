//! Selection resource and legal-move lookup
//!
//! [`Selection`] holds the first click of the two-click protocol.
//! [`LegalMoveSet`] indexes the position's legal moves by
//! `(from, to, promotion)` in standard UCI castling notation (king e1 to
//! g1), so a click pair maps straight to a move or to a pending promotion.

use shakmaty::uci::Uci;
use shakmaty::{CastlingMode, Chess, Move, Position, Role, Square};
use std::collections::{HashMap, HashSet};

/// Currently selected piece and its destinations
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    pub selected: Option<Square>,
    pub targets: HashSet<Square>,
}

impl Selection {
    pub fn select(&mut self, square: Square, targets: HashSet<Square>) {
        self.selected = Some(square);
        self.targets = targets;
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.targets.clear();
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }
}

type MoveKey = (Square, Square, Option<Role>);

/// Legal moves of one position keyed by origin, destination and promotion
#[derive(Debug, Default, Clone)]
pub struct LegalMoveSet {
    moves: HashMap<MoveKey, Move>,
}

impl LegalMoveSet {
    pub fn from_position(position: &Chess) -> Self {
        let moves = position
            .legal_moves()
            .into_iter()
            .filter_map(|mv| match mv.to_uci(CastlingMode::Standard) {
                Uci::Normal { from, to, promotion } => Some(((from, to, promotion), mv)),
                _ => None,
            })
            .collect();
        Self { moves }
    }

    pub fn get(&self, from: Square, to: Square, promotion: Option<Role>) -> Option<&Move> {
        self.moves.get(&(from, to, promotion))
    }

    /// Destinations reachable from `from`
    pub fn targets_from(&self, from: Square) -> HashSet<Square> {
        self.moves
            .keys()
            .filter(|(origin, _, _)| *origin == from)
            .map(|(_, to, _)| *to)
            .collect()
    }

    /// Whether `from` to `to` is legal only as a promotion
    pub fn is_promotion_pair(&self, from: Square, to: Square) -> bool {
        self.moves.contains_key(&(from, to, Some(Role::Queen)))
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
