//! Move history resource
//!
//! Append-only list of SAN strings, one per executed move. Replaying the
//! list from the starting position reproduces the current board.

use crate::game::error::{GameError, GameResult};
use shakmaty::san::SanPlus;
use shakmaty::{Chess, Position};

/// Executed moves in SAN, oldest first
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MoveHistory {
    pub moves: Vec<String>,
}

impl MoveHistory {
    pub fn add_move(&mut self, san: String) {
        self.moves.push(san);
    }

    pub fn last_move(&self) -> Option<&str> {
        self.moves.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Numbered move pairs, e.g. `["1. e4 e5", "2. Nf3"]`
    pub fn numbered_pairs(&self) -> Vec<String> {
        self.moves
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| format!("{}. {}", i + 1, pair.join(" ")))
            .collect()
    }

    /// Replay every move from the standard starting position
    pub fn replay(&self) -> GameResult<Chess> {
        let mut position = Chess::default();
        for (ply, text) in self.moves.iter().enumerate() {
            let san: SanPlus = text.parse().map_err(|_| GameError::InvalidMove {
                message: format!("unparseable SAN '{}' at ply {}", text, ply + 1),
            })?;
            let mv = san.san.to_move(&position).map_err(|_| GameError::InvalidMove {
                message: format!("illegal SAN '{}' at ply {}", text, ply + 1),
            })?;
            position.play_unchecked(&mv);
        }
        Ok(position)
    }
}
