//! Game status and result reporting
//!
//! The session never stores a "game over" flag. [`GameStatus`] is derived
//! every frame from the board, the clock and the hint guard, so it cannot
//! drift out of sync with any of them.
//!
//! # Game Over Conditions
//!
//! ## Checkmate
//! - The side to move is in check with no legal moves
//!
//! ## Draw Conditions
//! - **Stalemate**: no legal moves, not in check
//! - **InsufficientMaterial**: neither side can deliver mate (e.g. K vs K)
//! - **Draw**: 75 moves without a capture or pawn move
//! - **Repetition**: the same position occurred five times
//!
//! ## Time Control
//! - **Timeout**: a clock reached zero
//!
//! ## Anti-Cheat
//! - **Forfeited**: the human exceeded the hint budget and lost
//!
//! # Precedence
//!
//! Forfeiture, then flag fall, then the board's own outcome.

use shakmaty::Color;

/// Derived state of the current game
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
pub enum GameStatus {
    /// Game is still in progress
    #[default]
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    /// 75-move rule
    Draw,
    /// Fivefold repetition
    Repetition,
    Timeout { winner: Color },
    /// Human exceeded the hint budget
    Forfeited { winner: Color },
}

impl GameStatus {
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Human-readable result line
    pub fn message(&self) -> String {
        match self {
            GameStatus::InProgress => "Game in progress".to_string(),
            GameStatus::Checkmate { winner } => format!("CHECKMATE! {} Wins", color_name(*winner)),
            GameStatus::Stalemate => "Draw by stalemate".to_string(),
            GameStatus::InsufficientMaterial => "Draw by insufficient material".to_string(),
            GameStatus::Draw => "Draw by the 75-move rule".to_string(),
            GameStatus::Repetition => "Draw by fivefold repetition".to_string(),
            GameStatus::Timeout { winner } => format!("TIME OUT! {} Wins", color_name(*winner)),
            GameStatus::Forfeited { .. } => "GAME FORFEITED! (Too many hints)".to_string(),
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner }
            | GameStatus::Timeout { winner }
            | GameStatus::Forfeited { winner } => Some(*winner),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::InsufficientMaterial
                | GameStatus::Draw
                | GameStatus::Repetition
        )
    }

    /// PGN `Result` tag value
    pub fn pgn_result(&self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None if self.is_draw() => "1/2-1/2",
            None => "*",
        }
    }
}

pub(crate) fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_is_not_over() {
        //! The default status keeps the game running
        let status = GameStatus::default();
        assert!(!status.is_game_over());
        assert_eq!(status.pgn_result(), "*");
    }

    #[test]
    fn test_results() {
        //! Winners and draws map to PGN result tokens
        assert_eq!(GameStatus::Checkmate { winner: Color::White }.pgn_result(), "1-0");
        assert_eq!(GameStatus::Timeout { winner: Color::Black }.pgn_result(), "0-1");
        assert_eq!(GameStatus::Stalemate.pgn_result(), "1/2-1/2");
        assert_eq!(GameStatus::Draw.pgn_result(), "1/2-1/2");
        assert_eq!(GameStatus::Repetition.pgn_result(), "1/2-1/2");
        assert!(GameStatus::Repetition.message().contains("repetition"));
    }

    #[test]
    fn test_forfeit_is_distinct() {
        //! Forfeiture reports its own message and is not a draw
        let status = GameStatus::Forfeited { winner: Color::Black };
        assert!(status.is_game_over());
        assert!(!status.is_draw());
        assert!(status.message().contains("FORFEITED"));
        assert_eq!(status.winner(), Some(Color::Black));
    }
}
