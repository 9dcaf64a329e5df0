//! Session phase state machine
//!
//! The session controller moves through three stored phases. Terminal
//! conditions (checkmate, draw, flag fall, forfeiture) are detected from
//! board, clock and hint-guard status each frame and are deliberately not
//! modelled here.
//!
//! # State Flow
//!
//! ```text
//! [Menu] --start--> [Playing] <--promotion chosen-- [Promoting]
//!   ^                  |  \--pawn reaches last rank--^
//!   |                  |
//!   +--home / ack------+
//! ```

use serde::{Deserialize, Serialize};

/// Primary session phase
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum GameState {
    /// Configuration screen (starting state)
    ///
    /// Engine level/Elo, colour and time control are chosen here. Nothing
    /// of the previous game survives a return to this state.
    #[default]
    Menu,

    /// Active gameplay
    ///
    /// Board input, hints, clocks and engine replies are live.
    Playing,

    /// Pawn promotion piece choice
    ///
    /// Entered from `Playing` when a pawn move to the last rank is
    /// legal. The board is not mutated until a piece is chosen.
    Promoting,
}

impl GameState {
    /// Whether a game is loaded (anything but the menu)
    pub fn in_game(self) -> bool {
        matches!(self, GameState::Playing | GameState::Promoting)
    }

    /// Validate a phase transition
    ///
    /// Only the edges drawn in the module docs are allowed; everything
    /// else, including self-loops, is rejected.
    pub fn can_transition_to(self, next: GameState) -> bool {
        matches!(
            (self, next),
            (GameState::Menu, GameState::Playing)
                | (GameState::Playing, GameState::Promoting)
                | (GameState::Promoting, GameState::Playing)
                | (GameState::Playing, GameState::Menu)
                | (GameState::Promoting, GameState::Menu)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_menu() {
        //! A fresh session always opens on the configuration screen
        assert_eq!(GameState::default(), GameState::Menu);
        assert!(!GameState::Menu.in_game());
    }

    #[test]
    fn test_allowed_transitions() {
        //! Verifies the edges of the session state machine
        assert!(GameState::Menu.can_transition_to(GameState::Playing));
        assert!(GameState::Playing.can_transition_to(GameState::Promoting));
        assert!(GameState::Promoting.can_transition_to(GameState::Playing));
        assert!(GameState::Playing.can_transition_to(GameState::Menu));
        assert!(GameState::Promoting.can_transition_to(GameState::Menu));
    }

    #[test]
    fn test_rejected_transitions() {
        //! The menu cannot jump straight into a promotion choice
        assert!(!GameState::Menu.can_transition_to(GameState::Promoting));
        assert!(!GameState::Playing.can_transition_to(GameState::Playing));
        assert!(!GameState::Menu.can_transition_to(GameState::Menu));
    }
}
