//! Game logic for status detection and timing
//!
//! Status is recomputed from scratch every frame. Nothing here stores a
//! terminal flag; the board, clock and hint guard are the sources of truth.

use crate::core::GameState;
use crate::game::resources::{GameClock, GameStatus, HintGuard, RepetitionTracker};
use shakmaty::{Chess, Color, Position, Square};
use tracing::info;

/// Half-moves without capture or pawn move that end the game
pub const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Derive the current game status
///
/// Forfeiture takes precedence, then a fallen flag, then the board.
pub fn derive_status(
    board: &Chess,
    clock: &GameClock,
    hints: &HintGuard,
    repetitions: &RepetitionTracker,
    human: Color,
) -> GameStatus {
    if hints.forfeited {
        return GameStatus::Forfeited { winner: !human };
    }
    if let Some(flagged) = clock.flagged() {
        return GameStatus::Timeout { winner: !flagged };
    }
    if board.is_checkmate() {
        return GameStatus::Checkmate { winner: !board.turn() };
    }
    if board.is_stalemate() {
        return GameStatus::Stalemate;
    }
    if board.is_insufficient_material() {
        return GameStatus::InsufficientMaterial;
    }
    if board.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES {
        return GameStatus::Draw;
    }
    if repetitions.is_fivefold(board) {
        return GameStatus::Repetition;
    }
    GameStatus::InProgress
}

/// Square of the side-to-move's king when it is in check
pub fn check_square(board: &Chess) -> Option<Square> {
    if board.is_check() {
        board.board().king_of(board.turn())
    } else {
        None
    }
}

/// Advance the clock for one frame
///
/// The clock runs only in game phases, while the game is in progress, and
/// not during promotion when `freeze_during_promotion` is set.
pub fn update_game_clock(
    clock: &mut GameClock,
    state: GameState,
    status: GameStatus,
    side_to_move: Color,
    elapsed: f32,
    freeze_during_promotion: bool,
) -> Option<Color> {
    if !state.in_game() || status.is_game_over() {
        return None;
    }
    if state == GameState::Promoting && freeze_during_promotion {
        return None;
    }
    let flagged = clock.tick(side_to_move, elapsed);
    if let Some(color) = flagged {
        info!("[GAME] {:?} lost on time", color);
    }
    flagged
}
