//! UI module - terminal rendering
//!
//! Renders the session as plain text:
//!
//! - **board_view**: the board from the human's side with selection, hint
//!   and check markers
//! - **game_ui**: sidebar (clocks, labels, evaluation, hints, moves), menu
//!   screen, promotion dialog and game-over overlay
//!
//! Rendering only reads the session; it never changes game state.

pub mod board_view;
pub mod game_ui;

use crate::core::GameState;
use crate::game::Session;

// Re-export commonly used items
pub use board_view::render_board;
pub use game_ui::*;

/// Full screen for the current phase
pub fn render(session: &Session) -> String {
    if session.state() == GameState::Menu {
        return render_menu(session.settings());
    }

    let board = render_board(session);
    let sidebar = render_sidebar(session);
    let mut out = String::new();
    for (i, line) in board.lines().enumerate() {
        out.push_str(line);
        if let Some(side) = sidebar.get(i) {
            out.push_str("    ");
            out.push_str(side);
        }
        out.push('\n');
    }
    for side in sidebar.iter().skip(board.lines().count()) {
        out.push_str(&format!("{:40}{}\n", "", side));
    }

    let status = session.status();
    if session.state() == GameState::Promoting {
        out.push_str(&render_promotion_dialog());
        out.push('\n');
    } else if status.is_game_over() {
        out.push_str(&render_game_over(status));
        out.push('\n');
    }
    out
}
