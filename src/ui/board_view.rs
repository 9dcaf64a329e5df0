//! Text board rendering
//!
//! Draws the board from the human's side with rank and file labels.
//! Squares carry one-character markers around the piece symbol:
//!
//! - `(P)` selected piece
//! - `*` / `x` legal destination (empty / capture)
//! - `[ ]` hint move origin and destination
//! - `!K!` king in check

use crate::game::Session;
use shakmaty::{Color, File, Position, Rank, Square};

fn piece_char(session: &Session, square: Square) -> char {
    session
        .board()
        .board()
        .piece_at(square)
        .map(|piece| piece.char())
        .unwrap_or('.')
}

fn render_square(session: &Session, square: Square) -> String {
    let symbol = piece_char(session, square);
    let selection = session.selection();
    let hint = session.hint_move();

    if session.check_square() == Some(square) {
        format!("!{}!", symbol)
    } else if selection.selected == Some(square) {
        format!("({})", symbol)
    } else if selection.targets.contains(&square) {
        if symbol == '.' {
            " * ".to_string()
        } else {
            format!("x{} ", symbol)
        }
    } else if hint.is_some_and(|mv| mv.from() == Some(square) || mv.to() == square) {
        format!("[{}]", symbol)
    } else {
        format!(" {} ", symbol)
    }
}

/// Squares in display order: top rank first, left file first
pub fn display_order(orientation: Color) -> Vec<Vec<Square>> {
    let mut ranks: Vec<Rank> = Rank::ALL.into_iter().rev().collect();
    let mut files: Vec<File> = File::ALL.to_vec();
    if orientation == Color::Black {
        ranks.reverse();
        files.reverse();
    }
    ranks
        .into_iter()
        .map(|rank| files.iter().map(|file| Square::from_coords(*file, rank)).collect())
        .collect()
}

/// Render the board as text lines
pub fn render_board(session: &Session) -> String {
    let orientation = session.orientation();
    let rows = display_order(orientation);

    let file_labels: String = rows[0]
        .iter()
        .map(|square| format!(" {} ", square.file().char()))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("   {}\n", file_labels));
    for row in &rows {
        let rank = row[0].rank().char();
        let cells: String = row.iter().map(|square| render_square(session, *square)).collect();
        out.push_str(&format!(" {} {} {}\n", rank, cells, rank));
    }
    out.push_str(&format!("   {}\n", file_labels));
    out
}
