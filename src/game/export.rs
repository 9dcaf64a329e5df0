//! PGN export
//!
//! Writes the finished or in-progress game as a single PGN file named
//! `game_<unix-timestamp>.pgn` in the configured export directory.

use crate::game::error::GameResult;
use crate::game::resources::{GameStatus, MoveHistory};
use chrono::{DateTime, Local};
use shakmaty::Color;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Label used for the human in the player tags
pub const HUMAN_NAME: &str = "Player";
/// Label used for the engine in the player tags
pub const ENGINE_NAME: &str = "Stockfish";

const MAX_LINE: usize = 80;

/// Header values for one export
#[derive(Debug, Clone)]
pub struct PgnHeaders {
    pub event: String,
    pub site: String,
    pub date: DateTime<Local>,
    pub round: u32,
    pub human_color: Color,
}

impl PgnHeaders {
    pub fn new(human_color: Color) -> Self {
        Self {
            event: "OmniChess Game".to_string(),
            site: "Local".to_string(),
            date: Local::now(),
            round: 1,
            human_color,
        }
    }
}

/// Render headers and movetext as PGN
pub fn format_pgn(headers: &PgnHeaders, history: &MoveHistory, status: GameStatus) -> String {
    let result = status.pgn_result();
    let (white, black) = match headers.human_color {
        Color::White => (HUMAN_NAME, ENGINE_NAME),
        Color::Black => (ENGINE_NAME, HUMAN_NAME),
    };

    let mut pgn = String::new();
    pgn.push_str(&format!("[Event \"{}\"]\n", headers.event));
    pgn.push_str(&format!("[Site \"{}\"]\n", headers.site));
    pgn.push_str(&format!("[Date \"{}\"]\n", headers.date.format("%Y.%m.%d")));
    pgn.push_str(&format!("[Round \"{}\"]\n", headers.round));
    pgn.push_str(&format!("[White \"{}\"]\n", white));
    pgn.push_str(&format!("[Black \"{}\"]\n", black));
    pgn.push_str(&format!("[Result \"{}\"]\n", result));
    pgn.push('\n');

    let mut tokens = Vec::with_capacity(history.len() * 3 / 2 + 1);
    for (i, san) in history.moves.iter().enumerate() {
        if i % 2 == 0 {
            tokens.push(format!("{}.", i / 2 + 1));
        }
        tokens.push(san.clone());
    }
    tokens.push(result.to_string());

    let mut line = String::new();
    for token in tokens {
        if !line.is_empty() && line.len() + 1 + token.len() > MAX_LINE {
            pgn.push_str(&line);
            pgn.push('\n');
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&token);
    }
    pgn.push_str(&line);
    pgn.push_str("\n\n");
    pgn
}

/// Write the game to `dir/game_<unix-timestamp>.pgn`
pub fn write_pgn(
    dir: &Path,
    headers: &PgnHeaders,
    history: &MoveHistory,
    status: GameStatus,
) -> GameResult<PathBuf> {
    let path = dir.join(format!("game_{}.pgn", headers.date.timestamp()));
    fs::write(&path, format_pgn(headers, history, status))?;
    info!("[PGN] Saved {} moves to {}", history.len(), path.display());
    Ok(path)
}
