//! In-game and menu panels for the terminal front-end
//!
//! Renders the sidebar next to the board:
//! - Player labels with captured pieces and material balance
//! - Both clocks in `mm:ss`
//! - Evaluation bar, score and the last move's quality badge
//! - Hint budget and current suggestion
//! - Move list in numbered pairs
//!
//! plus the menu screen, the promotion dialog and the game-over overlay.

use crate::core::{GameSettings, StrengthMode};
use crate::game::ai::MAX_LEVEL;
use crate::game::resources::{eval_bar_ratio, format_clock, GameStatus, HINT_BUDGET, PROMOTION_CHOICES};
use crate::game::Session;
use shakmaty::{CastlingMode, Color, Position};

/// Width of the evaluation bar in characters
const EVAL_BAR_WIDTH: usize = 20;

fn side_label(session: &Session, color: Color) -> String {
    let name = match color {
        Color::White => "White",
        Color::Black => "Black",
    };
    if color == session.human_color() {
        format!("YOU ({})", name)
    } else {
        format!("BOT ({}) ({})", session.settings().bot_label(), name)
    }
}

/// Evaluation bar as text, White's share filled with `#`
pub fn eval_bar(score: f32) -> String {
    let filled = (eval_bar_ratio(score) * EVAL_BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(EVAL_BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(EVAL_BAR_WIDTH - filled))
}

/// Sidebar lines for a running game
pub fn render_sidebar(session: &Session) -> Vec<String> {
    let mut lines = Vec::new();
    let captured = session.captured();
    let advantage = captured.material_advantage();

    // Opponent on top, human at the bottom
    for color in [!session.human_color(), session.human_color()] {
        let balance = match color {
            Color::White if advantage > 0 => format!(" +{}", advantage),
            Color::Black if advantage < 0 => format!(" +{}", -advantage),
            _ => String::new(),
        };
        let marker = if session.board().turn() == color { ">" } else { " " };
        lines.push(format!(
            "{} {:<24} {}  {}{}",
            marker,
            side_label(session, color),
            format_clock(session.clock().remaining(color)),
            captured.symbols(color),
            balance
        ));
    }

    let eval = session.eval();
    lines.push(String::new());
    lines.push(format!("Eval {} {}", eval_bar(eval.score), eval.display_score()));
    if let (Some(label), Some(last)) = (eval.quality.label(), session.history().last_move()) {
        lines.push(format!("Last move {} {}", last, label));
    }

    let hints = session.hints();
    lines.push(format!("Hints {}/{}", hints.hints_used.min(HINT_BUDGET), HINT_BUDGET));
    if let Some(mv) = session.hint_move() {
        lines.push(format!("Hint: {}", mv.to_uci(CastlingMode::Standard)));
    }
    if !session.engine().is_available() {
        lines.push("Engine offline: no replies or evaluation".to_string());
    }

    lines.push(String::new());
    lines.extend(session.history().numbered_pairs());
    lines
}

/// Promotion dialog lines
pub fn render_promotion_dialog() -> String {
    let choices: Vec<String> = PROMOTION_CHOICES
        .iter()
        .map(|role| format!("[{}]", role.upper_char()))
        .collect();
    format!("Promote to: {}  (promote q|r|b|n)", choices.join(" "))
}

/// Game-over overlay text
pub fn render_game_over(status: GameStatus) -> String {
    format!("*** {} ***  [BACK TO MENU] (home)", status.message())
}

/// Menu screen lines
pub fn render_menu(settings: &GameSettings) -> String {
    let levels: String = (1..=MAX_LEVEL)
        .map(|level| {
            if settings.strength_mode == StrengthMode::Preset && settings.level == level {
                format!("[{}]", level)
            } else {
                format!(" {} ", level)
            }
        })
        .collect();
    let elo_marker = if settings.strength_mode == StrengthMode::Elo { "*" } else { " " };
    let (light, dark) = settings.board_theme.colors();

    [
        "========== OMNICHESS ==========".to_string(),
        format!("Level:  {}", levels),
        format!("Elo:   {}{}", elo_marker, settings.custom_elo),
        format!("Color:  {:?}", settings.human_color),
        format!("Time:   {}", format_clock(settings.time_control_secs as f32)),
        format!("Theme:  {} ({} / {})", settings.board_theme.name(), light, dark),
        "Type 'start' to play, 'help' for commands".to_string(),
    ]
    .join("\n")
}
