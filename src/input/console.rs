//! Terminal command parsing and dispatch
//!
//! Each stdin line is one command. Board commands go through the same
//! session calls as pointer clicks, so the console gets no shortcuts past
//! the turn, forfeit or engine-busy guards.
//!
//! # Commands
//!
//! | Command              | Effect                                   |
//! |----------------------|------------------------------------------|
//! | `click X Y`          | Pointer click at window pixel (X, Y)     |
//! | `move e2e4[q]`       | Two clicks, plus promotion if given      |
//! | `promote q\|r\|b\|n` | Pick the pending promotion piece         |
//! | `hint` / `pgn`       | Sidebar buttons                          |
//! | `home` / `start`     | Leave the game / start one from the menu |
//! | `level N`            | Select preset level                      |
//! | `elo ±N`             | Adjust custom Elo                        |
//! | `color white\|black` | Choose the human's side                  |
//! | `time ±N`            | Adjust time control in seconds           |
//! | `theme`              | Cycle the board theme                    |
//! | `board`, `help`      | Redraw, list commands                    |
//! | `quit`               | Exit                                     |

use crate::core::PlayerColor;
use crate::game::resources::promotion_role;
use crate::game::{ClickOutcome, HintOutcome, Session};
use crate::input::pointer::{MenuAction, Point};
use shakmaty::{CastlingMode, Role, Square};
use tracing::debug;

/// Errors from malformed command lines
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
}

/// One parsed console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Click(Point),
    Move {
        from: Square,
        to: Square,
        promotion: Option<Role>,
    },
    Promote(Role),
    Hint,
    Pgn,
    Home,
    Menu(MenuAction),
    Board,
    Help,
    Quit,
}

/// Parse a single command line
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };
    let args: Vec<&str> = words.collect();
    let head = head.to_ascii_lowercase();

    let command = match head.as_str() {
        "click" => {
            let bad = CommandError::BadArgument {
                command: "click",
                expected: "two pixel coordinates",
            };
            match args.as_slice() {
                [x, y] => Command::Click(Point::new(
                    x.parse().map_err(|_| bad.clone())?,
                    y.parse().map_err(|_| bad.clone())?,
                )),
                _ => return Err(bad),
            }
        }
        "move" => parse_move(args.first().copied())?,
        "promote" => {
            let role = args
                .first()
                .and_then(|arg| arg.chars().next())
                .and_then(promotion_role)
                .ok_or(CommandError::BadArgument {
                    command: "promote",
                    expected: "one of q, r, b, n",
                })?;
            Command::Promote(role)
        }
        "hint" => Command::Hint,
        "pgn" | "export" => Command::Pgn,
        "home" | "menu" => Command::Home,
        "start" => Command::Menu(MenuAction::Start),
        "theme" => Command::Menu(MenuAction::CycleTheme),
        "level" => {
            let level = args
                .first()
                .and_then(|arg| arg.parse::<u8>().ok())
                .filter(|level| (1..=8).contains(level))
                .ok_or(CommandError::BadArgument {
                    command: "level",
                    expected: "a level from 1 to 8",
                })?;
            Command::Menu(MenuAction::SelectLevel(level))
        }
        "elo" => Command::Menu(MenuAction::AdjustElo(signed_arg("elo", &args)?)),
        "time" => Command::Menu(MenuAction::AdjustTime(signed_arg("time", &args)?)),
        "color" | "colour" => {
            let color = match args.first().map(|arg| arg.to_ascii_lowercase()).as_deref() {
                Some("white" | "w") => PlayerColor::White,
                Some("black" | "b") => PlayerColor::Black,
                _ => {
                    return Err(CommandError::BadArgument {
                        command: "color",
                        expected: "white or black",
                    })
                }
            };
            Command::Menu(MenuAction::SetColor(color))
        }
        "board" | "show" => Command::Board,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(head)),
    };
    Ok(command)
}

fn parse_move(arg: Option<&str>) -> Result<Command, CommandError> {
    let bad = CommandError::BadArgument {
        command: "move",
        expected: "a move like e2e4 or e7e8q",
    };
    let text = arg.ok_or(bad.clone())?.to_ascii_lowercase();
    if !(text.len() == 4 || text.len() == 5) || !text.is_ascii() {
        return Err(bad);
    }
    let from: Square = text[0..2].parse().map_err(|_| bad.clone())?;
    let to: Square = text[2..4].parse().map_err(|_| bad.clone())?;
    let promotion = match text[4..].chars().next() {
        Some(key) => Some(promotion_role(key).ok_or(bad)?),
        None => None,
    };
    Ok(Command::Move { from, to, promotion })
}

fn signed_arg(command: &'static str, args: &[&str]) -> Result<i32, CommandError> {
    args.first()
        .and_then(|arg| arg.trim_start_matches('+').parse().ok())
        .ok_or(CommandError::BadArgument {
            command,
            expected: "a signed step like +10 or -60",
        })
}

/// What the driver should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Session(ClickOutcome),
    Redraw,
    Help,
    Quit,
}

/// Apply a command to the session
pub fn dispatch(session: &mut Session, command: Command) -> Dispatch {
    debug!("[INPUT] {:?}", command);
    let outcome = match command {
        Command::Click(point) => session.handle_click(point),
        Command::Move { from, to, promotion } => {
            session.click_square(from);
            match (session.click_square(to), promotion) {
                (ClickOutcome::PromotionPending, Some(role)) => session.choose_promotion(role),
                (outcome, _) => outcome,
            }
        }
        Command::Promote(role) => session.choose_promotion(role),
        Command::Hint => ClickOutcome::Hint(session.request_hint()),
        Command::Pgn => match session.export_pgn() {
            Ok(path) => ClickOutcome::Exported(path),
            Err(e) => ClickOutcome::ExportFailed(e.to_string()),
        },
        Command::Home => match session.go_home() {
            Ok(()) => ClickOutcome::ReturnedHome,
            Err(_) => ClickOutcome::Ignored,
        },
        Command::Menu(action) => session.apply_menu_action(action),
        Command::Board => return Dispatch::Redraw,
        Command::Help => return Dispatch::Help,
        Command::Quit => return Dispatch::Quit,
    };
    Dispatch::Session(outcome)
}

/// One-line summary of an outcome for the terminal
pub fn describe(outcome: &ClickOutcome) -> Option<String> {
    let text = match outcome {
        ClickOutcome::Ignored => return None,
        ClickOutcome::MenuChanged(action) => format!("Menu: {:?}", action),
        ClickOutcome::Started => "New game started".to_string(),
        ClickOutcome::ReturnedHome => "Back to menu".to_string(),
        ClickOutcome::Selected(square) => format!("Selected {}", square),
        ClickOutcome::Deselected => "Selection cleared".to_string(),
        ClickOutcome::Moved(san) => format!("Played {}", san),
        ClickOutcome::PromotionPending => "Promote to: q, r, b or n".to_string(),
        ClickOutcome::Hint(HintOutcome::Suggested(mv)) => format!("Hint: {}", mv.to_uci(CastlingMode::Standard)),
        ClickOutcome::Hint(HintOutcome::Unavailable) => "No hint available".to_string(),
        ClickOutcome::Hint(HintOutcome::Forfeited) => "Too many hints: game forfeited".to_string(),
        ClickOutcome::Hint(HintOutcome::Refused) => return None,
        ClickOutcome::Exported(path) => format!("Saved {}", path.display()),
        ClickOutcome::ExportFailed(reason) => format!("Export failed: {}", reason),
    };
    Some(text)
}

pub const HELP: &str = "\
commands:
  click X Y          click at window pixel (1200x800 layout)
  move e2e4[q]       move a piece, optional promotion piece
  promote q|r|b|n    choose the pending promotion piece
  hint               ask for a hint (more than 3 forfeits the game)
  pgn                export the game as PGN
  home               return to the menu
  start              start a game (menu)
  level N            preset level 1-8 (menu)
  elo +N|-N          adjust Elo (menu)
  color white|black  choose your side (menu)
  time +N|-N         adjust time control in seconds (menu)
  theme              cycle board theme (menu)
  board              redraw
  quit               exit";
