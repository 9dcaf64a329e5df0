use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossbeam_channel::{select, tick, unbounded, Receiver};
use omnichess::core::settings_persistence::{load_settings, save_settings, settings_path};
use omnichess::core::{BoardTheme, GameSettings, GameState, PlayerColor};
use omnichess::game::ai::EngineOrchestrator;
use omnichess::input::console::{describe, HELP};
use omnichess::input::{dispatch, parse_command, Dispatch};
use omnichess::{ui, ClickOutcome, Session};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Frame period of the control loop (60 Hz)
const FRAME: Duration = Duration::from_micros(16_667);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorArg {
    White,
    Black,
}

#[derive(Parser, Debug)]
#[command(name = "omnichess")]
#[command(about = "Play chess against a UCI engine with clock, hints and move grading", long_about = None)]
struct Cli {
    /// Engine executable (path or command on PATH)
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Preset level 1-8
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=8))]
    level: Option<u8>,

    /// Rating-limited play at this Elo (1350-3190)
    #[arg(long)]
    elo: Option<u16>,

    /// Side you play
    #[arg(long, value_enum)]
    color: Option<ColorArg>,

    /// Seconds per side (minimum 10)
    #[arg(long)]
    time: Option<u32>,

    /// Board theme index (0-2)
    #[arg(long)]
    theme: Option<usize>,

    /// Directory PGN files are written to
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Do not write settings back to disk
    #[arg(long)]
    no_save: bool,
}

impl Cli {
    fn apply(&self, settings: &mut GameSettings) {
        if let Some(engine) = &self.engine {
            settings.engine_path = engine.clone();
        }
        if let Some(level) = self.level {
            settings.select_level(level);
        }
        if let Some(elo) = self.elo {
            settings.custom_elo = elo;
            settings.adjust_elo(0);
        }
        if let Some(color) = self.color {
            settings.human_color = match color {
                ColorArg::White => PlayerColor::White,
                ColorArg::Black => PlayerColor::Black,
            };
        }
        if let Some(time) = self.time {
            settings.time_control_secs = time;
        }
        if let Some(theme) = self.theme {
            settings.board_theme = BoardTheme::ALL[theme % BoardTheme::ALL.len()];
        }
        if let Some(dir) = &self.export_dir {
            settings.export_dir = dir.clone();
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Forward stdin lines to the frame loop
fn spawn_stdin_reader() -> Result<Receiver<String>> {
    let (tx, rx) = unbounded();
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("failed to spawn stdin reader thread")?;
    Ok(rx)
}

fn persist(settings: &GameSettings, no_save: bool) {
    if no_save {
        return;
    }
    if let Err(e) = save_settings(&settings_path(), settings) {
        warn!("[SETTINGS] Settings not saved: {}", e);
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut settings = load_settings(&settings_path());
    cli.apply(&mut settings);
    let settings = settings.sanitized();
    persist(&settings, cli.no_save);

    let engine = EngineOrchestrator::launch(&settings.engine_path);
    let mut session = Session::new(settings, engine);
    let lines = spawn_stdin_reader()?;
    let ticker = tick(FRAME);

    println!("{}", ui::render(&session));
    let mut last_frame = Instant::now();
    let mut was_over = false;

    loop {
        select! {
            recv(lines) -> line => {
                let Ok(line) = line else {
                    info!("[SESSION] Input closed, exiting");
                    break;
                };
                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                match dispatch(&mut session, command) {
                    Dispatch::Quit => break,
                    Dispatch::Help => println!("{}", HELP),
                    Dispatch::Redraw => println!("{}", ui::render(&session)),
                    Dispatch::Session(outcome) => {
                        if let Some(text) = describe(&outcome) {
                            println!("{}", text);
                        }
                        if matches!(outcome, ClickOutcome::Started | ClickOutcome::MenuChanged(_)) {
                            persist(session.settings(), cli.no_save);
                        }
                        if outcome != ClickOutcome::Ignored {
                            println!("{}", ui::render(&session));
                        }
                    }
                }
            }
            recv(ticker) -> _ => {
                let now = Instant::now();
                let elapsed = now.duration_since(last_frame).as_secs_f32();
                last_frame = now;

                let status = session.advance_frame(elapsed);
                let is_over = session.state() != GameState::Menu && status.is_game_over();
                if is_over && !was_over {
                    println!("{}", ui::render(&session));
                }
                was_over = is_over;

                if session.engine_reply_due() {
                    if let Some(san) = session.play_engine_reply() {
                        println!("Engine played {}", san);
                        println!("{}", ui::render(&session));
                    }
                    // Search and evaluation were charged inside the reply
                    last_frame = Instant::now();
                }
            }
        }
    }

    persist(session.settings(), cli.no_save);
    Ok(())
}
