//! Core configuration shared across games
//!
//! [`GameSettings`] is the only state that survives a return to the menu.
//! The menu adjusts it through the helpers below; a game reads it once at
//! start and never again.

use crate::game::ai::{EngineStrength, MAX_ELO, MAX_LEVEL, MIN_ELO, MIN_LEVEL};
use serde::{Deserialize, Serialize};
use shakmaty::Color;
use std::path::PathBuf;

/// Shortest time control the menu allows, in seconds
pub const MIN_TIME_CONTROL_SECS: u32 = 10;

/// Default engine command, resolved through `PATH`
pub const DEFAULT_ENGINE_PATH: &str = "stockfish";

/// User-chosen configuration, persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Which strength scheme the engine is configured with
    pub strength_mode: StrengthMode,

    /// Preset level (1-8), used in [`StrengthMode::Preset`]
    pub level: u8,

    /// Target rating, used in [`StrengthMode::Elo`]
    pub custom_elo: u16,

    /// The colour the human plays
    pub human_color: PlayerColor,

    /// Starting time per side in seconds
    pub time_control_secs: u32,

    /// Board colour theme
    pub board_theme: BoardTheme,

    /// Engine executable (path or command name)
    pub engine_path: PathBuf,

    /// Directory PGN exports are written to
    pub export_dir: PathBuf,

    /// Stop the clock while the promotion overlay is open
    ///
    /// Off by default: the clock of the side to move keeps running during
    /// the piece choice.
    pub freeze_clock_during_promotion: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            strength_mode: StrengthMode::Preset,
            level: 1,
            custom_elo: 1500,
            human_color: PlayerColor::White,
            time_control_secs: 600,
            board_theme: BoardTheme::ClassicGreen,
            engine_path: PathBuf::from(DEFAULT_ENGINE_PATH),
            export_dir: PathBuf::from("."),
            freeze_clock_during_promotion: false,
        }
    }
}

impl GameSettings {
    /// Engine strength derived from the current mode
    pub fn strength(&self) -> EngineStrength {
        match self.strength_mode {
            StrengthMode::Preset => EngineStrength::Level(self.level),
            StrengthMode::Elo => EngineStrength::Elo(self.custom_elo),
        }
    }

    /// Pick a preset level and switch to preset mode
    pub fn select_level(&mut self, level: u8) {
        self.level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        self.strength_mode = StrengthMode::Preset;
    }

    /// Step the custom Elo and switch to Elo mode
    pub fn adjust_elo(&mut self, delta: i32) {
        let elo = (i32::from(self.custom_elo) + delta).clamp(i32::from(MIN_ELO), i32::from(MAX_ELO));
        self.custom_elo = elo as u16;
        self.strength_mode = StrengthMode::Elo;
    }

    /// Step the time control, never below [`MIN_TIME_CONTROL_SECS`]
    pub fn adjust_time_control(&mut self, delta: i32) {
        let secs = (i64::from(self.time_control_secs) + i64::from(delta))
            .max(i64::from(MIN_TIME_CONTROL_SECS));
        self.time_control_secs = u32::try_from(secs).unwrap_or(u32::MAX);
    }

    pub fn cycle_theme(&mut self) {
        self.board_theme = self.board_theme.next();
    }

    /// Clamp every field into its allowed range
    ///
    /// Used after loading a hand-edited settings file.
    pub fn sanitized(mut self) -> Self {
        self.level = self.level.clamp(MIN_LEVEL, MAX_LEVEL);
        self.custom_elo = self.custom_elo.clamp(MIN_ELO, MAX_ELO);
        self.time_control_secs = self.time_control_secs.max(MIN_TIME_CONTROL_SECS);
        self
    }

    /// Short bot label for the sidebar, e.g. `Lvl 3` or `1850`
    pub fn bot_label(&self) -> String {
        match self.strength_mode {
            StrengthMode::Preset => format!("Lvl {}", self.level),
            StrengthMode::Elo => self.custom_elo.to_string(),
        }
    }
}

/// Engine strength scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthMode {
    /// Discrete difficulty preset mapped to a skill level
    Preset,
    /// Rating-limited play
    Elo,
}

/// Serializable player colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    White,
    Black,
}

impl From<PlayerColor> for Color {
    fn from(color: PlayerColor) -> Self {
        match color {
            PlayerColor::White => Color::White,
            PlayerColor::Black => Color::Black,
        }
    }
}

impl From<Color> for PlayerColor {
    fn from(color: Color) -> Self {
        match color {
            Color::White => PlayerColor::White,
            Color::Black => PlayerColor::Black,
        }
    }
}

/// Board visual themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardTheme {
    ClassicGreen,
    BlueSky,
    WoodRed,
}

impl BoardTheme {
    pub const ALL: [BoardTheme; 3] = [BoardTheme::ClassicGreen, BoardTheme::BlueSky, BoardTheme::WoodRed];

    pub fn name(&self) -> &'static str {
        match self {
            BoardTheme::ClassicGreen => "Classic Green",
            BoardTheme::BlueSky => "Blue Sky",
            BoardTheme::WoodRed => "Wood/Red",
        }
    }

    /// Returns (light_square_color, dark_square_color) as hex strings
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self {
            BoardTheme::ClassicGreen => ("#eeeed2", "#769656"),
            BoardTheme::BlueSky => ("#dee3e6", "#8ca2ad"),
            BoardTheme::WoodRed => ("#ebecd0", "#ba5546"),
        }
    }

    pub fn next(self) -> Self {
        match self {
            BoardTheme::ClassicGreen => BoardTheme::BlueSky,
            BoardTheme::BlueSky => BoardTheme::WoodRed,
            BoardTheme::WoodRed => BoardTheme::ClassicGreen,
        }
    }
}
