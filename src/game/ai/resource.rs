//! Engine strength and search budget definitions
//!
//! Configures how strong the opponent plays and how long each kind of
//! engine query may run.
//!
//! # Strength Schemes
//!
//! | Scheme | UCI options                                        |
//! |--------|----------------------------------------------------|
//! | Level  | `Skill Level = min(20, (level - 1) * 2)`, no limit |
//! | Elo    | `UCI_LimitStrength = true`, `UCI_Elo = elo`        |
//!
//! The two schemes are mutually exclusive; the chosen one is pushed to the
//! engine once per new game and never mid-game.
//!
//! # Search Budgets
//!
//! | Query      | Time  |
//! |------------|-------|
//! | Reply move | 500ms |
//! | Hint       | 500ms |
//! | Evaluation | 100ms |
//!
//! The evaluation budget is kept shorter than the reply budget so grading a
//! move never costs more than the opponent's own search.

use std::time::Duration;

/// Weakest preset level
pub const MIN_LEVEL: u8 = 1;
/// Strongest preset level
pub const MAX_LEVEL: u8 = 8;
/// Lowest rating the engine accepts in limited-strength mode
pub const MIN_ELO: u16 = 1350;
/// Highest rating the engine accepts in limited-strength mode
pub const MAX_ELO: u16 = 3190;
/// Highest skill value the engine understands
pub const MAX_SKILL: u8 = 20;

/// Engine strength configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStrength {
    /// Discrete preset, 1 (weakest) to 8
    Level(u8),
    /// Rating-limited play, clamped to [`MIN_ELO`]..=[`MAX_ELO`]
    Elo(u16),
}

impl EngineStrength {
    /// Map a preset level onto the engine's 0-20 skill scale
    pub fn skill_for_level(level: u8) -> u8 {
        let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        ((level - 1) * 2).min(MAX_SKILL)
    }

    /// UCI `setoption` name/value pairs for this strength
    pub fn uci_options(&self) -> Vec<(&'static str, String)> {
        match *self {
            EngineStrength::Level(level) => vec![
                ("Skill Level", Self::skill_for_level(level).to_string()),
                ("UCI_LimitStrength", "false".to_string()),
            ],
            EngineStrength::Elo(elo) => vec![
                ("UCI_LimitStrength", "true".to_string()),
                ("UCI_Elo", elo.clamp(MIN_ELO, MAX_ELO).to_string()),
            ],
        }
    }

    pub fn description(&self) -> String {
        match self {
            EngineStrength::Level(level) => format!("Level {level}"),
            EngineStrength::Elo(elo) => format!("Elo {elo}"),
        }
    }
}

/// Time budget for a single engine query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimit {
    pub movetime: Duration,
}

impl SearchLimit {
    /// Opponent move selection
    pub const REPLY: SearchLimit = SearchLimit {
        movetime: Duration::from_millis(500),
    };

    /// Hint lookup for the human
    pub const HINT: SearchLimit = SearchLimit {
        movetime: Duration::from_millis(500),
    };

    /// Post-move evaluation used for move grading
    pub const EVALUATION: SearchLimit = SearchLimit {
        movetime: Duration::from_millis(100),
    };

    pub fn millis(&self) -> u128 {
        self.movetime.as_millis()
    }
}
