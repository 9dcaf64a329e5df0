//! Chess game logic module - one human against a UCI engine
//!
//! Legality, check and game-end detection are delegated to `shakmaty`;
//! move search to an external engine process. This module owns everything
//! in between: turning clicks into moves, the clock, hints, evaluation
//! grading, and the phase machine that ties them together.
//!
//! # Module Organization
//!
//! - `ai` - Engine transport, strength configuration and orchestration
//! - `resources` - Per-game state (clock, history, selection, trackers)
//! - `systems` - Click resolution, move execution, status derivation
//! - `session` - [`Session`], the controller composing all of the above
//! - `export` - PGN output
//! - `error` - [`GameError`] and the [`GameResult`] alias
//!
//! # Data Flow
//!
//! ```text
//! pointer event → Session (by phase) → systems::input → systems::shared
//!     → EvalTracker → clock switches sides → engine reply (if due)
//! ```

pub mod ai;
pub mod error;
pub mod export;
pub mod resources;
pub mod session;
pub mod systems;

pub use error::{GameError, GameResult};
pub use session::{ClickOutcome, HintOutcome, Session};
