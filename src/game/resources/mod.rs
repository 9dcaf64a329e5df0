//! Chess game resources - per-game state owned by the session
//!
//! Each resource is a plain struct held by [`crate::game::session::Session`]
//! and rebuilt whenever a new game starts. None of them talk to the engine;
//! the session feeds them engine results.
//!
//! # Resource Categories
//!
//! ## Player Interaction
//! - [`Selection`] - Currently selected square and its destinations
//! - [`LegalMoveSet`] - Legal moves keyed by origin, destination, promotion
//! - [`PendingPromotion`] - Pawn move awaiting its promotion piece
//!
//! ## Game History
//! - [`MoveHistory`] - SAN record for display, replay and PGN export
//! - [`CapturedPieces`] - Material tracking and advantage calculation
//! - [`RepetitionTracker`] - Position occurrence counts for fivefold repetition
//!
//! ## Game Timing
//! - [`GameClock`] - Per-side countdown
//!
//! ## Assessment
//! - [`EvalTracker`] - White-positive score and move quality grade
//! - [`HintGuard`] - Hint budget and forfeiture
//!
//! ## Game Status
//! - [`GameStatus`] - Derived terminal conditions

pub mod captured;
pub mod evaluation;
pub mod game_over;
pub mod hint_guard;
pub mod history;
pub mod promotion;
pub mod repetition;
pub mod selection;
pub mod timer;

#[cfg(test)]
mod tests;

// Re-export all resources for convenience
pub use captured::*;
pub use evaluation::*;
pub use game_over::*;
pub use hint_guard::*;
pub use history::*;
pub use promotion::*;
pub use repetition::*;
pub use selection::*;
pub use timer::*;
