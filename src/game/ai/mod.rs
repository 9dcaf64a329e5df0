//! Chess engine opponent
//!
//! Integrates an external UCI engine for opponent replies, hints and move
//! evaluation. All three are blocking calls made from the session's single
//! control thread.
//!
//! # Architecture
//!
//! - `resource`: engine strength schemes and per-query search budgets
//! - `uci`: the process transport and the [`EngineBackend`] seam
//! - `orchestrator`: [`EngineOrchestrator`], the single owner of the engine
//!   handle, with the in-flight flag that gates human input
//!
//! # Turn Discipline
//!
//! The engine is asked for a reply only when it is not the human's turn,
//! the game is not over and no forfeiture is active. Exactly one query is
//! outstanding at any time.

pub mod orchestrator;
pub mod resource;
pub mod uci;

// Re-export for convenience
pub use orchestrator::{EngineOrchestrator, EngineStatistics};
pub use resource::{EngineStrength, SearchLimit, MAX_ELO, MAX_LEVEL, MAX_SKILL, MIN_ELO, MIN_LEVEL};
pub use uci::{Analysis, EngineBackend, EngineError, EngineId, EngineScore, UciEngine};
