//! Core module - Session-wide configuration, phases and persistence
//!
//! Holds the pieces of the application that outlive a single game: the
//! user's chosen configuration, the top-level phase enum the session
//! controller moves through, and the settings file that carries
//! configuration across process restarts.
//!
//! # Architecture Overview
//!
//! - [`GameState`] - `Menu`, `Playing` and `Promoting` phases of a session
//! - [`GameSettings`] - Engine strength, colour, time control, theme
//! - [`settings_persistence`] - JSON load/save in the platform config dir
//! - [`error`] - [`CoreError`] and the [`CoreResult`] alias
//!
//! Game-over conditions are not phases. They are derived every frame from
//! the board, the clock and the hint guard (see
//! [`crate::game::resources::GameStatus`]).

pub mod error;
pub mod resources;
pub mod settings_persistence;
pub mod states;

// Re-export commonly used items
pub use error::{CoreError, CoreResult};
pub use resources::*;
pub use states::*;
