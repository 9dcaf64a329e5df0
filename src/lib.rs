//! OmniChess - play chess against a UCI engine
//!
//! # Modules
//!
//! - [`core`] - Settings, phases and settings persistence
//! - [`game`] - The session controller, engine orchestration and game rules glue
//! - [`input`] - Pointer geometry and terminal commands
//! - [`ui`] - Text rendering of the board, sidebar and menu

pub mod core;
pub mod game;
pub mod input;
pub mod ui;

pub use game::{ClickOutcome, HintOutcome, Session};
