//! Input module - pointer geometry and terminal commands
//!
//! # Architecture
//!
//! - `pointer` - Pixel to square mapping and button hit testing
//! - `console` - Line commands read from stdin, translated to session calls
//!
//! Both routes end in the same [`crate::game::Session`] operations, so a
//! typed `move e2e4` and two clicks on e2 and e4 behave identically.

pub mod console;
pub mod pointer;

// Re-export commonly used items
pub use console::{dispatch, parse_command, Command, CommandError, Dispatch};
pub use pointer::*;
