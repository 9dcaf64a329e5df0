//! Chess game systems - the per-click and per-frame logic
//!
//! Each system is a plain function over borrowed resources. The session
//! controller decides when to call them; the systems decide what happens.
//!
//! # System Organization
//!
//! - [`input`] - Two-click selection resolving to a move or a promotion
//! - [`promotion`] - Completing a pending promotion
//! - [`shared`] - Move execution and post-move evaluation, used by both sides
//! - [`game_logic`] - Status derivation, check highlight and clock ticking
//!
//! # Execution Order
//!
//! ```text
//! ┌─────────────────┐
//! │ Input           │  Click resolves to a move / promotion / nothing
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ Shared          │  SAN, capture, apply, history, evaluation
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ GameLogic       │  Clock tick, status from board/clock/hints
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ Engine reply    │  When it is the engine's turn and nothing ended
//! └─────────────────┘
//! ```

pub mod game_logic;
pub mod input;
pub mod promotion;
pub mod shared;

pub use game_logic::{check_square, derive_status, update_game_clock};
pub use input::{handle_square_click, SquareClick};
pub use promotion::resolve_promotion;
pub use shared::{evaluate_position, execute_move, MoveContext};
