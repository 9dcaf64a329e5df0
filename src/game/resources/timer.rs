//! Game clock resource
//!
//! Per-side countdown driven by wall-clock frame deltas. Only the side to
//! move is charged, remaining time never increases, and a side reaching
//! zero has lost on time regardless of the board.

use shakmaty::Color;
use tracing::{info, warn};

/// Per-side countdown clock
#[derive(Debug, Clone, PartialEq)]
pub struct GameClock {
    pub white_time_left: f32, // in seconds
    pub black_time_left: f32,
    pub is_running: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(600)
    }
}

impl GameClock {
    /// Both sides start with `seconds`; the clock starts stopped
    pub fn new(seconds: u32) -> Self {
        Self {
            white_time_left: seconds as f32,
            black_time_left: seconds as f32,
            is_running: false,
        }
    }

    pub fn start(&mut self) {
        self.is_running = true;
    }

    pub fn stop(&mut self) {
        self.is_running = false;
    }

    pub fn remaining(&self, color: Color) -> f32 {
        match color {
            Color::White => self.white_time_left,
            Color::Black => self.black_time_left,
        }
    }

    /// Side whose flag has fallen, White checked first
    pub fn flagged(&self) -> Option<Color> {
        if self.white_time_left <= 0.0 {
            Some(Color::White)
        } else if self.black_time_left <= 0.0 {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Charge `elapsed` seconds to `side_to_move`
    ///
    /// Does nothing when stopped, for non-positive deltas, or once a flag
    /// has fallen. Returns the side whose flag fell on this tick.
    pub fn tick(&mut self, side_to_move: Color, elapsed: f32) -> Option<Color> {
        if !self.is_running || elapsed <= 0.0 || self.flagged().is_some() {
            return None;
        }

        let time_left = match side_to_move {
            Color::White => &mut self.white_time_left,
            Color::Black => &mut self.black_time_left,
        };
        let time_before = *time_left;
        *time_left -= elapsed;
        let time_after = *time_left;

        if time_before > 10.0 && time_after <= 10.0 {
            warn!("[TIMER] {:?} has 10 seconds remaining!", side_to_move);
        } else if time_before > 30.0 && time_after <= 30.0 {
            info!("[TIMER] {:?} has 30 seconds remaining", side_to_move);
        }

        if time_after <= 0.0 {
            self.is_running = false;
            info!("[TIMER] ========== TIME OUT! ==========");
            info!(
                "[TIMER] {:?} ran out of time! Final: W:{:.1}s B:{:.1}s",
                side_to_move,
                self.white_time_left.max(0.0),
                self.black_time_left.max(0.0)
            );
            return Some(side_to_move);
        }
        None
    }
}

/// Format remaining seconds as `mm:ss`, floored at zero
pub fn format_clock(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}
