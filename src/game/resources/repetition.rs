//! Position repetition tracking
//!
//! Counts how often each position occurred in the current game. Positions
//! are keyed by Zobrist hash over placement, side to move, castling rights
//! and a legal en passant square, so the counts match the repetition rules.
//! The fifth occurrence of a position ends the game as a draw.

use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Chess, EnPassantMode};
use std::collections::HashMap;

/// Occurrences of one position that end the game
pub const FIVEFOLD: u32 = 5;

/// Per-game occurrence counts, starting position included
#[derive(Debug, Default, Clone)]
pub struct RepetitionTracker {
    counts: HashMap<Zobrist64, u32>,
}

impl RepetitionTracker {
    /// Tracker with `start` already counted once
    pub fn new(start: &Chess) -> Self {
        let mut tracker = Self::default();
        tracker.record(start);
        tracker
    }

    fn key(position: &Chess) -> Zobrist64 {
        position.zobrist_hash(EnPassantMode::Legal)
    }

    /// Count one more occurrence of `position`, returning the new total
    pub fn record(&mut self, position: &Chess) -> u32 {
        let count = self.counts.entry(Self::key(position)).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, position: &Chess) -> u32 {
        self.counts.get(&Self::key(position)).copied().unwrap_or(0)
    }

    /// Whether `position` has now occurred five times
    pub fn is_fivefold(&self, position: &Chess) -> bool {
        self.count(position) >= FIVEFOLD
    }

    pub fn reset(&mut self, start: &Chess) {
        self.counts.clear();
        self.record(start);
    }
}
