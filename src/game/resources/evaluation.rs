//! Evaluation tracking and move grading
//!
//! After every executed move the engine scores the new position. The score
//! is normalised to pawn units from White's point of view and compared to
//! the previous sample; the size of the swing grades the move.
//!
//! # Quality Bands
//!
//! | Swing (pawns)        | Grade       |
//! |----------------------|-------------|
//! | `delta < 0.2`        | Brilliant   |
//! | `0.2 <= delta < 0.8` | Best        |
//! | `0.8 <= delta <= 2.5`| (none)      |
//! | `delta > 2.5`        | Blunder     |
//!
//! # Mate Scores
//!
//! Mate-in-N collapses to ±[`MATE_SCORE`] so the bands above stay
//! meaningful next to forced mates.

use crate::game::ai::EngineScore;
use shakmaty::Color;

/// Magnitude mate scores saturate to, in pawns
pub const MATE_SCORE: f32 = 10.0;

/// Upper bound (exclusive) of the brilliant band
pub const BRILLIANT_BELOW: f32 = 0.2;
/// Upper bound (exclusive) of the best band
pub const BEST_BELOW: f32 = 0.8;
/// Lower bound (exclusive) of the blunder band
pub const BLUNDER_ABOVE: f32 = 2.5;

/// Grade of the last executed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveQuality {
    /// Unremarkable, or nothing graded yet
    #[default]
    None,
    Brilliant,
    Best,
    Blunder,
}

impl MoveQuality {
    /// Grade an evaluation swing
    pub fn classify(delta: f32) -> Self {
        if delta < BRILLIANT_BELOW {
            MoveQuality::Brilliant
        } else if delta < BEST_BELOW {
            MoveQuality::Best
        } else if delta > BLUNDER_ABOVE {
            MoveQuality::Blunder
        } else {
            MoveQuality::None
        }
    }

    /// Badge text, `None` for ungraded moves
    pub fn label(&self) -> Option<&'static str> {
        match self {
            MoveQuality::None => None,
            MoveQuality::Brilliant => Some("!!"),
            MoveQuality::Best => Some("Best"),
            MoveQuality::Blunder => Some("??"),
        }
    }
}

/// Convert a side-to-move relative engine score into White-positive pawns
///
/// `side_to_move` is the side to move in the analysed position, i.e. the
/// side that did not just move.
pub fn white_relative(score: EngineScore, side_to_move: Color) -> f32 {
    let relative = match score {
        EngineScore::Cp(cp) => cp as f32 / 100.0,
        EngineScore::Mate(n) if n > 0 => MATE_SCORE,
        EngineScore::Mate(_) => -MATE_SCORE,
    };
    let relative = relative.clamp(-MATE_SCORE, MATE_SCORE);
    match side_to_move {
        Color::White => relative,
        Color::Black => -relative,
    }
}

/// Fraction of the evaluation bar filled for White
///
/// Logistic curve over the clamped score; 0.5 is equality.
pub fn eval_bar_ratio(score: f32) -> f32 {
    let display = score.clamp(-MATE_SCORE, MATE_SCORE);
    1.0 / (1.0 + (-0.4 * display).exp())
}

/// Running evaluation state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalTracker {
    /// Latest White-positive score, in pawns
    pub score: f32,
    /// Score before the latest update
    pub previous_score: f32,
    /// Grade of the latest update
    pub quality: MoveQuality,
    /// Number of updates since the last reset
    pub samples: u32,
}

impl EvalTracker {
    /// Record a new White-positive score and grade the swing
    pub fn update(&mut self, new_score: f32) -> MoveQuality {
        self.previous_score = self.score;
        self.score = new_score.clamp(-MATE_SCORE, MATE_SCORE);
        self.quality = MoveQuality::classify(self.delta());
        self.samples += 1;
        self.quality
    }

    /// Absolute swing between the last two samples
    pub fn delta(&self) -> f32 {
        (self.score - self.previous_score).abs()
    }

    /// New-game reset
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Score formatted for display, e.g. `+0.3`
    pub fn display_score(&self) -> String {
        format!("{:+.1}", self.score)
    }
}
