//! Hint budget and anti-cheat guard
//!
//! Every accepted hint request counts against a fixed budget. The request
//! that exceeds it forfeits the game; forfeiture is permanent for the rest
//! of the game and only a new game clears it.

use shakmaty::Move;
use tracing::warn;

/// Hints allowed per game before forfeiture
pub const HINT_BUDGET: u32 = 3;

/// Hint counter and current suggestion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HintGuard {
    pub hints_used: u32,
    pub forfeited: bool,
    /// Suggested move, cleared by the next executed move
    pub hint_move: Option<Move>,
}

impl HintGuard {
    /// Count a hint request
    ///
    /// Returns `true` while still within budget. The request that pushes the
    /// count past [`HINT_BUDGET`] sets `forfeited` and returns `false`.
    pub fn try_consume(&mut self) -> bool {
        if self.forfeited {
            return false;
        }
        self.hints_used += 1;
        if self.hints_used > HINT_BUDGET {
            self.forfeited = true;
            self.hint_move = None;
            warn!(
                "[HINT] Hint budget exceeded ({} > {}), game forfeited",
                self.hints_used, HINT_BUDGET
            );
            return false;
        }
        true
    }

    pub fn remaining(&self) -> u32 {
        HINT_BUDGET.saturating_sub(self.hints_used)
    }

    pub fn clear_hint(&mut self) {
        self.hint_move = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_then_forfeit() {
        //! Three hints are free, the fourth forfeits
        let mut guard = HintGuard::default();
        for _ in 0..HINT_BUDGET {
            assert!(guard.try_consume());
        }
        assert!(!guard.forfeited);
        assert_eq!(guard.hints_used, 3);
        assert_eq!(guard.remaining(), 0);

        assert!(!guard.try_consume());
        assert!(guard.forfeited);
    }

    #[test]
    fn test_forfeit_is_monotonic() {
        //! Further requests after forfeiture change nothing
        let mut guard = HintGuard::default();
        for _ in 0..=HINT_BUDGET {
            guard.try_consume();
        }
        let used = guard.hints_used;
        assert!(!guard.try_consume());
        assert!(guard.forfeited);
        assert_eq!(guard.hints_used, used);

        guard.reset();
        assert!(!guard.forfeited);
    }
}
