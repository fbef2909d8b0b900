//! Move rules trait and the standard rule set.
//!
//! Rules answer one question: how many units may move from one bottle to
//! another right now. Zero means the move is illegal. Illegal moves are
//! normal player input, so rules never return errors.

use crate::core::level::{LevelState, Pour};

/// Move rules trait.
///
/// ## Implementation Notes
///
/// - `pour_amount` must be pure and must return 0 for a self-pour or an
///   out-of-range index rather than panicking.
/// - Returning more than `Bottle::max_pour_amount_into` allows is treated as
///   a rejection by `LevelState`.
pub trait MoveRules {
    /// Units that would move from `source` into `target`. Zero if illegal.
    fn pour_amount(&self, state: &LevelState, source: usize, target: usize) -> usize;

    /// Enumerate every legal move.
    ///
    /// Default implementation tries every ordered pair of bottles.
    fn legal_moves(&self, state: &LevelState) -> Vec<Pour> {
        let count = state.bottle_count();
        let mut moves = Vec::new();

        for source in 0..count {
            for target in 0..count {
                let amount = self.pour_amount(state, source, target);
                if amount > 0 {
                    moves.push(Pour { source, target, amount });
                }
            }
        }

        moves
    }
}

/// Standard rules: index validation on top of bottle physics, no extra
/// level-wide restrictions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardRules;

impl MoveRules for StandardRules {
    fn pour_amount(&self, state: &LevelState, source: usize, target: usize) -> usize {
        if source == target {
            return 0;
        }
        match (state.bottle(source), state.bottle(target)) {
            (Some(src), Some(dst)) => src.max_pour_amount_into(dst),
            _ => 0,
        }
    }
}

/// Legal pour amount under the standard rules.
#[must_use]
pub fn pour_amount(state: &LevelState, source: usize, target: usize) -> usize {
    StandardRules.pour_amount(state, source, target)
}
