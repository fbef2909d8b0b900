//! Per-level best-performance records.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scoring::{Grade, ScoreCalculator};

/// Best results ever achieved on one level.
///
/// Persistence owns the collection; `progress::update_best` only ever moves
/// each field towards a better value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelPerformanceRecord {
    /// 1-based level number.
    pub level_index: i32,

    /// Fewest moves used to solve. Zero means no solve recorded.
    pub best_moves: i32,

    /// Highest efficiency ratio reached.
    pub best_efficiency: f64,

    /// Highest grade reached, if any.
    pub best_grade: Option<Grade>,
}

impl LevelPerformanceRecord {
    /// Record describing a single finished attempt.
    pub fn from_attempt(
        level_index: i32,
        optimal_moves: i32,
        moves_used: i32,
        calculator: &ScoreCalculator,
    ) -> Result<Self> {
        let efficiency = calculator.efficiency(optimal_moves, moves_used)?;
        Ok(Self {
            level_index,
            best_moves: moves_used,
            best_efficiency: efficiency,
            best_grade: Some(calculator.grade(efficiency)),
        })
    }
}

/// Which fields an update improved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Improvement {
    /// No record existed; the incoming one was stored as is.
    pub created: bool,
    pub moves: bool,
    pub efficiency: bool,
    pub grade: bool,
}

impl Improvement {
    /// Whether anything in the store changed.
    #[must_use]
    pub fn any(&self) -> bool {
        self.created || self.moves || self.efficiency || self.grade
    }
}
