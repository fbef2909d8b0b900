//! Best-record tracking against a persisted record collection.
//!
//! Each field of a stored record improves independently and never regresses:
//!
//! - `best_moves`: lower positive count wins (zero/absent means none yet)
//! - `best_efficiency`: strictly greater wins
//! - `best_grade`: strictly higher rank wins

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::record::{Improvement, LevelPerformanceRecord};
use crate::error::{Error, Result};

/// Find the record for `level_index`.
///
/// # Errors
///
/// `InvalidArgument` if `level_index` is not positive.
pub fn get_best(store: &[LevelPerformanceRecord], level_index: i32) -> Result<Option<&LevelPerformanceRecord>> {
    check_level_index(level_index)?;
    Ok(store.iter().find(|r| r.level_index == level_index))
}

/// Merge `incoming` into the store, keeping the best of each field.
///
/// # Errors
///
/// `InvalidArgument` if `incoming.level_index` is not positive.
pub fn update_best(store: &mut Vec<LevelPerformanceRecord>, incoming: &LevelPerformanceRecord) -> Result<Improvement> {
    check_level_index(incoming.level_index)?;

    let Some(pos) = store.iter().position(|r| r.level_index == incoming.level_index) else {
        store.push(incoming.clone());
        debug!(level = incoming.level_index, "performance record created");
        return Ok(Improvement {
            created: true,
            ..Improvement::default()
        });
    };

    let existing = &mut store[pos];
    let mut improvement = Improvement::default();

    if incoming.best_moves > 0 && (existing.best_moves <= 0 || incoming.best_moves < existing.best_moves) {
        existing.best_moves = incoming.best_moves;
        improvement.moves = true;
    }
    if incoming.best_efficiency > existing.best_efficiency {
        existing.best_efficiency = incoming.best_efficiency;
        improvement.efficiency = true;
    }
    if incoming.best_grade > existing.best_grade {
        existing.best_grade = incoming.best_grade;
        improvement.grade = true;
    }

    if improvement.any() {
        debug!(
            level = incoming.level_index,
            moves = improvement.moves,
            efficiency = improvement.efficiency,
            grade = improvement.grade,
            "performance record improved"
        );
    }
    Ok(improvement)
}

fn check_level_index(level_index: i32) -> Result<()> {
    if level_index <= 0 {
        return Err(Error::invalid_argument(format!(
            "level index must be positive, got {level_index}"
        )));
    }
    Ok(())
}

/// Owned record collection with the tracker operations.
///
/// Serializes as a plain list so it can be handed straight to persistence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerformanceTracker {
    records: Vec<LevelPerformanceRecord>,
}

impl PerformanceTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap records loaded from persistence.
    #[must_use]
    pub fn from_records(records: Vec<LevelPerformanceRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[LevelPerformanceRecord] {
        &self.records
    }

    /// Hand the records back for persistence.
    #[must_use]
    pub fn into_records(self) -> Vec<LevelPerformanceRecord> {
        self.records
    }

    pub fn get_best(&self, level_index: i32) -> Result<Option<&LevelPerformanceRecord>> {
        get_best(&self.records, level_index)
    }

    pub fn update_best(&mut self, incoming: &LevelPerformanceRecord) -> Result<Improvement> {
        update_best(&mut self.records, incoming)
    }
}
