//! Best-ever performance per level.
//!
//! The record collection belongs to persistence; this module only reads it
//! and merges new results into it.

pub mod record;
pub mod tracker;

pub use record::{Improvement, LevelPerformanceRecord};
pub use tracker::{get_best, update_best, PerformanceTracker};
