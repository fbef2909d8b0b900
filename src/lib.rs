//! # bottle-sort
//!
//! Rules engine for a bottle-sorting liquid puzzle.
//!
//! ## Design Principles
//!
//! 1. **Single mutator**: bottles change only through `Bottle::pour_into`,
//!    and levels only through `LevelState::try_apply_move`.
//!
//! 2. **Derived status**: win and fail are computed from bottle contents and
//!    counters on demand; nothing caches them.
//!
//! 3. **Illegal moves are not errors**: a rejected pour is a `0` amount or
//!    `None`. `Err` is reserved for caller contract violations.
//!
//! 4. **Configuration over constants**: every scoring constant lives in
//!    `ScoringConfig`.
//!
//! ## Example
//!
//! ```
//! use bottle_sort::{LevelMeta, LevelState, LevelStatus, ScoreCalculator};
//!
//! let meta = LevelMeta::new(1).with_moves_allowed(4).with_optimal_moves(1);
//! let mut level = LevelState::parse(&["RRB.", "B...", "RR.."], &[], meta).unwrap();
//!
//! assert_eq!(level.try_apply_move(0, 1).map(|p| p.amount), Some(1));
//! assert_eq!(level.status(), LevelStatus::InProgress);
//!
//! let calc = ScoreCalculator::default();
//! let score = calc.level_score(&level.score_input(true)).unwrap();
//! assert!(score > 0);
//! ```
//!
//! ## Modules
//!
//! - `core`: Colors, bottles, level state
//! - `rules`: Move legality (`MoveRules` trait)
//! - `scoring`: Efficiency, grades, stars, level score, session total
//! - `progress`: Best-ever per-level records

pub mod error;
pub mod core;
pub mod rules;
pub mod scoring;
pub mod progress;

// Re-export commonly used types
pub use crate::error::{Error, Result};

pub use crate::core::{Bottle, Color, LevelMeta, LevelState, LevelStatus, Pour};

pub use crate::rules::{pour_amount, MoveRules, StandardRules};

pub use crate::scoring::{
    Grade, GradeThresholds, LevelScoreInput, ScoreBreakdown, ScoreCalculator,
    ScoreSession, ScoringConfig, SessionPhase,
};

pub use crate::progress::{
    get_best, update_best, Improvement, LevelPerformanceRecord, PerformanceTracker,
};
