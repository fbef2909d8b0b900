//! Scoring: efficiency, grades, stars, level scores and the session total.
//!
//! ## Overview
//!
//! - `ScoreCalculator`: pure functions from move counts to scores
//! - `ScoringConfig`: every tunable constant, loadable from TOML
//! - `ScoreSession`: running total with commit/rollback per attempt
//!
//! ## Usage
//!
//! ```rust
//! use bottle_sort::scoring::{LevelScoreInput, ScoreSession};
//!
//! let mut session = ScoreSession::new();
//! session.begin_attempt(100).unwrap();
//!
//! let input = LevelScoreInput {
//!     optimal_moves: 10,
//!     moves_allowed: 20,
//!     moves_used: 10,
//!     difficulty: 50,
//!     clean: false,
//! };
//! session.update_provisional(&input).unwrap();
//! session.fail_level();
//! assert_eq!(session.total_score(), 100);
//! ```

pub mod calculator;
pub mod config;
pub mod grade;
pub mod session;

pub use calculator::{LevelScoreInput, ScoreBreakdown, ScoreCalculator};
pub use config::{GradeThresholds, ScoringConfig};
pub use grade::Grade;
pub use session::{ScoreSession, SessionPhase};
