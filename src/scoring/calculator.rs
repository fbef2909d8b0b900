//! Score, grade and star calculation.
//!
//! All functions are pure: the same inputs always give the same outputs.
//!
//! ## Terms
//!
//! - `slack = moves_allowed - optimal_moves`: room the budget leaves.
//! - `delta = moves_used - optimal_moves`: how far the player overran the
//!   reference solution. Beating the reference counts as `delta = 0`.
//!
//! ## Level score
//!
//! ```text
//! x          = 1 - delta / slack        (clamped to 0..=1; exact-or-nothing if slack <= 0)
//! d          = (difficulty - 70) / 30   (clamped to 0..=1)
//! base       = 60 + 60 * d^0.7
//! multiplier = 0.10 + 1.90 * x^4
//! score      = round(base * multiplier) + clean bonus
//! ```
//!
//! The quartic term makes any overrun expensive.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::config::ScoringConfig;
use super::grade::Grade;
use crate::error::{Error, Result};

/// Inputs for scoring one finished level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelScoreInput {
    pub optimal_moves: i32,
    /// Move budget; zero or negative for unlimited.
    pub moves_allowed: i32,
    pub moves_used: i32,
    /// Difficulty rating, 0-100.
    pub difficulty: i32,
    /// Solved without undo, restart or hints.
    pub clean: bool,
}

impl LevelScoreInput {
    fn validate(&self) -> Result<()> {
        check_non_negative("optimal_moves", self.optimal_moves)?;
        check_non_negative("moves_used", self.moves_used)?;
        if !(0..=100).contains(&self.difficulty) {
            return Err(Error::invalid_argument(format!(
                "difficulty {} outside 0..=100",
                self.difficulty
            )));
        }
        Ok(())
    }

    fn slack(&self) -> i64 {
        i64::from(self.moves_allowed) - i64::from(self.optimal_moves)
    }

    fn delta(&self) -> i64 {
        (i64::from(self.moves_used) - i64::from(self.optimal_moves)).max(0)
    }
}

/// Intermediate values of a level score, for end-of-level display.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Performance factor `x` in `0..=1`.
    pub performance: f64,
    /// Difficulty-derived base score.
    pub base: f64,
    /// Performance multiplier.
    pub multiplier: f64,
    /// Clean-solve bonus awarded (0 if not clean).
    pub clean_bonus: i64,
    /// Final level score.
    pub total: i64,
}

/// Score calculator.
///
/// Holds a validated `ScoringConfig`; every method is a pure function of its
/// arguments and that config. Serializes as the config itself, and
/// deserializing validates it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScoringConfig", into = "ScoringConfig")]
pub struct ScoreCalculator {
    config: ScoringConfig,
}

impl TryFrom<ScoringConfig> for ScoreCalculator {
    type Error = Error;

    fn try_from(config: ScoringConfig) -> Result<Self> {
        Self::new(config)
    }
}

impl From<ScoreCalculator> for ScoringConfig {
    fn from(calculator: ScoreCalculator) -> Self {
        calculator.config
    }
}

impl ScoreCalculator {
    /// Create a calculator with the given configuration.
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// `optimal / max(used, optimal)`, or 1 when there is no reference
    /// solution.
    ///
    /// ```
    /// use bottle_sort::scoring::ScoreCalculator;
    ///
    /// let calc = ScoreCalculator::default();
    /// assert_eq!(calc.efficiency(10, 20).unwrap(), 0.5);
    /// ```
    pub fn efficiency(&self, optimal_moves: i32, moves_used: i32) -> Result<f64> {
        check_non_negative("optimal_moves", optimal_moves)?;
        check_non_negative("moves_used", moves_used)?;
        if optimal_moves == 0 {
            return Ok(1.0);
        }
        Ok(f64::from(optimal_moves) / f64::from(moves_used.max(optimal_moves)))
    }

    /// Letter grade for an efficiency ratio.
    #[must_use]
    pub fn grade(&self, efficiency: f64) -> Grade {
        let g = &self.config.grades;
        if efficiency >= g.s {
            Grade::S
        } else if efficiency >= g.a {
            Grade::A
        } else if efficiency >= g.b {
            Grade::B
        } else if efficiency >= g.c {
            Grade::C
        } else if efficiency >= g.d {
            Grade::D
        } else {
            Grade::E
        }
    }

    /// Star rating, 0-5.
    pub fn stars(&self, optimal_moves: i32, moves_allowed: i32, moves_used: i32) -> Result<u8> {
        let input = LevelScoreInput {
            optimal_moves,
            moves_allowed,
            moves_used,
            difficulty: 0,
            clean: false,
        };
        input.validate()?;

        let delta = input.delta();
        let slack = input.slack();
        if delta == 0 {
            return Ok(5);
        }
        if slack <= 0 {
            return Ok(0);
        }

        // delta / slack <= k * band, kept in integers so band edges are exact.
        let band = self.config.star_band_percent;
        let stars = (1..=4)
            .find(|k| delta * 100 <= slack * band * k)
            .map_or(0, |k| 5 - k as u8);
        Ok(stars)
    }

    /// Level score with its intermediate terms.
    pub fn score_breakdown(&self, input: &LevelScoreInput) -> Result<ScoreBreakdown> {
        input.validate()?;
        let c = &self.config;

        let slack = input.slack();
        let delta = input.delta();
        let performance = if slack <= 0 {
            if delta == 0 { 1.0 } else { 0.0 }
        } else {
            clamp01(1.0 - delta as f64 / slack as f64)
        };

        let d = clamp01((f64::from(input.difficulty) - c.difficulty_floor) / c.difficulty_span);
        let base = c.base_score_min + c.base_score_range * d.powf(c.difficulty_exponent);
        let multiplier = c.multiplier_floor + c.multiplier_range * performance.powi(c.performance_exponent);
        let clean_bonus = if input.clean { c.clean_bonus } else { 0 };
        let total = ((base * multiplier).round() as i64 + clean_bonus).max(0);

        trace!(performance, base, multiplier, clean_bonus, total, "level score");
        Ok(ScoreBreakdown {
            performance,
            base,
            multiplier,
            clean_bonus,
            total,
        })
    }

    /// Final score for one level.
    pub fn level_score(&self, input: &LevelScoreInput) -> Result<i64> {
        Ok(self.score_breakdown(input)?.total)
    }

    /// Fold a level score into a running total.
    ///
    /// The increment shrinks as the total nears the cap, so the cap is
    /// approached rather than hit.
    pub fn accumulate_total(&self, current_total: i64, level_score: i64) -> Result<i64> {
        if current_total < 0 {
            return Err(Error::invalid_argument("current total must not be negative"));
        }
        let cap = self.config.total_cap;
        let decay = 1.0 - current_total as f64 / cap as f64;
        let increment = ((level_score as f64 * decay).round() as i64).max(0);
        Ok(cap.min(current_total.saturating_add(increment)))
    }
}

fn check_non_negative(name: &str, value: i32) -> Result<()> {
    if value < 0 {
        return Err(Error::invalid_argument(format!("{name} must not be negative, got {value}")));
    }
    Ok(())
}

fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}
