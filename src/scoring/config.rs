//! Scoring configuration.
//!
//! Every constant the scoring formulas use lives here so they can be tuned
//! without touching the code that applies them. Defaults match shipped
//! content; a TOML file may override any subset.
//!
//! ```
//! use bottle_sort::scoring::ScoringConfig;
//!
//! let config = ScoringConfig::from_toml_str(r#"
//!     clean_bonus = 40
//!
//!     [grades]
//!     a = 0.95
//! "#).unwrap();
//!
//! assert_eq!(config.clean_bonus, 40);
//! assert_eq!(config.grades.a, 0.95);
//! assert_eq!(config.total_cap, 999_999);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum efficiency for each grade above E.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeThresholds {
    pub s: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            s: 1.0,
            a: 0.9,
            b: 0.8,
            c: 0.66,
            d: 0.5,
        }
    }
}

/// Complete scoring configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Difficulty at which the base score starts rising.
    pub difficulty_floor: f64,

    /// Width of the difficulty band above the floor.
    pub difficulty_span: f64,

    /// Exponent applied to normalized difficulty.
    pub difficulty_exponent: f64,

    /// Base score at or below the difficulty floor.
    pub base_score_min: f64,

    /// Extra base score at the top of the difficulty band.
    pub base_score_range: f64,

    /// Performance multiplier for the worst result.
    pub multiplier_floor: f64,

    /// Extra multiplier for a perfect result.
    pub multiplier_range: f64,

    /// Exponent applied to the performance factor.
    pub performance_exponent: i32,

    /// Flat bonus for a solve without undo, restart or hints.
    pub clean_bonus: i64,

    /// Width of each star band, as a percentage of slack.
    pub star_band_percent: i64,

    /// Ceiling for the running total score.
    pub total_cap: i64,

    /// Efficiency thresholds for letter grades.
    pub grades: GradeThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            difficulty_floor: 70.0,
            difficulty_span: 30.0,
            difficulty_exponent: 0.7,
            base_score_min: 60.0,
            base_score_range: 60.0,
            multiplier_floor: 0.10,
            multiplier_range: 1.90,
            performance_exponent: 4,
            clean_bonus: 25,
            star_band_percent: 20,
            total_cap: 999_999,
            grades: GradeThresholds::default(),
        }
    }
}

impl ScoringConfig {
    /// Parses configuration from a TOML string and validates it.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read or is invalid.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Checks that the constants describe a usable scoring curve.
    pub fn validate(&self) -> Result<()> {
        let g = &self.grades;
        if !(g.s >= g.a && g.a >= g.b && g.b >= g.c && g.c >= g.d) {
            return Err(Error::Config("grade thresholds must be non-increasing from S to D".into()));
        }
        if self.difficulty_span <= 0.0 {
            return Err(Error::Config("difficulty_span must be positive".into()));
        }
        if self.star_band_percent <= 0 {
            return Err(Error::Config("star_band_percent must be positive".into()));
        }
        if self.total_cap <= 0 {
            return Err(Error::Config("total_cap must be positive".into()));
        }
        if self.performance_exponent < 1 {
            return Err(Error::Config("performance_exponent must be at least 1".into()));
        }
        Ok(())
    }
}
