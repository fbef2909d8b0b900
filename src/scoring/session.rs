//! Running score across a play session.
//!
//! ```text
//!            begin_attempt / reset_total
//!   Idle ─────────────────────────────────▶ AttemptInProgress
//!    ▲                                        │  update_provisional (any number of times)
//!    └──── commit_level / fail_level / ───────┘
//!          reset_attempt
//! ```
//!
//! The committed total only changes on `commit_level`. Failing or resetting
//! an attempt restores the checkpoint taken when it began.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::calculator::{LevelScoreInput, ScoreCalculator};
use crate::error::{Error, Result};

/// Session phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Idle,
    AttemptInProgress,
}

/// Score state for one play session.
///
/// Serializes together with its scoring configuration, so a restored session
/// keeps applying the same cap and decay.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "ScoreSessionWire")]
pub struct ScoreSession {
    /// Committed total as of the start of the current attempt.
    attempt_start_total_score: i64,

    /// Score of the level in progress, not yet committed.
    provisional_score: i64,

    phase: SessionPhase,

    calculator: ScoreCalculator,
}

#[derive(Deserialize)]
struct ScoreSessionWire {
    attempt_start_total_score: i64,
    provisional_score: i64,
    phase: SessionPhase,
    #[serde(default)]
    calculator: ScoreCalculator,
}

impl TryFrom<ScoreSessionWire> for ScoreSession {
    type Error = Error;

    fn try_from(value: ScoreSessionWire) -> Result<Self> {
        check_total(value.attempt_start_total_score, &value.calculator)?;
        if value.provisional_score < 0 {
            return Err(Error::invalid_argument("provisional score must not be negative"));
        }
        Ok(Self {
            attempt_start_total_score: value.attempt_start_total_score,
            provisional_score: value.provisional_score,
            phase: value.phase,
            calculator: value.calculator,
        })
    }
}

impl ScoreSession {
    /// New session with a zero total.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session resumed from a persisted total.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `total_score` is negative or above the
    /// calculator's cap.
    pub fn resume(total_score: i64, calculator: ScoreCalculator) -> Result<Self> {
        check_total(total_score, &calculator)?;
        Ok(Self {
            attempt_start_total_score: total_score,
            provisional_score: 0,
            phase: SessionPhase::Idle,
            calculator,
        })
    }

    /// Committed total score.
    #[must_use]
    pub fn total_score(&self) -> i64 {
        self.attempt_start_total_score
    }

    #[must_use]
    pub fn provisional_score(&self) -> i64 {
        self.provisional_score
    }

    #[must_use]
    pub fn attempt_start_total_score(&self) -> i64 {
        self.attempt_start_total_score
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }

    /// Total the session would have if the provisional score were committed
    /// now.
    pub fn projected_total(&self) -> Result<i64> {
        self.calculator
            .accumulate_total(self.attempt_start_total_score, self.provisional_score)
    }

    /// Checkpoint `total_score` and start an attempt.
    pub fn begin_attempt(&mut self, total_score: i64) -> Result<()> {
        check_total(total_score, &self.calculator)?;
        self.attempt_start_total_score = total_score;
        self.provisional_score = 0;
        self.phase = SessionPhase::AttemptInProgress;
        debug!(total_score, "attempt started");
        Ok(())
    }

    /// Recompute the provisional score from scratch.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` if no attempt is in progress, or any error from
    /// the calculator.
    pub fn update_provisional(&mut self, input: &LevelScoreInput) -> Result<i64> {
        self.require_attempt("update_provisional")?;
        self.provisional_score = self.calculator.level_score(input)?;
        Ok(self.provisional_score)
    }

    /// Fold the provisional score into the total and end the attempt.
    ///
    /// Returns the new total, which is also the next checkpoint.
    pub fn commit_level(&mut self) -> Result<i64> {
        self.require_attempt("commit_level")?;
        let total = self.projected_total()?;
        info!(
            level_score = self.provisional_score,
            previous_total = self.attempt_start_total_score,
            total,
            "level committed"
        );
        self.attempt_start_total_score = total;
        self.provisional_score = 0;
        self.phase = SessionPhase::Idle;
        Ok(total)
    }

    /// Discard the provisional score after a failed attempt.
    pub fn fail_level(&mut self) {
        debug!(discarded = self.provisional_score, "attempt failed");
        self.rollback();
    }

    /// Discard the provisional score after a restart.
    pub fn reset_attempt(&mut self) {
        debug!(discarded = self.provisional_score, "attempt reset");
        self.rollback();
    }

    /// Start a fresh attempt from an externally supplied total.
    pub fn reset_total(&mut self, total_score: i64) -> Result<()> {
        self.begin_attempt(total_score)
    }

    fn rollback(&mut self) {
        self.provisional_score = 0;
        self.phase = SessionPhase::Idle;
    }

    fn require_attempt(&self, op: &str) -> Result<()> {
        if self.phase != SessionPhase::AttemptInProgress {
            return Err(Error::invalid_operation(format!("{op} called with no attempt in progress")));
        }
        Ok(())
    }
}

fn check_total(total_score: i64, calculator: &ScoreCalculator) -> Result<()> {
    let cap = calculator.config().total_cap;
    if !(0..=cap).contains(&total_score) {
        return Err(Error::invalid_argument(format!(
            "total score {total_score} outside 0..={cap}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringConfig;

    fn perfect() -> LevelScoreInput {
        LevelScoreInput {
            optimal_moves: 10,
            moves_allowed: 20,
            moves_used: 10,
            difficulty: 50,
            clean: false,
        }
    }

    #[test]
    fn test_new_session() {
        let session = ScoreSession::new();
        assert_eq!(session.total_score(), 0);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_update_is_not_additive() {
        let mut session = ScoreSession::new();
        session.begin_attempt(0).unwrap();

        assert_eq!(session.update_provisional(&perfect()).unwrap(), 120);
        assert_eq!(session.update_provisional(&perfect()).unwrap(), 120);
        assert_eq!(session.provisional_score(), 120);
    }

    #[test]
    fn test_commit() {
        let mut session = ScoreSession::new();
        session.begin_attempt(0).unwrap();
        session.update_provisional(&perfect()).unwrap();

        assert_eq!(session.commit_level().unwrap(), 120);
        assert_eq!(session.total_score(), 120);
        assert_eq!(session.attempt_start_total_score(), 120);
        assert_eq!(session.provisional_score(), 0);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_fail_rolls_back() {
        let mut session = ScoreSession::new();
        session.begin_attempt(300).unwrap();
        session.update_provisional(&perfect()).unwrap();

        session.fail_level();
        assert_eq!(session.total_score(), 300);
        assert_eq!(session.provisional_score(), 0);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_idle_operations() {
        let mut session = ScoreSession::new();
        assert!(matches!(session.commit_level(), Err(Error::InvalidOperation(_))));
        assert!(matches!(
            session.update_provisional(&perfect()),
            Err(Error::InvalidOperation(_))
        ));

        session.reset_attempt();
        assert_eq!(session.total_score(), 0);
    }

    #[test]
    fn test_negative_total_rejected() {
        let mut session = ScoreSession::new();
        assert!(matches!(session.begin_attempt(-5), Err(Error::InvalidArgument(_))));
        assert!(ScoreSession::resume(-1, ScoreCalculator::default()).is_err());
    }

    #[test]
    fn test_reset_total() {
        let mut session = ScoreSession::resume(50, ScoreCalculator::default()).unwrap();
        session.reset_total(1_000).unwrap();
        assert_eq!(session.total_score(), 1_000);
        assert_eq!(session.phase(), SessionPhase::AttemptInProgress);
    }

    #[test]
    fn test_total_above_cap_rejected() {
        let mut session = ScoreSession::new();
        assert!(matches!(session.begin_attempt(1_000_000), Err(Error::InvalidArgument(_))));
        session.begin_attempt(999_999).unwrap();
    }

    #[test]
    fn test_serialization_keeps_calculator() {
        let config = ScoringConfig {
            clean_bonus: 7,
            ..ScoringConfig::default()
        };
        let mut session = ScoreSession::resume(0, ScoreCalculator::new(config).unwrap()).unwrap();
        session.begin_attempt(42).unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let restored: ScoreSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.total_score(), 42);
        assert_eq!(restored.phase(), SessionPhase::AttemptInProgress);
        assert_eq!(restored.calculator(), session.calculator());
    }

    #[test]
    fn test_deserialize_rejects_bad_state() {
        let over_cap = r#"{"attempt_start_total_score":2000000,"provisional_score":0,"phase":"Idle"}"#;
        assert!(serde_json::from_str::<ScoreSession>(over_cap).is_err());

        let bad_config = r#"{"attempt_start_total_score":0,"provisional_score":0,"phase":"Idle","calculator":{"total_cap":0}}"#;
        assert!(serde_json::from_str::<ScoreSession>(bad_config).is_err());

        let defaulted = r#"{"attempt_start_total_score":10,"provisional_score":0,"phase":"Idle"}"#;
        let session: ScoreSession = serde_json::from_str(defaulted).unwrap();
        assert_eq!(session.calculator(), &ScoreCalculator::default());
    }
}
