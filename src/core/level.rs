//! Level state: bottles, move counters, and win/fail detection.
//!
//! ## Status is derived
//!
//! `LevelState` stores no status field. `is_win`, `is_fail` and `status` are
//! recomputed from the bottles and counters on every call, so they can never
//! drift from the data.
//!
//! ## Mutation
//!
//! `try_apply_move` (and `try_apply_move_with`) is the only way gameplay
//! changes a level. A rejected move leaves the state untouched; an accepted
//! move pours and bumps `moves_used` by exactly one.
//!
//! ## Snapshots
//!
//! `Clone` deep-copies every bottle, so a search can branch from a snapshot
//! without affecting the original.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::bottle::Bottle;
use super::color::Color;
use crate::error::{Error, Result};
use crate::rules::{MoveRules, StandardRules};
use crate::scoring::LevelScoreInput;

/// Level metadata supplied by content generation.
///
/// Immutable once the level is constructed. `background` is opaque to the
/// engine and passed through for presentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMeta {
    /// 1-based level number.
    pub level_index: i32,

    /// Move budget. Zero or negative means unlimited.
    pub moves_allowed: i32,

    /// Length of the reference solution.
    pub optimal_moves: i32,

    /// Generator seed the layout was produced from.
    pub seed: u64,

    /// Number of scramble steps the generator applied.
    pub scramble_moves: i32,

    /// Difficulty rating, 0-100.
    pub difficulty: i32,

    /// Visual/background index (presentation only).
    pub background: u32,
}

impl LevelMeta {
    /// Metadata for `level_index` with unlimited moves and no reference solution.
    pub fn new(level_index: i32) -> Self {
        Self {
            level_index,
            moves_allowed: 0,
            optimal_moves: 0,
            seed: 0,
            scramble_moves: 0,
            difficulty: 0,
            background: 0,
        }
    }

    #[must_use]
    pub fn with_moves_allowed(mut self, moves_allowed: i32) -> Self {
        self.moves_allowed = moves_allowed;
        self
    }

    #[must_use]
    pub fn with_optimal_moves(mut self, optimal_moves: i32) -> Self {
        self.optimal_moves = optimal_moves;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_scramble_moves(mut self, scramble_moves: i32) -> Self {
        self.scramble_moves = scramble_moves;
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: i32) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: u32) -> Self {
        self.background = background;
        self
    }

    /// Whether the level has no move budget.
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.moves_allowed <= 0
    }

    fn validate(&self) -> Result<()> {
        if self.level_index <= 0 {
            return Err(Error::invalid_argument(format!(
                "level index must be positive, got {}",
                self.level_index
            )));
        }
        if self.optimal_moves < 0 {
            return Err(Error::invalid_argument("optimal_moves must not be negative"));
        }
        if self.scramble_moves < 0 {
            return Err(Error::invalid_argument("scramble_moves must not be negative"));
        }
        if !(0..=100).contains(&self.difficulty) {
            return Err(Error::invalid_argument(format!(
                "difficulty {} outside 0..=100",
                self.difficulty
            )));
        }
        Ok(())
    }
}

/// Derived level status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelStatus {
    InProgress,
    Won,
    Failed,
}

/// A single pour between two bottles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pour {
    pub source: usize,
    pub target: usize,
    pub amount: usize,
}

/// State of one attempt at a level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LevelStateWire")]
pub struct LevelState {
    bottles: Vec<Bottle>,
    moves_used: i32,
    meta: LevelMeta,
}

#[derive(Deserialize)]
struct LevelStateWire {
    bottles: Vec<Bottle>,
    moves_used: i32,
    meta: LevelMeta,
}

impl TryFrom<LevelStateWire> for LevelState {
    type Error = Error;

    fn try_from(value: LevelStateWire) -> Result<Self> {
        if value.moves_used < 0 {
            return Err(Error::invalid_argument("moves_used must not be negative"));
        }
        let mut state = Self::new(&value.bottles, value.meta)?;
        state.moves_used = value.moves_used;
        Ok(state)
    }
}

impl LevelState {
    /// Start an attempt. Every bottle is cloned; the caller's bottles are
    /// never shared with the level.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `bottles` is empty or `meta` carries a
    /// non-positive level index, a negative counter or an out-of-range
    /// difficulty.
    pub fn new(bottles: &[Bottle], meta: LevelMeta) -> Result<Self> {
        if bottles.is_empty() {
            return Err(Error::invalid_argument("a level needs at least one bottle"));
        }
        meta.validate()?;
        Ok(Self {
            bottles: bottles.to_vec(),
            moves_used: 0,
            meta,
        })
    }

    /// Build a level from layout strings (see `Bottle::parse`). Sink bottles
    /// are listed by index.
    ///
    /// ```
    /// use bottle_sort::core::{LevelMeta, LevelState};
    ///
    /// let level = LevelState::parse(&["RRRR", "...."], &[], LevelMeta::new(1)).unwrap();
    /// assert!(level.is_win());
    /// ```
    pub fn parse(layouts: &[&str], sinks: &[usize], meta: LevelMeta) -> Result<Self> {
        let bottles = layouts
            .iter()
            .enumerate()
            .map(|(i, repr)| Bottle::parse(repr, sinks.contains(&i)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(&bottles, meta)
    }

    // === Accessors ===

    #[must_use]
    pub fn bottles(&self) -> &[Bottle] {
        &self.bottles
    }

    #[must_use]
    pub fn bottle(&self, index: usize) -> Option<&Bottle> {
        self.bottles.get(index)
    }

    #[must_use]
    pub fn bottle_count(&self) -> usize {
        self.bottles.len()
    }

    #[must_use]
    pub fn meta(&self) -> &LevelMeta {
        &self.meta
    }

    #[must_use]
    pub fn moves_used(&self) -> i32 {
        self.moves_used
    }

    /// Moves left in the budget, `None` for unlimited levels.
    #[must_use]
    pub fn moves_remaining(&self) -> Option<i32> {
        if self.meta.is_unlimited() {
            None
        } else {
            Some((self.meta.moves_allowed - self.moves_used).max(0))
        }
    }

    /// Units of each color currently in play.
    #[must_use]
    pub fn color_counts(&self) -> FxHashMap<Color, usize> {
        let mut counts = FxHashMap::default();
        for color in self.bottles.iter().flat_map(|b| b.slots().iter().flatten()) {
            *counts.entry(*color).or_insert(0) += 1;
        }
        counts
    }

    /// Total filled slots across all bottles.
    #[must_use]
    pub fn total_liquid(&self) -> usize {
        self.bottles.iter().map(Bottle::filled).sum()
    }

    // === Status ===

    /// Every non-empty bottle is full and a single color.
    ///
    /// Sinks get no exemption: a sealed sink holding mixed colors keeps the
    /// level unwon for good.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.bottles.iter().all(|b| b.is_empty() || b.is_solved())
    }

    /// Whether the attempt has failed.
    ///
    /// Budgeted levels fail once the budget is spent without a win.
    /// Unlimited levels report failure as soon as any move has been made
    /// without a win, which includes ordinary mid-game positions. Callers
    /// should treat this as advisory on unlimited levels.
    #[must_use]
    pub fn is_fail(&self) -> bool {
        if self.is_win() {
            return false;
        }
        if self.meta.is_unlimited() {
            self.moves_used > 0
        } else {
            self.moves_used >= self.meta.moves_allowed
        }
    }

    #[must_use]
    pub fn status(&self) -> LevelStatus {
        if self.is_win() {
            LevelStatus::Won
        } else if self.is_fail() {
            LevelStatus::Failed
        } else {
            LevelStatus::InProgress
        }
    }

    // === Moves ===

    /// Every move the standard rules currently allow.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Pour> {
        StandardRules.legal_moves(self)
    }

    /// Pour from `source` into `target` under the standard rules.
    ///
    /// Returns the applied pour, or `None` if the move was rejected (in
    /// which case nothing changed).
    pub fn try_apply_move(&mut self, source: usize, target: usize) -> Option<Pour> {
        self.try_apply_move_with(&StandardRules, source, target)
    }

    /// Pour from `source` into `target` under the given rules.
    pub fn try_apply_move_with<R>(&mut self, rules: &R, source: usize, target: usize) -> Option<Pour>
    where
        R: MoveRules + ?Sized,
    {
        let amount = rules.pour_amount(self, source, target);
        if amount == 0 {
            debug!(source, target, "move rejected");
            return None;
        }

        let (src, dst) = self.bottle_pair_mut(source, target)?;
        if let Err(err) = src.pour_into(dst, amount) {
            warn!(source, target, amount, %err, "rules allowed a pour the bottles refused");
            return None;
        }

        self.moves_used += 1;
        debug!(source, target, amount, moves_used = self.moves_used, "move applied");
        Some(Pour { source, target, amount })
    }

    /// Mutable access to two distinct bottles at once.
    fn bottle_pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Bottle, &mut Bottle)> {
        let len = self.bottles.len();
        if a == b || a >= len || b >= len {
            return None;
        }
        if a < b {
            let (lo, hi) = self.bottles.split_at_mut(b);
            Some((&mut lo[a], &mut hi[0]))
        } else {
            let (lo, hi) = self.bottles.split_at_mut(a);
            Some((&mut hi[0], &mut lo[b]))
        }
    }

    // === Scoring ===

    /// Scoring inputs for this attempt as it stands now.
    #[must_use]
    pub fn score_input(&self, clean: bool) -> LevelScoreInput {
        LevelScoreInput {
            optimal_moves: self.meta.optimal_moves,
            moves_allowed: self.meta.moves_allowed,
            moves_used: self.moves_used,
            difficulty: self.meta.difficulty,
            clean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(layouts: &[&str], meta: LevelMeta) -> LevelState {
        LevelState::parse(layouts, &[], meta).unwrap()
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            LevelState::new(&[], LevelMeta::new(1)),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_new_rejects_bad_meta() {
        let bottles = [Bottle::new(4, false).unwrap()];
        let meta = LevelMeta::new(1).with_optimal_moves(-1);
        assert!(matches!(LevelState::new(&bottles, meta), Err(Error::InvalidArgument(_))));

        let meta = LevelMeta::new(1).with_difficulty(101);
        assert!(matches!(LevelState::new(&bottles, meta), Err(Error::InvalidArgument(_))));

        for index in [0, -4] {
            let meta = LevelMeta::new(index);
            assert!(matches!(LevelState::new(&bottles, meta), Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let mut state = level(&["RB..", "B..."], LevelMeta::new(3).with_moves_allowed(9));
        state.try_apply_move(0, 1).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let restored: LevelState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);

        let gapped = json.replacen(r#"["Red",null"#, r#"[null,"Red""#, 1);
        assert_ne!(gapped, json);
        assert!(serde_json::from_str::<LevelState>(&gapped).is_err());

        let negative = json.replace(r#""moves_used":1"#, r#""moves_used":-1"#);
        assert!(serde_json::from_str::<LevelState>(&negative).is_err());

        let too_hard = json.replace(r#""difficulty":0"#, r#""difficulty":101"#);
        assert!(serde_json::from_str::<LevelState>(&too_hard).is_err());

        let no_bottles = json.replace(&serde_json::to_string(state.bottles()).unwrap(), "[]");
        assert!(serde_json::from_str::<LevelState>(&no_bottles).is_err());
    }

    #[test]
    fn test_new_clones_bottles() {
        let mut bottles = vec![Bottle::parse("RR..", false).unwrap(), Bottle::new(4, false).unwrap()];
        let state = LevelState::new(&bottles, LevelMeta::new(1)).unwrap();

        let (a, b) = bottles.split_at_mut(1);
        a[0].pour_into(&mut b[0], 2).unwrap();

        assert_eq!(state.bottles()[0].to_repr(), "RR..");
    }

    #[test]
    fn test_meta_builder() {
        let meta = LevelMeta::new(7)
            .with_moves_allowed(20)
            .with_optimal_moves(12)
            .with_seed(99)
            .with_scramble_moves(30)
            .with_difficulty(85)
            .with_background(3);

        assert_eq!(meta.level_index, 7);
        assert_eq!(meta.moves_allowed, 20);
        assert_eq!(meta.optimal_moves, 12);
        assert_eq!(meta.seed, 99);
        assert_eq!(meta.scramble_moves, 30);
        assert_eq!(meta.difficulty, 85);
        assert_eq!(meta.background, 3);
        assert!(!meta.is_unlimited());
        assert!(LevelMeta::new(1).is_unlimited());
    }

    #[test]
    fn test_apply_move_counts_one_per_pour() {
        let mut state = level(&["RBB.", "B..."], LevelMeta::new(1));

        let pour = state.try_apply_move(0, 1).unwrap();
        assert_eq!(pour, Pour { source: 0, target: 1, amount: 2 });
        assert_eq!(state.moves_used(), 1);
        assert_eq!(state.bottles()[1].to_repr(), "BBB.");
    }

    #[test]
    fn test_rejected_move_does_not_mutate() {
        let mut state = level(&["RB..", "R..."], LevelMeta::new(1));
        let before = state.clone();

        assert_eq!(state.try_apply_move(0, 1), None);
        assert_eq!(state.try_apply_move(0, 0), None);
        assert_eq!(state.try_apply_move(0, 9), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_pour_backwards_index_order() {
        let mut state = level(&["G...", "RGG."], LevelMeta::new(1));
        let pour = state.try_apply_move(1, 0).unwrap();
        assert_eq!(pour.amount, 2);
        assert_eq!(state.bottles()[0].to_repr(), "GGG.");
        assert_eq!(state.bottles()[1].to_repr(), "R...");
    }

    #[test]
    fn test_color_counts_and_total() {
        let state = level(&["RRB.", "B...", "...."], LevelMeta::new(1));
        let counts = state.color_counts();
        assert_eq!(counts.get(&Color::Red), Some(&2));
        assert_eq!(counts.get(&Color::Blue), Some(&2));
        assert_eq!(state.total_liquid(), 4);
    }

    #[test]
    fn test_win_requires_full_bottles() {
        assert!(level(&["RRRR", "...."], LevelMeta::new(1)).is_win());
        assert!(!level(&["RR..", "RR.."], LevelMeta::new(1)).is_win());
        assert!(!level(&["RBRB", "...."], LevelMeta::new(1)).is_win());
    }

    #[test]
    fn test_mixed_sealed_sink_blocks_win() {
        let state = LevelState::parse(&["RRRR", "GBY"], &[1], LevelMeta::new(1)).unwrap();
        assert!(state.bottles()[1].is_sealed());
        assert!(!state.is_win());
        assert!(state.legal_moves().is_empty());

        let state = LevelState::parse(&["RRRR", "GGG"], &[1], LevelMeta::new(1)).unwrap();
        assert!(state.is_win());
    }

    #[test]
    fn test_budgeted_fail() {
        let mut state = level(&["RB..", "B...", "...."], LevelMeta::new(1).with_moves_allowed(1));
        assert!(!state.is_fail());
        assert_eq!(state.moves_remaining(), Some(1));

        state.try_apply_move(0, 2).unwrap();
        assert_eq!(state.moves_remaining(), Some(0));
        assert!(state.is_fail());
        assert_eq!(state.status(), LevelStatus::Failed);
    }

    #[test]
    fn test_budget_spent_on_winning_move_is_not_fail() {
        let mut state = level(&["RRR.", "R..."], LevelMeta::new(1).with_moves_allowed(1));
        state.try_apply_move(1, 0).unwrap();
        assert!(state.is_win());
        assert!(!state.is_fail());
        assert_eq!(state.status(), LevelStatus::Won);
    }

    #[test]
    fn test_score_input() {
        let meta = LevelMeta::new(1)
            .with_moves_allowed(20)
            .with_optimal_moves(10)
            .with_difficulty(90);
        let state = level(&["RRRR"], meta);
        let input = state.score_input(true);
        assert_eq!(input.optimal_moves, 10);
        assert_eq!(input.moves_allowed, 20);
        assert_eq!(input.moves_used, 0);
        assert_eq!(input.difficulty, 90);
        assert!(input.clean);
    }
}
