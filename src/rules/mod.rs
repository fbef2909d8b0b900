//! Move rules.
//!
//! `MoveRules` decides how much liquid a move may transfer within a level.
//! Per-bottle physics lives in `Bottle`; this seam is where level-wide policy
//! goes, so such rules never need to be pushed down into the bottle.

pub mod engine;

pub use engine::{pour_amount, MoveRules, StandardRules};
