//! Core puzzle types: colors, bottles, and level state.
//!
//! This module owns all liquid state. Everything that changes a bottle goes
//! through `Bottle::pour_into`, and everything that changes a level goes
//! through `LevelState::try_apply_move`.

pub mod color;
pub mod bottle;
pub mod level;

pub use color::Color;
pub use bottle::{Bottle, Slots};
pub use level::{LevelMeta, LevelState, LevelStatus, Pour};
