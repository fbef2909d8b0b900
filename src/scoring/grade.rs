//! Letter grades.

use serde::{Deserialize, Serialize};

/// Six-tier letter grade, ordered worst to best.
///
/// The derived ordering is the ranking: `Grade::E < Grade::S`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    E,
    D,
    C,
    B,
    A,
    S,
}

impl Grade {
    /// All grades, worst first.
    pub const ALL: [Grade; 6] = [Grade::E, Grade::D, Grade::C, Grade::B, Grade::A, Grade::S];

    /// Ordinal rank, 0 for E up to 5 for S.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Grade::E => "E",
            Grade::D => "D",
            Grade::C => "C",
            Grade::B => "B",
            Grade::A => "A",
            Grade::S => "S",
        };
        f.write_str(letter)
    }
}
