//! Liquid colors.
//!
//! Colors are opaque identifiers: the engine only ever compares them for
//! equality. Each has a one-letter form used by `Bottle::parse` and
//! `Bottle::to_repr`.

use serde::{Deserialize, Serialize};

/// One of the eight liquid colors used by level content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
    Purple,
    Orange,
    Cyan,
    Magenta,
}

impl Color {
    /// All colors in declaration order.
    pub const ALL: [Color; 8] = [
        Color::Red,
        Color::Blue,
        Color::Yellow,
        Color::Green,
        Color::Purple,
        Color::Orange,
        Color::Cyan,
        Color::Magenta,
    ];

    /// Single-letter form of this color.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Purple => 'P',
            Color::Orange => 'O',
            Color::Cyan => 'C',
            Color::Magenta => 'M',
        }
    }

    /// Parse a color from its letter (case-insensitive).
    #[must_use]
    pub fn from_letter(ch: char) -> Option<Self> {
        let up = ch.to_ascii_uppercase();
        Self::ALL.into_iter().find(|c| c.letter() == up)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
