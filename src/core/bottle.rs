//! Bottles: fixed-capacity stacks of liquid units.
//!
//! ## Layout
//!
//! Slot 0 is the bottom of the bottle. Liquid is always gravity-packed:
//! filled slots form a contiguous prefix and every slot above the liquid
//! line is `None`. Construction rejects layouts with gaps and `pour_into`
//! keeps both bottles packed.
//!
//! ## Pour physics
//!
//! Only the contiguous run of the top color can move, and only as much of it
//! as the receiver has room for. A bottle can never pour "through" a unit of
//! another color.
//!
//! ## Sinks
//!
//! A sink bottle accepts any color while it has space. Once full it is
//! sealed and takes no further part in pours, in either direction.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::Color;
use crate::error::{Error, Result};

/// Inline slot storage. Typical bottles hold 4-8 units.
pub type Slots = SmallVec<[Option<Color>; 8]>;

/// A fixed-capacity stack of colored liquid units.
///
/// `Clone` produces a fully independent copy; two bottles never share slot
/// storage. Deserialization goes through `from_slots`, so persisted layouts
/// are held to the same packing rules as constructed ones.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BottleWire")]
pub struct Bottle {
    slots: Slots,
    is_sink: bool,
}

#[derive(Deserialize)]
struct BottleWire {
    slots: Slots,
    is_sink: bool,
}

impl TryFrom<BottleWire> for Bottle {
    type Error = Error;

    fn try_from(value: BottleWire) -> Result<Self> {
        Self::from_slots(&value.slots, value.is_sink)
    }
}

impl Bottle {
    /// Create an empty bottle.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `capacity` is zero.
    pub fn new(capacity: usize, is_sink: bool) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid_argument("bottle capacity must be positive"));
        }
        Ok(Self {
            slots: smallvec::smallvec![None; capacity],
            is_sink,
        })
    }

    /// Create a bottle from an initial layout, bottom slot first.
    ///
    /// The slice is copied; the bottle never refers to the caller's storage.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `slots` is empty or has an empty slot below a
    /// filled one.
    pub fn from_slots(slots: &[Option<Color>], is_sink: bool) -> Result<Self> {
        if slots.is_empty() {
            return Err(Error::invalid_argument("bottle layout must have at least one slot"));
        }
        let filled = slots.iter().take_while(|s| s.is_some()).count();
        if slots[filled..].iter().any(Option::is_some) {
            return Err(Error::invalid_argument(format!(
                "bottle layout has a gap at slot {filled}"
            )));
        }
        Ok(Self {
            slots: SmallVec::from_slice(slots),
            is_sink,
        })
    }

    /// Parse a layout such as `"RRB."` (bottom first, `.` for empty).
    ///
    /// ```
    /// use bottle_sort::core::{Bottle, Color};
    ///
    /// let bottle = Bottle::parse("RRB.", false).unwrap();
    /// assert_eq!(bottle.capacity(), 4);
    /// assert_eq!(bottle.top_color(), Some(Color::Blue));
    /// assert_eq!(bottle.to_repr(), "RRB.");
    /// ```
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on unknown characters, plus everything
    /// `from_slots` rejects.
    pub fn parse(repr: &str, is_sink: bool) -> Result<Self> {
        let slots = repr
            .trim()
            .chars()
            .map(|ch| match ch {
                '.' => Ok(None),
                _ => Color::from_letter(ch).map(Some).ok_or_else(|| {
                    Error::invalid_argument(format!("unknown color letter '{ch}'"))
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_slots(&slots, is_sink)
    }

    /// Layout string, bottom first, `.` for empty slots.
    #[must_use]
    pub fn to_repr(&self) -> String {
        self.slots
            .iter()
            .map(|s| s.map_or('.', Color::letter))
            .collect()
    }

    // === Read-only queries ===

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot contents, bottom first.
    #[must_use]
    pub fn slots(&self) -> &[Option<Color>] {
        &self.slots
    }

    #[must_use]
    pub fn is_sink(&self) -> bool {
        self.is_sink
    }

    /// Number of filled slots.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.slots.iter().take_while(|s| s.is_some()).count()
    }

    #[must_use]
    pub fn free_space(&self) -> usize {
        self.capacity() - self.filled()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filled() == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free_space() == 0
    }

    /// A full sink. Sealed bottles never pour or receive again.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.is_sink && self.is_full()
    }

    /// Color of the topmost filled slot.
    #[must_use]
    pub fn top_color(&self) -> Option<Color> {
        self.slots.iter().rev().find_map(|s| *s)
    }

    /// Length of the contiguous same-color run at the top.
    #[must_use]
    pub fn top_run(&self) -> usize {
        let Some(top) = self.top_color() else {
            return 0;
        };
        self.slots
            .iter()
            .rev()
            .skip_while(|s| s.is_none())
            .take_while(|s| **s == Some(top))
            .count()
    }

    /// No two filled slots differ in color. An empty bottle qualifies.
    #[must_use]
    pub fn is_single_color_or_empty(&self) -> bool {
        let mut colors = self.slots.iter().flatten();
        match colors.next() {
            Some(first) => colors.all(|c| c == first),
            None => true,
        }
    }

    /// Full and a single color.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.is_full() && self.is_single_color_or_empty()
    }

    // === Pouring ===

    /// Whether any liquid at all could move from `self` into `target`.
    #[must_use]
    pub fn can_pour_into(&self, target: &Bottle) -> bool {
        if self.is_sealed() || target.is_sealed() || self.is_empty() || target.is_full() {
            return false;
        }
        if target.is_sink {
            return true;
        }
        match target.top_color() {
            None => true,
            top => top == self.top_color(),
        }
    }

    /// How many units a pour into `target` moves: the top run, capped by the
    /// target's free space. Zero if the pour is not allowed.
    #[must_use]
    pub fn max_pour_amount_into(&self, target: &Bottle) -> usize {
        if !self.can_pour_into(target) {
            return 0;
        }
        self.top_run().min(target.free_space())
    }

    /// Move `amount` units of the top color from `self` into `target`.
    ///
    /// Units leave from the top of `self` and land in the lowest empty slots
    /// of `target`. Nothing is modified when an error is returned.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` if `amount` is zero or exceeds
    /// `max_pour_amount_into(target)`.
    pub fn pour_into(&mut self, target: &mut Bottle, amount: usize) -> Result<()> {
        let max = self.max_pour_amount_into(target);
        if amount == 0 || amount > max {
            return Err(Error::invalid_operation(format!(
                "cannot pour {amount} unit(s), at most {max} allowed"
            )));
        }
        let color = self
            .top_color()
            .ok_or_else(|| Error::invalid_operation("source bottle has no top color"))?;

        let mut top = self.filled();
        for _ in 0..amount {
            top -= 1;
            debug_assert_eq!(self.slots[top], Some(color));
            self.slots[top] = None;
        }

        let mut bottom = target.filled();
        for _ in 0..amount {
            target.slots[bottom] = Some(color);
            bottom += 1;
        }
        Ok(())
    }
}
