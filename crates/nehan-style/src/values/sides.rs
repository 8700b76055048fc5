//! Per-side and per-corner containers keyed by logical direction.

use serde::{Deserialize, Serialize};

use crate::flow::LogicalSide;

/// Four values keyed by logical side (before, end, after, start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogicalSides<T> {
    /// Block-start side.
    pub before: T,
    /// Inline-end side.
    pub end: T,
    /// Block-end side.
    pub after: T,
    /// Inline-start side.
    pub start: T,
}

impl<T> LogicalSides<T> {
    /// Create from values in shorthand order.
    #[must_use]
    pub const fn new(before: T, end: T, after: T, start: T) -> Self {
        Self {
            before,
            end,
            after,
            start,
        }
    }

    /// Value for one side.
    #[must_use]
    pub const fn get(&self, side: LogicalSide) -> &T {
        match side {
            LogicalSide::Before => &self.before,
            LogicalSide::End => &self.end,
            LogicalSide::After => &self.after,
            LogicalSide::Start => &self.start,
        }
    }

    /// Mutable value for one side.
    pub const fn get_mut(&mut self, side: LogicalSide) -> &mut T {
        match side {
            LogicalSide::Before => &mut self.before,
            LogicalSide::End => &mut self.end,
            LogicalSide::After => &mut self.after,
            LogicalSide::Start => &mut self.start,
        }
    }

    /// Apply `f` to every side.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> LogicalSides<U> {
        LogicalSides {
            before: f(self.before),
            end: f(self.end),
            after: f(self.after),
            start: f(self.start),
        }
    }
}

impl<T: Clone> LogicalSides<T> {
    /// The same value on every side.
    #[must_use]
    pub fn uniform(value: T) -> Self {
        Self::new(value.clone(), value.clone(), value.clone(), value)
    }

    /// [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
    ///
    /// "If there is only one component value, it applies to all sides. If
    /// there are two values, the top and bottom margins are set to the first
    /// value and the right and left margins are set to the second. If there
    /// are three values, the top is set to the first value, the left and
    /// right are set to the second, and the bottom is set to the third. If
    /// there are four values, they apply to the top, right, bottom, and left,
    /// respectively."
    ///
    /// Returns `None` for zero or more than four values.
    #[must_use]
    pub fn from_shorthand(values: &[T]) -> Option<Self> {
        match values {
            [all] => Some(Self::uniform(all.clone())),
            [block, inline] => Some(Self::new(
                block.clone(),
                inline.clone(),
                block.clone(),
                inline.clone(),
            )),
            [before, inline, after] => Some(Self::new(
                before.clone(),
                inline.clone(),
                after.clone(),
                inline.clone(),
            )),
            [before, end, after, start] => Some(Self::new(
                before.clone(),
                end.clone(),
                after.clone(),
                start.clone(),
            )),
            _ => None,
        }
    }
}

impl<T> LogicalSides<Option<T>> {
    /// Overwrite the sides that are present in `other`.
    pub fn merge_from(&mut self, other: Self) {
        for (slot, value) in [
            (&mut self.before, other.before),
            (&mut self.end, other.end),
            (&mut self.after, other.after),
            (&mut self.start, other.start),
        ] {
            if value.is_some() {
                *slot = value;
            }
        }
    }

    /// Returns true if no side is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.before.is_none() && self.end.is_none() && self.after.is_none() && self.start.is_none()
    }
}

/// Four values keyed by logical corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogicalCorners<T> {
    /// Corner between before and start.
    pub before_start: T,
    /// Corner between before and end.
    pub before_end: T,
    /// Corner between after and end.
    pub after_end: T,
    /// Corner between after and start.
    pub after_start: T,
}

impl<T: Clone> LogicalCorners<T> {
    /// [§ 5.1 border-radius](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
    ///
    /// Shorthand order is top-left, top-right, bottom-right, bottom-left,
    /// read here as before-start, before-end, after-end, after-start.
    #[must_use]
    pub fn from_shorthand(values: &[T]) -> Option<Self> {
        let (before_start, before_end, after_end, after_start) = match values {
            [all] => (all, all, all, all),
            [a, b] => (a, b, a, b),
            [a, b, c] => (a, b, c, b),
            [a, b, c, d] => (a, b, c, d),
            _ => return None,
        };
        Some(Self {
            before_start: before_start.clone(),
            before_end: before_end.clone(),
            after_end: after_end.clone(),
            after_start: after_start.clone(),
        })
    }
}

impl<T> LogicalCorners<T> {
    /// Apply `f` to every corner.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> LogicalCorners<U> {
        LogicalCorners {
            before_start: f(self.before_start),
            before_end: f(self.before_end),
            after_end: f(self.after_end),
            after_start: f(self.after_start),
        }
    }
}
