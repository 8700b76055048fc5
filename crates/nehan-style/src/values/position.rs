//! [§ 3 Positioning Schemes](https://www.w3.org/TR/css-position-3/#position-property)

use serde::Serialize;

use crate::values::keywords::PositionKind;
use crate::values::sides::LogicalSides;

/// Positioning scheme plus flow-relative offsets (`before`, `end`, `after`,
/// `start`). An offset of `None` is `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// Positioning scheme.
    pub kind: PositionKind,
    /// Inset from each logical side.
    pub offsets: LogicalSides<Option<i32>>,
}

impl Position {
    /// Returns true for `absolute`.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        matches!(self.kind, PositionKind::Absolute)
    }
}
