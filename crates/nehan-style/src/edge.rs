//! [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-4/#box-model)
//!
//! "Each box has a content area and optional surrounding padding, border,
//! and margin areas."
//!
//! Edges are stored per logical side in the flow of the node they belong
//! to, so `measure` sums `start` and `end`, `extent` sums `before` and
//! `after`.

use serde::Serialize;

use crate::values::{LogicalCorners, LogicalSides};

/// [§ 3 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Border {
    /// Border widths in px.
    pub width: LogicalSides<i32>,
    /// Corner radii in px.
    pub radius: Option<LogicalCorners<i32>>,
    /// Per-side `border-color`, unset sides `None`.
    pub color: Option<LogicalSides<Option<String>>>,
    /// Per-side `border-style`, unset sides `None`.
    pub style: Option<LogicalSides<Option<String>>>,
}

/// Padding, border and margin of a box.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Edge {
    /// [§ 5 Padding](https://www.w3.org/TR/css-box-4/#paddings)
    pub padding: LogicalSides<i32>,
    /// [§ 4 Margins](https://www.w3.org/TR/css-box-4/#margins)
    pub margin: LogicalSides<i32>,
    /// Border widths and decoration.
    pub border: Border,
}

impl Edge {
    /// Build an edge from whichever parts are declared. Returns `None` when
    /// none of them are.
    #[must_use]
    pub fn new(
        padding: Option<LogicalSides<i32>>,
        margin: Option<LogicalSides<i32>>,
        border: Option<Border>,
    ) -> Option<Self> {
        if padding.is_none() && margin.is_none() && border.is_none() {
            return None;
        }
        Some(Self {
            padding: padding.unwrap_or_default(),
            margin: margin.unwrap_or_default(),
            border: border.unwrap_or_default(),
        })
    }

    /// An edge with only padding.
    #[must_use]
    pub fn with_padding(padding: LogicalSides<i32>) -> Self {
        Self {
            padding,
            ..Self::default()
        }
    }

    /// Total edge along the inline axis.
    #[must_use]
    pub const fn measure(&self) -> i32 {
        self.margin.start + self.margin.end + self.inner_measure()
    }

    /// Total edge along the block axis.
    #[must_use]
    pub const fn extent(&self) -> i32 {
        self.margin.before + self.margin.after + self.inner_extent()
    }

    /// Border and padding along the inline axis.
    #[must_use]
    pub const fn inner_measure(&self) -> i32 {
        self.padding.start + self.padding.end + self.border.width.start + self.border.width.end
    }

    /// Border and padding along the block axis.
    #[must_use]
    pub const fn inner_extent(&self) -> i32 {
        self.padding.before
            + self.padding.after
            + self.border.width.before
            + self.border.width.after
    }

    /// Everything on the before side.
    #[must_use]
    pub const fn before(&self) -> i32 {
        self.margin.before + self.border.width.before + self.padding.before
    }

    /// Everything on the after side.
    #[must_use]
    pub const fn after(&self) -> i32 {
        self.margin.after + self.border.width.after + self.padding.after
    }

    /// Zero the before side of every part.
    pub const fn clear_before(&mut self) {
        self.margin.before = 0;
        self.border.width.before = 0;
        self.padding.before = 0;
    }

    /// Zero the after side of every part.
    pub const fn clear_after(&mut self) {
        self.margin.after = 0;
        self.border.width.after = 0;
        self.padding.after = 0;
    }
}

/// [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
///
/// "Adjoining vertical margins collapse ... the resulting margin width is
/// the maximum of the collapsing margins' widths."
///
/// The previous sibling's after margin is already laid out, so only the
/// difference is charged to this box's before margin.
#[must_use]
pub const fn collapse_margin(prev_after: i32, cur_before: i32) -> i32 {
    if prev_after >= cur_before {
        0
    } else {
        cur_before - prev_after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_totals() {
        let edge = Edge::new(
            Some(LogicalSides::uniform(5)),
            Some(LogicalSides::uniform(10)),
            Some(Border {
                width: LogicalSides::uniform(5),
                ..Border::default()
            }),
        )
        .unwrap();
        assert_eq!(edge.measure(), 40);
        assert_eq!(edge.inner_extent(), 20);
        assert_eq!(edge.before(), 20);
    }

    #[test]
    fn test_no_parts_no_edge() {
        assert_eq!(Edge::new(None, None, None), None);
    }

    #[test]
    fn test_collapse() {
        assert_eq!(collapse_margin(20, 12), 0);
        assert_eq!(collapse_margin(5, 12), 7);
        assert_eq!(collapse_margin(12, 12), 0);
    }

    #[test]
    fn test_clear_after() {
        let mut edge = Edge::with_padding(LogicalSides::uniform(3));
        edge.clear_after();
        assert_eq!(edge.after(), 0);
        assert_eq!(edge.before(), 3);
    }
}
