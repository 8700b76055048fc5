//! Box flows: the writing-mode abstraction used by every size in the engine.
//!
//! [§ 2 Block Flow Direction](https://www.w3.org/TR/css-writing-modes-4/#block-flow)
//!
//! "The writing-mode property specifies whether lines of text are laid out
//! horizontally or vertically and the direction in which blocks progress."
//!
//! A flow is named `<inline>-<block>`: `lr-tb` lays glyphs left to right and
//! stacks lines top to bottom, `tb-rl` lays glyphs top to bottom and stacks
//! lines right to left (vertical Japanese). Sizes are kept as *measure*
//! (inline axis) and *extent* (block axis) and only mapped to width/height
//! at the edges of the engine.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::StyleError;

/// A writing flow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum BoxFlow {
    /// Horizontal text, lines progress top to bottom.
    ///
    /// | logical | physical |
    /// |---------|----------|
    /// | before  | top      |
    /// | end     | right    |
    /// | after   | bottom   |
    /// | start   | left     |
    #[default]
    LrTb,
    /// Horizontal right-to-left text, lines progress top to bottom.
    RlTb,
    /// [§ 2](https://www.w3.org/TR/css-writing-modes-4/#valdef-writing-mode-vertical-rl)
    ///
    /// "Right-to-left block flow direction. Both the writing mode and the
    /// typographic mode are vertical."
    ///
    /// | logical | physical |
    /// |---------|----------|
    /// | before  | right    |
    /// | end     | bottom   |
    /// | after   | left     |
    /// | start   | top      |
    TbRl,
    /// [§ 2](https://www.w3.org/TR/css-writing-modes-4/#valdef-writing-mode-vertical-lr)
    ///
    /// "Left-to-right block flow direction. Both the writing mode and the
    /// typographic mode are vertical."
    TbLr,
}

/// Physical side of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum PhysicalSide {
    /// Top edge of the box
    Top,
    /// Right edge of the box
    Right,
    /// Bottom edge of the box
    Bottom,
    /// Left edge of the box
    Left,
}

/// [§ 6.2 Flow-relative Directions](https://www.w3.org/TR/css-writing-modes-4/#logical-directions)
///
/// Listed in shorthand order, so `margin: 1px 2px 3px 4px` assigns
/// before, end, after, start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum LogicalSide {
    /// "Nominally the side that comes earlier in the block progression"
    Before,
    /// "Nominally the side from which text of its inline base direction will end"
    End,
    /// "The side opposite block-start"
    After,
    /// "Nominally the side from which text of its inline base direction will start"
    Start,
}

impl LogicalSide {
    /// All four sides in shorthand order.
    pub const ALL: [Self; 4] = [Self::Before, Self::End, Self::After, Self::Start];
}

impl BoxFlow {
    /// Flow registry lookup.
    ///
    /// # Errors
    /// Returns [`StyleError::UnknownFlow`] if no flow has this name.
    pub fn get_by_name(name: &str) -> Result<Self, StyleError> {
        name.trim()
            .parse()
            .map_err(|_| StyleError::UnknownFlow(name.to_string()))
    }

    /// Returns true if glyphs progress vertically.
    #[must_use]
    pub const fn is_text_vertical(self) -> bool {
        matches!(self, Self::TbRl | Self::TbLr)
    }

    /// Returns true if glyphs progress horizontally.
    #[must_use]
    pub const fn is_text_horizontal(self) -> bool {
        !self.is_text_vertical()
    }

    /// The flow used by `flow: flip`.
    ///
    /// Horizontal flows flip to the standard vertical flow (`tb-rl`) and
    /// vertical flows flip to `lr-tb`.
    #[must_use]
    pub const fn flip(self) -> Self {
        if self.is_text_vertical() {
            Self::LrTb
        } else {
            Self::TbRl
        }
    }

    /// Map a logical side to the physical side for this flow.
    #[must_use]
    pub const fn physical(self, side: LogicalSide) -> PhysicalSide {
        match (self, side) {
            (Self::LrTb | Self::RlTb, LogicalSide::Before)
            | (Self::TbRl | Self::TbLr, LogicalSide::Start) => PhysicalSide::Top,
            (Self::LrTb | Self::RlTb, LogicalSide::After)
            | (Self::TbRl | Self::TbLr, LogicalSide::End) => PhysicalSide::Bottom,
            (Self::LrTb, LogicalSide::Start)
            | (Self::RlTb, LogicalSide::End)
            | (Self::TbRl, LogicalSide::After)
            | (Self::TbLr, LogicalSide::Before) => PhysicalSide::Left,
            (Self::LrTb, LogicalSide::End)
            | (Self::RlTb, LogicalSide::Start)
            | (Self::TbRl, LogicalSide::Before)
            | (Self::TbLr, LogicalSide::After) => PhysicalSide::Right,
        }
    }

    /// CSS property suffix for a logical side, e.g. `padding-` + `top`.
    #[must_use]
    pub fn css_side(self, side: LogicalSide) -> String {
        self.physical(side).to_string()
    }

    /// Name of the physical property that holds the measure.
    #[must_use]
    pub const fn prop_measure(self) -> &'static str {
        if self.is_text_vertical() { "height" } else { "width" }
    }

    /// Name of the physical property that holds the extent.
    #[must_use]
    pub const fn prop_extent(self) -> &'static str {
        if self.is_text_vertical() { "width" } else { "height" }
    }

    /// Build a physical size from flow-relative measure and extent.
    #[must_use]
    pub const fn box_size(self, measure: i32, extent: i32) -> BoxSize {
        if self.is_text_vertical() {
            BoxSize::new(extent, measure)
        } else {
            BoxSize::new(measure, extent)
        }
    }

    /// CSS declarations that establish this flow on an element.
    #[must_use]
    pub fn css(self) -> Vec<(&'static str, &'static str)> {
        match self {
            Self::LrTb => vec![("writing-mode", "horizontal-tb"), ("direction", "ltr")],
            Self::RlTb => vec![("writing-mode", "horizontal-tb"), ("direction", "rtl")],
            Self::TbRl => vec![("writing-mode", "vertical-rl")],
            Self::TbLr => vec![("writing-mode", "vertical-lr")],
        }
    }
}

/// A physical box size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxSize {
    /// Physical width.
    pub width: i32,
    /// Physical height.
    pub height: i32,
}

impl BoxSize {
    /// Create a size from physical width and height.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Size along the inline axis of `flow`.
    #[must_use]
    pub const fn measure(&self, flow: BoxFlow) -> i32 {
        if flow.is_text_vertical() { self.height } else { self.width }
    }

    /// Size along the block axis of `flow`.
    #[must_use]
    pub const fn extent(&self, flow: BoxFlow) -> i32 {
        if flow.is_text_vertical() { self.width } else { self.height }
    }

    /// Set the inline-axis size.
    pub const fn set_measure(&mut self, flow: BoxFlow, measure: i32) {
        if flow.is_text_vertical() {
            self.height = measure;
        } else {
            self.width = measure;
        }
    }

    /// Set the block-axis size.
    pub const fn set_extent(&mut self, flow: BoxFlow, extent: i32) {
        if flow.is_text_vertical() {
            self.width = extent;
        } else {
            self.height = extent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_names_round_trip_through_registry() {
        for flow in [BoxFlow::LrTb, BoxFlow::RlTb, BoxFlow::TbRl, BoxFlow::TbLr] {
            assert_eq!(BoxFlow::get_by_name(&flow.to_string()).unwrap(), flow);
        }
        assert_eq!(BoxFlow::TbRl.to_string(), "tb-rl");
        assert!(BoxFlow::get_by_name("bt-lr").is_err());
    }

    #[test]
    fn test_vertical_rl_mapping() {
        let flow = BoxFlow::TbRl;
        assert_eq!(flow.physical(LogicalSide::Before), PhysicalSide::Right);
        assert_eq!(flow.physical(LogicalSide::After), PhysicalSide::Left);
        assert_eq!(flow.physical(LogicalSide::Start), PhysicalSide::Top);
        assert_eq!(flow.physical(LogicalSide::End), PhysicalSide::Bottom);
    }

    #[test]
    fn test_flip() {
        assert_eq!(BoxFlow::LrTb.flip(), BoxFlow::TbRl);
        assert_eq!(BoxFlow::TbLr.flip(), BoxFlow::LrTb);
    }

    #[test]
    fn test_box_size_axes() {
        let size = BoxFlow::TbRl.box_size(300, 40);
        assert_eq!(size, BoxSize::new(40, 300));
        assert_eq!(size.measure(BoxFlow::TbRl), 300);
        assert_eq!(size.extent(BoxFlow::TbRl), 40);
        assert_eq!(size.measure(BoxFlow::LrTb), 40);
    }
}
