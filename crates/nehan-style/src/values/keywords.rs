//! Keyword-valued properties.
//!
//! Each enum parses case-insensitively from its CSS keyword through
//! [`std::str::FromStr`] and prints back through [`std::fmt::Display`].
//! Unknown keywords are reported as [`StyleError::UnknownKeyword`] by
//! [`parse_keyword`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::StyleError;

/// Parse a keyword for `property`, mapping strum's parse error to ours.
///
/// # Errors
/// Returns [`StyleError::UnknownKeyword`] if `value` is not a keyword of `T`.
pub fn parse_keyword<T: FromStr>(property: &str, value: &str) -> Result<T, StyleError> {
    value
        .trim()
        .parse()
        .map_err(|_| StyleError::unknown_keyword(property, value))
}

/// [§ 2 Box Layout Modes](https://www.w3.org/TR/css-display-3/#the-display-properties)
///
/// "The display property defines an element's display type, which consists
/// of the two basic qualities of how an element generates boxes."
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayKind {
    /// Inline-level box, the initial value.
    #[default]
    Inline,
    /// Block-level box.
    Block,
    /// Inline-level block container.
    InlineBlock,
    /// Block box with a list marker.
    ListItem,
    /// `<table>`
    Table,
    /// `<caption>`
    TableCaption,
    /// `<thead>`
    TableHeaderGroup,
    /// `<tbody>`
    TableRowGroup,
    /// `<tfoot>`
    TableFooterGroup,
    /// `<tr>`
    TableRow,
    /// `<td>`, `<th>`
    TableCell,
    /// Generates no box.
    None,
}

impl DisplayKind {
    /// Returns true for values that stack in the block direction.
    #[must_use]
    pub const fn is_block_level(self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::Table
                | Self::TableCaption
                | Self::TableHeaderGroup
                | Self::TableRowGroup
                | Self::TableFooterGroup
                | Self::TableRow
                | Self::TableCell
                | Self::ListItem
        )
    }
}

/// [§ 4.1 box-sizing](https://www.w3.org/TR/css-sizing-3/#box-sizing)
///
/// Which parts of the edge are included in an explicit or inherited size.
/// `margin-box` is an engine extension and the default: the outer size
/// includes the margin, so content shrinks by the whole edge.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum BoxSizing {
    /// Margin, border and padding are deducted.
    #[default]
    MarginBox,
    /// Border and padding are deducted.
    BorderBox,
    /// Nothing is deducted.
    ContentBox,
}

/// [§ 6.1 text-align](https://www.w3.org/TR/css-text-3/#text-align-property)
///
/// Physical `left`/`right` are read as `start`/`end`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    /// Align to the start edge of the line.
    #[default]
    #[strum(to_string = "start", serialize = "left")]
    #[serde(alias = "left")]
    Start,
    /// Align to the end edge of the line.
    #[strum(to_string = "end", serialize = "right")]
    #[serde(alias = "right")]
    End,
    /// Center within the line.
    #[strum(to_string = "center")]
    Center,
    /// Justify; treated as `start` for padding purposes.
    #[strum(to_string = "justify")]
    Justify,
}

impl TextAlign {
    /// Returns true if no start padding is ever applied.
    #[must_use]
    pub const fn is_start(self) -> bool {
        matches!(self, Self::Start | Self::Justify)
    }
}

/// [§ 3.1 float](https://www.w3.org/TR/css-logical-1/#float-clear)
///
/// Flow-relative float. `left`/`right` are read as `start`/`end`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum FloatDirection {
    /// Float to the start side.
    #[strum(to_string = "start", serialize = "left", serialize = "inline-start")]
    #[serde(alias = "left")]
    Start,
    /// Float to the end side.
    #[strum(to_string = "end", serialize = "right", serialize = "inline-end")]
    #[serde(alias = "right")]
    End,
}

/// [§ 3.1 break-before/break-after](https://www.w3.org/TR/css-break-3/#break-between)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum BreakValue {
    /// Always break.
    Always,
    /// Never break.
    Avoid,
    /// Break so the next page is a left page.
    Left,
    /// Break so the next page is a right page.
    Right,
    /// Always break a page.
    Page,
}

impl BreakValue {
    /// Returns true for `avoid`.
    #[must_use]
    pub const fn is_avoid(self) -> bool {
        matches!(self, Self::Avoid)
    }
}

/// [§ 5.2 word-break](https://www.w3.org/TR/css-text-3/#word-break-property)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum WordBreak {
    /// Break at the usual opportunities.
    #[default]
    Normal,
    /// Never break inside CJK runs.
    KeepAll,
    /// Break between any two letters.
    BreakAll,
}

/// [§ 2 position](https://www.w3.org/TR/css-position-3/#position-property)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum PositionKind {
    /// Normal flow.
    #[default]
    Static,
    /// Offset from the normal-flow position.
    Relative,
    /// Taken out of flow, placed against the containing block.
    Absolute,
    /// Taken out of flow, placed against the page.
    Fixed,
}

/// [§ 3.3 list-style-position](https://www.w3.org/TR/css-lists-3/#list-style-position-property)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum ListStylePosition {
    /// Marker placed outside the principal box.
    #[default]
    Outside,
    /// Marker placed as the first inline box.
    Inside,
}

/// [§ 3.1 list-style-type](https://www.w3.org/TR/css-lists-3/#text-markers)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum ListStyleType {
    /// Filled circle.
    Disc,
    /// Hollow circle.
    Circle,
    /// Filled square.
    Square,
    /// 1, 2, 3
    Decimal,
    /// 01, 02, 03
    DecimalLeadingZero,
    /// a, b, c
    #[strum(to_string = "lower-alpha", serialize = "lower-latin")]
    LowerAlpha,
    /// A, B, C
    #[strum(to_string = "upper-alpha", serialize = "upper-latin")]
    UpperAlpha,
    /// i, ii, iii
    LowerRoman,
    /// I, II, III
    UpperRoman,
    /// α, β, γ
    LowerGreek,
    /// 一, 二, 三
    CjkIdeographic,
}

/// Pseudo-elements that synthesize content around a node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum PseudoElement {
    /// `::before`
    Before,
    /// `::after`
    After,
    /// `::first-letter`
    FirstLetter,
    /// `::first-line`
    FirstLine,
}

impl PseudoElement {
    /// All pseudo-elements, in content synthesis order.
    pub const ALL: [Self; 4] = [Self::Before, Self::After, Self::FirstLetter, Self::FirstLine];

    /// Marker tag name the synthesized content is wrapped in.
    #[must_use]
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::FirstLetter => "first-letter",
            Self::FirstLine => "first-line",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(
            parse_keyword::<TextAlign>("text-align", "right").unwrap(),
            TextAlign::End
        );
        assert_eq!(TextAlign::End.to_string(), "end");
        assert_eq!(
            parse_keyword::<FloatDirection>("float", "LEFT").unwrap(),
            FloatDirection::Start
        );
        assert_eq!(
            parse_keyword::<ListStyleType>("list-style-type", "lower-latin").unwrap(),
            ListStyleType::LowerAlpha
        );
    }

    #[test]
    fn test_display_levels() {
        assert!(DisplayKind::ListItem.is_block_level());
        assert!(!DisplayKind::InlineBlock.is_block_level());
        assert_eq!(
            parse_keyword::<DisplayKind>("display", "table-row-group").unwrap(),
            DisplayKind::TableRowGroup
        );
    }

    #[test]
    fn test_unknown_keyword() {
        let err = parse_keyword::<BoxSizing>("box-sizing", "padding-box").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown value 'padding-box' for property 'box-sizing'"
        );
    }
}
