//! [§ 3 Emphasis Marks](https://www.w3.org/TR/css-text-decor-3/#emphasis-marks)
//!
//! Emphasis marks (*boten*) are small symbols drawn next to each character
//! of a run, on the right of vertical text and above horizontal text by
//! default.

use serde::Serialize;

use crate::values::color::Color;

/// [§ 3.1 text-emphasis-style](https://www.w3.org/TR/css-text-decor-3/#text-emphasis-style-property)
///
/// Either a keyword pair (`filled sesame`, `open circle`, ...) or a custom
/// mark string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEmphaStyle(String);

impl TextEmphaStyle {
    /// Keep the declared value.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// The declared value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true unless the style is `none`.
    #[must_use]
    pub fn is_enable(&self) -> bool {
        !self.0.is_empty() && self.0 != "none"
    }

    /// Character drawn for every emphasized character.
    ///
    /// "If a shape is given but neither filled nor open is specified,
    /// filled is assumed. If only filled or open is specified, the shape
    /// keyword computes to circle in horizontal typographic modes and
    /// sesame in vertical typographic modes."
    ///
    /// Unrecognized values are used as the mark itself, with quotes
    /// stripped.
    #[must_use]
    pub fn mark(&self, vertical: bool) -> String {
        let mut open = false;
        let mut shape = None;
        for word in self.0.split_whitespace() {
            match word {
                "filled" => open = false,
                "open" => open = true,
                "dot" | "circle" | "double-circle" | "triangle" | "sesame" => shape = Some(word),
                _ => return self.0.trim_matches(['"', '\'']).to_string(),
            }
        }
        let shape = shape.unwrap_or(if vertical { "sesame" } else { "circle" });
        let mark = match (shape, open) {
            ("dot", false) => "\u{2022}",
            ("dot", true) => "\u{25e6}",
            ("circle", false) => "\u{25cf}",
            ("circle", true) => "\u{25cb}",
            ("double-circle", false) => "\u{25c9}",
            ("double-circle", true) => "\u{25ce}",
            ("triangle", false) => "\u{25b2}",
            ("triangle", true) => "\u{25b3}",
            (_, false) => "\u{fe45}",
            (_, true) => "\u{fe46}",
        };
        mark.to_string()
    }
}

/// Resolved emphasis of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEmpha {
    /// Mark shape.
    pub style: TextEmphaStyle,
    /// `text-emphasis-position`, e.g. `over right`.
    pub position: String,
    /// Mark color, the node's text color unless declared.
    pub color: Color,
}

impl TextEmpha {
    /// Returns true if marks are drawn.
    #[must_use]
    pub fn is_enable(&self) -> bool {
        self.style.is_enable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks() {
        assert_eq!(TextEmphaStyle::new("filled dot").mark(true), "\u{2022}");
        assert_eq!(TextEmphaStyle::new("open").mark(true), "\u{fe46}");
        assert_eq!(TextEmphaStyle::new("filled").mark(false), "\u{25cf}");
        assert_eq!(TextEmphaStyle::new("'*'").mark(true), "*");
        assert!(!TextEmphaStyle::new("none").is_enable());
    }
}
