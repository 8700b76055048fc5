//! Display defaults and engine configuration.
//!
//! Everything a style resolution needs besides the markup and its parent
//! lives here: the root box size, font defaults, the default flow, which
//! markups are skipped and which properties the engine interprets itself.
//! A [`LayoutConfig`] is owned by the [`crate::StyleTree`] for the length of
//! one document build and is never mutated while nodes are being resolved.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::StyleError;
use crate::flow::BoxFlow;
use crate::values::unit::round_half_up;

/// Markups that are never laid out.
pub const DEFAULT_DISABLED_MARKUPS: &[&str] =
    &["script", "noscript", "style", "input", "iframe", "form"];

/// Properties interpreted by the engine itself. Everything else is passed
/// through to the renderer untouched.
pub const DEFAULT_MANAGED_PROPERTIES: &[&str] = &[
    "border-color",
    "border-radius",
    "border-style",
    "border-width",
    "box-sizing",
    "break-after",
    "break-before",
    "color",
    "display",
    "extent",
    "embeddable",
    "float",
    "flow",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "height",
    "interactive",
    "letter-spacing",
    "line-rate",
    "list-style-type",
    "list-style-position",
    "list-style-image",
    "margin",
    "measure",
    "meta",
    "onload",
    "oncreate",
    "padding",
    "position",
    "section",
    "section-root",
    "text-align",
    "text-emphasis-style",
    "text-emphasis-position",
    "text-emphasis-color",
    "text-combine",
    "width",
    "word-break",
];

/// [§ 2.5 Absolute-size keywords](https://www.w3.org/TR/css-fonts-4/#absolute-size-value)
const FONT_SIZE_NAMES: &[(&str, &str)] = &[
    ("xx-large", "33px"),
    ("x-large", "24px"),
    ("large", "18px"),
    ("medium", "16px"),
    ("small", "13px"),
    ("x-small", "10px"),
    ("xx-small", "8px"),
    ("larger", "1.2em"),
    ("smaller", "0.8em"),
];

/// Engine-wide defaults for one document build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LayoutConfig {
    /// Physical width of the root box.
    pub width: i32,
    /// Physical height of the root box.
    pub height: i32,
    /// Root font size in px.
    pub font_size: i32,
    /// Upper bound for any computed font size.
    pub max_font_size: i32,
    /// Root font family.
    pub font_family: String,
    /// Root text color.
    pub font_color: String,
    /// Default line extent as a multiple of the font size.
    pub line_rate: f64,
    /// Ruby annotation font size as a fraction of the base font size.
    pub ruby_rate: f64,
    /// Flow of the root box.
    pub flow: BoxFlow,
    /// Font-size keywords and the value each stands for.
    pub font_size_names: HashMap<String, String>,
    /// Markup names excluded from layout.
    pub disabled_markups: Vec<String>,
    /// Property names the engine interprets itself.
    pub managed_properties: Vec<String>,
    /// Ignore `style` attributes entirely.
    pub disable_inline_style: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 580,
            font_size: 16,
            max_font_size: 90,
            font_family: "monospace".to_string(),
            font_color: "000000".to_string(),
            line_rate: 2.0,
            ruby_rate: 0.5,
            flow: BoxFlow::TbRl,
            font_size_names: FONT_SIZE_NAMES
                .iter()
                .map(|(name, size)| ((*name).to_string(), (*size).to_string()))
                .collect(),
            disabled_markups: DEFAULT_DISABLED_MARKUPS
                .iter()
                .map(ToString::to_string)
                .collect(),
            managed_properties: DEFAULT_MANAGED_PROPERTIES
                .iter()
                .map(ToString::to_string)
                .collect(),
            disable_inline_style: false,
        }
    }
}

impl LayoutConfig {
    /// Load a configuration from JSON. Missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns [`StyleError::Config`] if the JSON is malformed or a field
    /// has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder: replace the root flow.
    #[must_use]
    pub fn with_flow(mut self, flow: BoxFlow) -> Self {
        self.flow = flow;
        self
    }

    /// Builder: replace the root box size.
    #[must_use]
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Root measure for a box laid out in `flow`.
    #[must_use]
    pub const fn measure(&self, flow: BoxFlow) -> i32 {
        if flow.is_text_vertical() { self.height } else { self.width }
    }

    /// Root extent for a box laid out in `flow`.
    #[must_use]
    pub const fn extent(&self, flow: BoxFlow) -> i32 {
        if flow.is_text_vertical() { self.width } else { self.height }
    }

    /// Ruby annotation (`rt`) font size for a base font size.
    #[must_use]
    pub fn rt_font_size(&self, base_font_size: i32) -> i32 {
        round_half_up(f64::from(base_font_size) * self.ruby_rate)
    }

    /// Returns true if `name` is never laid out.
    #[must_use]
    pub fn is_disabled_markup(&self, name: &str) -> bool {
        self.disabled_markups.iter().any(|m| m == name)
    }

    /// Returns true if `property` is interpreted by the engine.
    #[must_use]
    pub fn is_managed(&self, property: &str) -> bool {
        self.managed_properties.iter().any(|p| p == property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LayoutConfig::from_json(r#"{"font-size": 20, "flow": "lr-tb"}"#).unwrap();
        assert_eq!(config.font_size, 20);
        assert_eq!(config.flow, BoxFlow::LrTb);
        assert_eq!(config.max_font_size, 90);
        assert!(config.is_managed("margin"));
        assert!(!config.is_managed("background-color"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            LayoutConfig::from_json("{\"font-size\": \"big\"}"),
            Err(StyleError::Config(_))
        ));
    }

    #[test]
    fn test_root_size_follows_flow() {
        let config = LayoutConfig::default().with_size(800, 600);
        assert_eq!(config.measure(BoxFlow::LrTb), 800);
        assert_eq!(config.measure(BoxFlow::TbRl), 600);
        assert_eq!(config.extent(BoxFlow::TbRl), 800);
    }

    #[test]
    fn test_rt_font_size() {
        assert_eq!(LayoutConfig::default().rt_font_size(16), 8);
        assert_eq!(LayoutConfig::default().rt_font_size(15), 8);
    }
}
