//! [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
//!
//! Declarations reach a node from four sources, merged lowest first:
//! selector rules, the `style` attribute, the `onload` hook and forced
//! properties supplied by the layout driver. Every declaration is
//! normalized on the way in so that later stages only ever see the unified
//! property names (`margin`, never `margin-before`).

use log::trace;

use crate::config::LayoutConfig;
use crate::flow::LogicalSide;
use crate::values::{CssValue, LogicalCorners, LogicalSides, PropertyMap};

/// Properties whose value is a 1 to 4 value side shorthand.
const SIDE_PROPERTIES: &[&str] = &[
    "margin",
    "padding",
    "border-width",
    "border-color",
    "border-style",
];

/// [§ 3.2 border-style](https://www.w3.org/TR/css-backgrounds-3/#border-style)
const BORDER_STYLES: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

/// Hook invoked during the cascade.
pub const ONLOAD_HOOK: &str = "onload";

/// Hook kept verbatim for the renderer.
pub const ONCREATE_HOOK: &str = "oncreate";

/// Normalize a value already filed under its final property name.
///
/// Side shorthands become [`CssValue::Sides`], `border-radius` becomes
/// [`CssValue::Corners`], `content` loses its quotes and other text is
/// trimmed. Non-text values pass through.
#[must_use]
pub fn normalize_value(name: &str, value: CssValue) -> CssValue {
    let CssValue::Text(text) = value else {
        return value;
    };
    let text = text.trim();
    if SIDE_PROPERTIES.contains(&name) {
        let parts: Vec<Option<String>> = text
            .split_whitespace()
            .map(|s| Some(s.to_string()))
            .collect();
        if let Some(sides) = LogicalSides::from_shorthand(&parts) {
            return CssValue::Sides(sides);
        }
    }
    if name == "border-radius" {
        let parts: Vec<Option<String>> = text
            .split_whitespace()
            .map(|s| Some(s.to_string()))
            .collect();
        if let Some(corners) = LogicalCorners::from_shorthand(&parts) {
            return CssValue::Corners(corners);
        }
    }
    if name == "content" {
        return CssValue::Text(strip_quotes(text).to_string());
    }
    CssValue::Text(text.to_string())
}

fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

/// Split `margin-before` into (`margin`, before), `border-end-color` into
/// (`border-color`, end).
fn split_side_property(name: &str) -> Option<(String, LogicalSide)> {
    if let Some((base, side)) = name.rsplit_once('-')
        && matches!(base, "margin" | "padding")
    {
        return Some((base.to_string(), side.parse().ok()?));
    }
    let rest = name.strip_prefix("border-")?;
    let (side, part) = rest.split_once('-')?;
    if matches!(part, "width" | "color" | "style") {
        return Some((format!("border-{part}"), side.parse().ok()?));
    }
    None
}

fn partial_side(side: LogicalSide, value: &str) -> CssValue {
    let mut sides = LogicalSides::<Option<String>>::default();
    *sides.get_mut(side) = Some(value.to_string());
    CssValue::Sides(sides)
}

/// Split a `border` shorthand into width, style and color tokens.
fn split_border(value: &str) -> Vec<(&'static str, String)> {
    value
        .split_whitespace()
        .map(|token| {
            let part = if BORDER_STYLES.contains(&token) {
                "style"
            } else if token.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                "width"
            } else {
                "color"
            };
            (part, token.to_string())
        })
        .collect()
}

/// Normalize one declaration into the entries it stands for.
///
/// | declared | stored as |
/// |----------|-----------|
/// | `margin-before: 1em` | `margin` with only `before` set |
/// | `border: 1px solid red` | `border-width`, `border-style`, `border-color` |
/// | `border-start: 2px dotted` | `border-width`, `border-style` with only `start` set |
/// | `page-break-after: always` | `break-after` |
/// | anything else | itself, through [`normalize_value`] |
#[must_use]
pub fn normalize_declaration(name: &str, value: CssValue) -> Vec<(String, CssValue)> {
    let name = name.trim().to_ascii_lowercase();
    if let Some(alias) = name.strip_prefix("page-") {
        return vec![(alias.to_string(), normalize_value(alias, value))];
    }
    let Some(text) = value.as_text() else {
        return vec![(name, value)];
    };
    if name == "border" {
        return split_border(text)
            .into_iter()
            .map(|(part, token)| {
                let prop = format!("border-{part}");
                let value = normalize_value(&prop, CssValue::Text(token));
                (prop, value)
            })
            .collect();
    }
    if let Some(side) = name
        .strip_prefix("border-")
        .and_then(|s| s.parse::<LogicalSide>().ok())
    {
        return split_border(text)
            .into_iter()
            .map(|(part, token)| (format!("border-{part}"), partial_side(side, &token)))
            .collect();
    }
    if let Some((base, side)) = split_side_property(&name) {
        return vec![(base, partial_side(side, text.trim()))];
    }
    let value = normalize_value(&name, value);
    vec![(name, value)]
}

/// Parse a `style` attribute into normalized declarations, in source
/// order. Statements without a `name:value` pair are skipped.
#[must_use]
pub fn parse_inline_style(style: &str) -> Vec<(String, CssValue)> {
    style
        .split(';')
        .filter_map(|stmt| {
            let parsed = stmt
                .split_once(':')
                .map(|(name, value)| (name.trim(), value.trim()))
                .filter(|(name, _)| !name.is_empty());
            if parsed.is_none() && !stmt.trim().is_empty() {
                trace!(target: "nehan", "skipping inline statement '{}'", stmt.trim());
            }
            parsed
        })
        .flat_map(|(name, value)| normalize_declaration(name, CssValue::from(value)))
        .collect()
}

/// Declared values of one node, keyed by unified property name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyStore {
    values: PropertyMap,
}

impl PropertyStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, last write wins. Per-side values merge side by side so
    /// `margin: 1em` followed by `margin-before: 0` keeps the other three
    /// sides.
    pub fn add(&mut self, name: &str, value: CssValue) {
        if let CssValue::Sides(incoming) = &value
            && let Some(CssValue::Sides(existing)) = self.values.get_mut(name)
        {
            existing.merge_from(incoming.clone());
            return;
        }
        let _ = self.values.insert(name.to_string(), value);
    }

    /// [`PropertyStore::add`] every entry of `map`. Entries are expected to
    /// be normalized already.
    pub fn add_values(&mut self, map: PropertyMap) {
        for (name, value) in map {
            self.add(&name, value);
        }
    }

    /// Normalize then [`PropertyStore::add`] every entry of `map`.
    pub fn add_declarations(&mut self, map: PropertyMap) {
        for (name, value) in map {
            for (name, value) in normalize_declaration(&name, value) {
                self.add(&name, value);
            }
        }
    }

    /// Raw declared value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CssValue> {
        self.values.get(name)
    }

    /// Drop `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<CssValue> {
        self.values.remove(name)
    }

    /// Returns true if `name` is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of declared properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the underlying map.
    #[must_use]
    pub const fn map(&self) -> &PropertyMap {
        &self.values
    }

    /// Take the underlying map.
    #[must_use]
    pub fn into_map(self) -> PropertyMap {
        self.values
    }

    /// Property names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Split into (managed, unmanaged) by the configured whitelist.
    #[must_use]
    pub fn partition(self, config: &LayoutConfig) -> (Self, Self) {
        let (managed, unmanaged) = self
            .values
            .into_iter()
            .partition(|(name, _)| config.is_managed(name));
        (Self { values: managed }, Self { values: unmanaged })
    }
}
