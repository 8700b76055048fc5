//! Markup nodes for the nehan style engine.
//!
//! The tokenizer that produces these lives outside this workspace. The style
//! engine only needs what a tag carries: its name, attributes, raw content
//! and where it came from in the source.
//!
//! [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Map of attribute names to values for a markup node.
pub type AttributesMap = HashMap<String, String>;

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for
/// void elements."
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr", "page-break", "end-page", "pbr",
];

/// One tag (and its raw content) as produced by the markup stream.
///
/// Names are stored lower-cased. `content` is the raw source between the
/// start tag and its matching end tag, children included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markup {
    name: String,
    #[serde(default)]
    attrs: AttributesMap,
    #[serde(default)]
    content: String,
    #[serde(default)]
    close: bool,
    #[serde(default)]
    single: bool,
    #[serde(default)]
    pos: usize,
}

impl Markup {
    /// Create a start tag with no attributes and no content.
    ///
    /// Void elements (`img`, `br`, ...) are marked single automatically.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        let single = VOID_ELEMENTS.contains(&name.as_str());
        Self {
            name,
            attrs: AttributesMap::new(),
            content: String::new(),
            close: false,
            single,
            pos: 0,
        }
    }

    /// Create the end tag matching `name`.
    #[must_use]
    pub fn close_tag(name: &str) -> Self {
        let mut markup = Self::new(name);
        markup.close = true;
        markup
    }

    /// Builder: set an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        let _ = self
            .attrs
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    /// Builder: replace all attributes.
    #[must_use]
    pub fn with_attrs(mut self, attrs: AttributesMap) -> Self {
        self.attrs = attrs
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        self
    }

    /// Builder: set the raw content.
    #[must_use]
    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    /// Builder: mark as a self-closing tag (`<foo/>`).
    #[must_use]
    pub fn with_single(mut self, single: bool) -> Self {
        self.single = single;
        self
    }

    /// Builder: set the source position.
    #[must_use]
    pub fn with_pos(mut self, pos: usize) -> Self {
        self.pos = pos;
        self
    }

    /// The lower-cased tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All attributes.
    #[must_use]
    pub const fn attrs(&self) -> &AttributesMap {
        &self.attrs
    }

    /// Look up one attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns true if the attribute is present (with any value).
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// [§ 3.2.6.6 Embedding custom non-visible data](https://html.spec.whatwg.org/multipage/dom.html#embedding-custom-non-visible-data-with-the-data-*-attributes)
    ///
    /// Look up `data-*` by its dataset name, so `data("minExtent")` reads
    /// the `data-min-extent` attribute.
    #[must_use]
    pub fn data(&self, name: &str) -> Option<&str> {
        let mut attr = String::from("data-");
        for c in name.chars() {
            if c.is_ascii_uppercase() {
                attr.push('-');
                attr.push(c.to_ascii_lowercase());
            } else {
                attr.push(c);
            }
        }
        self.attr(&attr)
    }

    /// The raw content between start and end tag.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Source position reported by the tokenizer.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Returns the class names from the class attribute, in source order.
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.attr("class")
            .map(|list| {
                list.split_whitespace()
                    .filter(|class| seen.insert(*class))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns true for an end tag such as `</p>`.
    #[must_use]
    pub const fn is_close_tag(&self) -> bool {
        self.close
    }

    /// Returns true for void or self-closing tags.
    #[must_use]
    pub const fn is_single_tag(&self) -> bool {
        self.single
    }

    /// Returns true if the tag has no raw content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// [§ 4.3.6 The h1–h6 elements](https://html.spec.whatwg.org/multipage/sections.html#the-h1,-h2,-h3,-h4,-h5,-and-h6-elements)
    ///
    /// "These elements have a rank given by the number in their name."
    #[must_use]
    pub fn header_rank(&self) -> Option<u8> {
        let rank = self.name.strip_prefix('h')?;
        match rank.parse::<u8>() {
            Ok(n @ 1..=6) => Some(n),
            _ => None,
        }
    }

    /// Returns true for `h1`..`h6`.
    #[must_use]
    pub fn is_header_tag(&self) -> bool {
        self.header_rank().is_some()
    }
}

/// Wrap `content` in a start/end pair of `name`.
#[must_use]
pub fn tag_wrap(name: &str, content: &str) -> String {
    format!("<{name}>{content}</{name}>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements_are_single() {
        assert!(Markup::new("img").is_single_tag());
        assert!(Markup::new("BR").is_single_tag());
        assert!(!Markup::new("p").is_single_tag());
    }

    #[test]
    fn test_header_rank() {
        assert_eq!(Markup::new("h3").header_rank(), Some(3));
        assert_eq!(Markup::new("h7").header_rank(), None);
        assert_eq!(Markup::new("hr").header_rank(), None);
        assert!(!Markup::new("header").is_header_tag());
    }
}
