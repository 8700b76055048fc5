//! Document descriptions and the driver that turns them into styles and
//! boxes.
//!
//! The tokenizer and the page layouter are not part of this workspace, so
//! the CLI reads an already parsed tree from JSON and lays every block out
//! on a single unbounded page.

use std::collections::HashMap;

use anyhow::{Context, Result};
use log::debug;
use nehan_markup::{AttributesMap, Markup};
use nehan_style::outline::{is_section_root, is_sectioning_content};
use nehan_style::{
    BlockOptions, BoxElement, BoxKind, CssValue, HeaderOptions, ImageOptions, LayoutBox,
    LayoutConfig, LineOptions, PropertyMap, SimpleSelectors, StyleArgs, StyleId, StyleTree,
    TextItem,
};
use serde::Deserialize;

/// A parsed document: configuration, style rules and the element tree.
#[derive(Debug, Deserialize)]
pub struct Document {
    /// Engine configuration, defaults when absent.
    #[serde(default)]
    pub config: Option<LayoutConfig>,
    /// `[selector, { property: value }]` rules in source order.
    #[serde(default)]
    pub styles: Vec<(String, HashMap<String, String>)>,
    /// The root element.
    pub root: DocNode,
}

/// One element of the input tree.
#[derive(Debug, Deserialize)]
pub struct DocNode {
    /// Tag name.
    pub name: String,
    /// Attributes, `style` included.
    #[serde(default)]
    pub attrs: AttributesMap,
    /// Text of the element when it has no children.
    #[serde(default)]
    pub text: String,
    /// Child elements.
    #[serde(default)]
    pub children: Vec<DocNode>,
}

impl DocNode {
    fn markup(&self) -> Markup {
        Markup::new(&self.name)
            .with_attrs(self.attrs.clone())
            .with_content(&self.raw_content())
    }

    /// Source text of the element's content.
    fn raw_content(&self) -> String {
        if self.children.is_empty() {
            return self.text.clone();
        }
        self.children
            .iter()
            .map(|c| format!("<{0}>{1}</{0}>", c.name, c.raw_content()))
            .collect()
    }
}

impl Document {
    /// Parse a document description.
    ///
    /// # Errors
    /// Fails if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid document description")
    }

    /// Compile the style rules.
    ///
    /// # Errors
    /// Fails on a selector the simple engine cannot parse.
    pub fn selectors(&self) -> Result<SimpleSelectors> {
        let mut selectors = SimpleSelectors::new();
        for (selector, declarations) in &self.styles {
            let declarations: PropertyMap = declarations
                .iter()
                .map(|(name, value)| (name.clone(), CssValue::from(value.as_str())))
                .collect();
            selectors
                .set_style(selector, declarations)
                .with_context(|| format!("rule '{selector}'"))?;
        }
        Ok(selectors)
    }
}

/// Result of running the driver.
pub struct Layout {
    /// Every resolved style.
    pub tree: StyleTree,
    /// Root style.
    pub root: StyleId,
    /// Box of the root, `None` if the root is disabled.
    pub root_box: Option<LayoutBox>,
}

/// Resolve styles for the whole document and build its boxes.
///
/// # Errors
/// Fails if the style rules do not compile.
pub fn layout(doc: &Document, config: LayoutConfig) -> Result<Layout> {
    let mut tree = StyleTree::new(config, doc.selectors()?);
    let root = tree.create_root(doc.root.markup());
    let mut driver = Driver { tree: &mut tree };
    let root_box = driver.build(root, &doc.root);
    Ok(Layout {
        tree,
        root,
        root_box,
    })
}

struct Driver<'a> {
    tree: &'a mut StyleTree,
}

impl Driver<'_> {
    /// Build the box of `id` and, recursively, of its children.
    fn build(&mut self, id: StyleId, doc: &DocNode) -> Option<LayoutBox> {
        let name = self.tree[id].markup_name().to_string();
        if is_section_root(&name) {
            self.tree.start_outline_context(id);
        } else if is_sectioning_content(&name) {
            self.tree.start_section_context(id);
        }
        if let Some(rank) = self.tree[id].markup.header_rank() {
            let _ = self.tree.start_header_context(
                id,
                HeaderOptions {
                    kind: name.clone(),
                    rank,
                    title: doc.text.clone(),
                },
            );
        }
        if self.tree[id].list_style.is_some() {
            self.tree.set_list_item_count(id, doc.children.len());
        }

        let built = self.build_box(id, doc);

        if is_section_root(&name) {
            self.tree.end_outline_context(id);
        } else if is_sectioning_content(&name) {
            self.tree.end_section_context(id);
        }
        built
    }

    fn build_box(&mut self, id: StyleId, doc: &DocNode) -> Option<LayoutBox> {
        if self.tree.is_disabled(&self.tree[id]) {
            debug!(target: "nehan", "skip disabled <{}>", self.tree[id].markup_name());
            return None;
        }
        if self.tree[id].markup_name() == "img" {
            return Some(self.tree[id].create_image(ImageOptions::default()));
        }

        let mut children = Vec::new();
        for child_doc in &doc.children {
            let child = self
                .tree
                .create_node(child_doc.markup(), Some(id), StyleArgs::default());
            if let Some(child_box) = self.build(child, child_doc) {
                children.push(child_box);
            }
        }

        let node = &self.tree[id];
        let texts = if doc.children.is_empty() {
            TextItem::split(&doc.text, node.is_text_vertical())
        } else {
            Vec::new()
        };
        if !node.is_root_line() {
            return Some(self.line(id, texts, children));
        }

        // Consecutive inline children share one anonymous root line.
        let mut elements: Vec<BoxElement> = Vec::new();
        let mut pending: Vec<LayoutBox> = Vec::new();
        for child in children {
            let inline_image = child.kind == BoxKind::Image && !child.display.is_block_level();
            if child.is_line() || inline_image {
                pending.push(child);
            } else {
                if !pending.is_empty() {
                    elements.push(self.line(id, Vec::new(), std::mem::take(&mut pending)).into());
                }
                elements.push(child.into());
            }
        }
        if !pending.is_empty() || !texts.is_empty() {
            elements.push(self.line(id, texts, pending).into());
        }

        let node = &self.tree[id];
        let extent = elements
            .iter()
            .filter_map(BoxElement::as_box)
            .map(LayoutBox::layout_extent)
            .sum();
        Some(node.create_block(BlockOptions {
            elements,
            extent: Some(extent),
            ..BlockOptions::default()
        }))
    }

    fn line(&self, id: StyleId, texts: Vec<TextItem>, boxes: Vec<LayoutBox>) -> LayoutBox {
        let node = &self.tree[id];
        let font_size = node.font_size();
        let spacing = node.letter_spacing();
        let text_measure: i32 = texts.iter().map(|t| t.advance(font_size, spacing)).sum();
        let box_measure: i32 = boxes.iter().map(LayoutBox::layout_measure).sum();
        let max_extent = boxes.iter().map(LayoutBox::layout_extent).max();
        let max_font_size = boxes
            .iter()
            .map(|b| b.origin.font_size)
            .chain(std::iter::once(font_size))
            .max();
        let char_count = texts.iter().map(TextItem::char_count).sum::<usize>()
            + boxes.iter().map(|b| b.char_count).sum::<usize>();
        let elements = texts
            .iter()
            .cloned()
            .map(BoxElement::from)
            .chain(boxes.into_iter().map(BoxElement::from))
            .collect();
        self.tree.create_line(
            node,
            LineOptions {
                measure: Some(text_measure + box_measure),
                elements,
                texts,
                char_count,
                max_font_size,
                max_extent,
                ..LineOptions::default()
            },
        )
    }
}
