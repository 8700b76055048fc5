//! The style tree.
//!
//! Nodes live in an arena and refer to each other by [`StyleId`]. A node
//! is resolved against its parent when it is created, so nodes must be
//! created top-down in document order: the previous sibling a node's
//! margin collapses against is whatever was the parent's last child at
//! that moment.

use std::ops::Index;

use log::{debug, trace};
use nehan_common::warning::warn_once;
use nehan_markup::{AttributesMap, Markup, tag_wrap};
use serde::Serialize;

use crate::boxes::{LineOptions, TextItem};
use crate::config::LayoutConfig;
use crate::context::{CursorContext, EvalContext};
use crate::flow::{BoxFlow, BoxSize};
use crate::node::StyleNode;
use crate::outline::{OutlineCollection, OutlineContext, OutlineHeader};
use crate::resolve::evaluate;
use crate::selector::SelectorEngine;
use crate::values::{Color, CssValue, DisplayKind, PropertyMap, PseudoElement};

/// Handle of a node in a [`StyleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StyleId(pub usize);

/// Per-node options supplied by the layout driver.
#[derive(Debug, Clone, Default)]
pub struct StyleArgs {
    /// Declarations that win over every other source.
    pub force_css: PropertyMap,
    /// Cursor at the point the node is created.
    pub cursor: Option<CursorContext>,
}

impl StyleArgs {
    /// Args with forced declarations only.
    #[must_use]
    pub fn forced(force_css: PropertyMap) -> Self {
        Self {
            force_css,
            cursor: None,
        }
    }
}

/// A heading reported to the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderOptions {
    /// Markup name, `h1` to `h6`.
    pub kind: String,
    /// Heading rank.
    pub rank: u8,
    /// Heading text.
    pub title: String,
}

/// Arena of resolved styles for one document.
pub struct StyleTree {
    config: LayoutConfig,
    selectors: Box<dyn SelectorEngine>,
    nodes: Vec<StyleNode>,
    outlines: OutlineCollection,
    header_count: usize,
}

impl StyleTree {
    /// An empty tree.
    pub fn new(config: LayoutConfig, selectors: impl SelectorEngine + 'static) -> Self {
        Self {
            config,
            selectors: Box::new(selectors),
            nodes: Vec::new(),
            outlines: OutlineCollection::default(),
            header_count: 0,
        }
    }

    /// Engine configuration.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The selector engine.
    #[must_use]
    pub fn selectors(&self) -> &dyn SelectorEngine {
        self.selectors.as_ref()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node was created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node.
    #[must_use]
    pub fn get(&self, id: StyleId) -> Option<&StyleNode> {
        self.nodes.get(id.0)
    }

    /// Get a node mutably.
    pub fn get_mut(&mut self, id: StyleId) -> Option<&mut StyleNode> {
        self.nodes.get_mut(id.0)
    }

    /// All handles in creation order.
    pub fn ids(&self) -> impl Iterator<Item = StyleId> + use<> {
        (0..self.nodes.len()).map(StyleId)
    }

    /// Outlines flushed so far.
    #[must_use]
    pub const fn outlines(&self) -> &OutlineCollection {
        &self.outlines
    }

    // ----- construction -----

    /// Create a parentless node sized by the configured display size.
    pub fn create_root(&mut self, markup: Markup) -> StyleId {
        self.create_node(markup, None, StyleArgs::default())
    }

    /// Resolve `markup` against `parent` and attach it as the parent's
    /// last child.
    pub fn create_node(
        &mut self,
        markup: Markup,
        parent: Option<StyleId>,
        args: StyleArgs,
    ) -> StyleId {
        let mut node = self.resolve(markup, parent, &args);
        let id = StyleId(self.nodes.len());
        node.id = Some(id);
        debug!(
            target: "nehan",
            "style {} <{}> flow={} display={} content={}x{}",
            id.0,
            node.markup_name(),
            node.flow,
            node.display,
            node.content_measure,
            node.content_extent
        );
        self.nodes.push(node);
        if let Some(parent) = parent {
            self.append_child(parent, id);
        }
        id
    }

    /// Create a child from a bare tag name.
    pub fn create_child(
        &mut self,
        parent: StyleId,
        tag_name: &str,
        force_css: PropertyMap,
        attrs: AttributesMap,
    ) -> StyleId {
        let markup = Markup::new(tag_name).with_attrs(attrs);
        self.create_node(markup, Some(parent), StyleArgs::forced(force_css))
    }

    /// Resolve a detached copy of `id` with extra forced declarations, for
    /// measuring without touching the tree. A root is cloned as a `div`
    /// under itself.
    #[must_use]
    pub fn clone_node(&self, id: StyleId, force_css: PropertyMap) -> StyleNode {
        let original = &self[id];
        let args = StyleArgs {
            cursor: original.cursor,
            ..StyleArgs::forced(force_css)
        };
        let mut clone = match original.parent {
            Some(parent) => self.resolve(original.markup.clone(), Some(parent), &args),
            None => self.resolve(Markup::new("div"), Some(id), &args),
        };
        clone.is_clone = true;
        clone
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Append `child` as the last child of `parent`, updating sibling links.
    pub fn append_child(&mut self, parent: StyleId, child: StyleId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();
        self.nodes[parent.0].children.push(child);
        let node = &mut self.nodes[child.0];
        node.parent = Some(parent);
        node.prev = prev_last_child;
        node.next = None;
        if let Some(prev) = prev_last_child {
            self.nodes[prev.0].next = Some(child);
        }
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Detach `child` from `parent`. Returns `None` if it was not a child.
    pub fn remove_child(&mut self, parent: StyleId, child: StyleId) -> Option<StyleId> {
        let children = &mut self.nodes.get_mut(parent.0)?.children;
        let index = children.iter().position(|&c| c == child)?;
        let removed = children.remove(index);
        let (prev, next) = {
            let node = &mut self.nodes[removed.0];
            node.parent = None;
            (node.prev.take(), node.next.take())
        };
        if let Some(prev) = prev {
            self.nodes[prev.0].next = next;
        }
        if let Some(next) = next {
            self.nodes[next.0].prev = prev;
        }
        Some(removed)
    }

    /// Iterate over ancestors, parent first.
    pub fn ancestors(&self, id: StyleId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.get(id).and_then(StyleNode::parent),
        }
    }

    /// `node` followed by its ancestors.
    fn lineage<'a>(&'a self, node: &'a StyleNode) -> impl Iterator<Item = &'a StyleNode> {
        std::iter::successors(Some(node), |n| n.parent.and_then(|p| self.get(p)))
    }

    // ----- property queries -----

    /// Declared value of `name`, computed values evaluated. Managed
    /// declarations shadow unmanaged ones.
    ///
    /// Subdivided names such as `margin-before` are never found: they are
    /// merged into `margin` when declared.
    #[must_use]
    pub fn css_attr(&self, node: &StyleNode, name: &str) -> Option<CssValue> {
        let value = node.declared(name)?;
        Some(evaluate(name, value, &EvalContext::for_node(self, node)))
    }

    /// [`StyleTree::css_attr`] as text.
    #[must_use]
    pub fn css_text(&self, node: &StyleNode, name: &str) -> Option<String> {
        self.css_attr(node, name).and_then(|v| v.to_text())
    }

    /// Markup attribute first, declared value second.
    #[must_use]
    pub fn attr(&self, node: &StyleNode, name: &str) -> Option<String> {
        node.markup_attr(name)
            .map(str::to_string)
            .or_else(|| self.css_text(node, name))
    }

    /// Returns true for `white-space: pre`.
    #[must_use]
    pub fn is_pre(&self, node: &StyleNode) -> bool {
        self.css_text(node, "white-space").as_deref() == Some("pre")
    }

    /// Text color, inherited, falling back to the configured font color.
    #[must_use]
    pub fn color(&self, node: &StyleNode) -> Color {
        self.lineage(node)
            .find_map(|n| n.color)
            .or_else(|| Color::parse(&self.config.font_color).ok())
            .unwrap_or_default()
    }

    /// Marker markup of the `order`-th list item, from the nearest list
    /// style.
    #[must_use]
    pub fn list_marker_html(&self, node: &StyleNode, order: usize) -> String {
        self.lineage(node)
            .find_map(|n| n.list_style.as_ref())
            .map_or_else(String::new, |list| list.marker_html(order))
    }

    /// Marker box size cached by [`StyleTree::set_list_item_count`] on the
    /// nearest list, or a font-size square.
    #[must_use]
    pub fn list_marker_size(&self, node: &StyleNode) -> BoxSize {
        self.lineage(node)
            .find_map(|n| n.list_marker_size)
            .unwrap_or_else(|| node.flow.box_size(node.font.size, node.font.size))
    }

    /// Column partition of the nearest table.
    #[must_use]
    pub fn table_partition<'a>(&'a self, node: &'a StyleNode) -> Option<&'a [i32]> {
        self.lineage(node).find_map(|n| n.table_partition.as_deref())
    }

    /// Flow of the parent, or the node's own flow at the root.
    #[must_use]
    pub fn parent_flow(&self, node: &StyleNode) -> BoxFlow {
        self.parent_node(node).map_or(node.flow, |p| p.flow)
    }

    /// Font size of the parent, or the configured font size at the root.
    #[must_use]
    pub fn parent_font_size(&self, node: &StyleNode) -> i32 {
        self.parent_node(node)
            .map_or(self.config.font_size, StyleNode::font_size)
    }

    /// Content measure of the parent, or the display measure at the root.
    #[must_use]
    pub fn parent_content_measure(&self, node: &StyleNode) -> i32 {
        self.parent_node(node)
            .map_or_else(|| self.config.measure(node.flow), |p| p.content_measure)
    }

    /// Content extent of the parent, or the display extent at the root.
    #[must_use]
    pub fn parent_content_extent(&self, node: &StyleNode) -> i32 {
        self.parent_node(node)
            .map_or_else(|| self.config.extent(node.flow), |p| p.content_extent)
    }

    /// Markup name of the parent.
    #[must_use]
    pub fn parent_markup_name<'a>(&'a self, node: &StyleNode) -> Option<&'a str> {
        self.parent_node(node).map(StyleNode::markup_name)
    }

    fn parent_node(&self, node: &StyleNode) -> Option<&StyleNode> {
        node.parent.and_then(|p| self.get(p))
    }

    // ----- structure -----

    /// Children of the parent, empty at the root.
    #[must_use]
    pub fn parent_children<'a>(&'a self, node: &StyleNode) -> &'a [StyleId] {
        self.parent_node(node)
            .map(|p| p.children.as_slice())
            .unwrap_or(&[])
    }

    /// Children of the parent with markup name `markup_name`.
    #[must_use]
    pub fn parent_children_of_type(&self, node: &StyleNode, markup_name: &str) -> Vec<StyleId> {
        self.parent_children(node)
            .iter()
            .copied()
            .filter(|&id| self[id].markup_name() == markup_name)
            .collect()
    }

    /// The parent's `nth` child.
    #[must_use]
    pub fn parent_nth_child(&self, node: &StyleNode, nth: usize) -> Option<StyleId> {
        self.parent_node(node).and_then(|p| p.nth_child(nth))
    }

    /// Position among the parent's children.
    #[must_use]
    pub fn child_index(&self, node: &StyleNode) -> Option<usize> {
        let id = node.id?;
        self.parent_children(node).iter().position(|&c| c == id)
    }

    /// Position among the parent's children of the same markup name.
    #[must_use]
    pub fn child_index_of_type(&self, node: &StyleNode) -> Option<usize> {
        let id = node.id?;
        self.parent_children_of_type(node, node.markup_name())
            .iter()
            .position(|&c| c == id)
    }

    /// `:first-child`
    #[must_use]
    pub fn is_first_child(&self, node: &StyleNode) -> bool {
        self.child_index(node) == Some(0)
    }

    /// `:first-of-type`
    #[must_use]
    pub fn is_first_of_type(&self, node: &StyleNode) -> bool {
        self.child_index_of_type(node) == Some(0)
    }

    /// `:last-child`. Always false: nodes are created as the source is
    /// read, so later siblings are not known yet.
    #[must_use]
    pub const fn is_last_child(&self, _node: &StyleNode) -> bool {
        false
    }

    /// `:last-of-type`. Always false, see [`StyleTree::is_last_child`].
    #[must_use]
    pub const fn is_last_of_type(&self, _node: &StyleNode) -> bool {
        false
    }

    /// `:only-child`, among the siblings created so far.
    #[must_use]
    pub fn is_only_child(&self, node: &StyleNode) -> bool {
        self.parent_children(node).len() == 1 && self.is_first_child(node)
    }

    /// `:only-of-type`, among the siblings created so far.
    #[must_use]
    pub fn is_only_of_type(&self, node: &StyleNode) -> bool {
        self.parent_children_of_type(node, node.markup_name()).len() == 1
            && self.is_first_of_type(node)
    }

    /// Returns true if the node's flow differs from its parent's.
    #[must_use]
    pub fn has_flip_flow(&self, node: &StyleNode) -> bool {
        self.parent_node(node).is_some_and(|p| p.flow != node.flow)
    }

    // ----- content -----

    /// Raw content with pseudo-element content synthesized in:
    /// `::before`/`::after` wrapped in marker tags, then the first letter
    /// wrapped, then everything wrapped in a first-line tag.
    #[must_use]
    pub fn resolve_content(&self, node: &StyleNode) -> String {
        let ctx = EvalContext::for_node(self, node);
        let pseudo = |pe| self.selectors.get_value_pe(&ctx, pe);
        let pseudo_content = |map: &PropertyMap| {
            map.get("content")
                .map(|v| evaluate("content", v, &ctx))
                .and_then(|v| v.to_text())
                .unwrap_or_default()
        };

        let mut content = node.markup.content().to_string();
        let before = pseudo(PseudoElement::Before);
        if !before.is_empty() {
            content =
                tag_wrap(PseudoElement::Before.tag_name(), &pseudo_content(&before)) + &content;
        }
        let after = pseudo(PseudoElement::After);
        if !after.is_empty() {
            content.push_str(&tag_wrap(PseudoElement::After.tag_name(), &pseudo_content(&after)));
        }
        if !pseudo(PseudoElement::FirstLetter).is_empty() {
            content = wrap_first_letter(&content);
        }
        if !pseudo(PseudoElement::FirstLine).is_empty() {
            content = tag_wrap(PseudoElement::FirstLine.tag_name(), &content);
        }
        content
    }

    /// Returns true if the node must not be laid out. Check this before
    /// building any box from it.
    #[must_use]
    pub fn is_disabled(&self, node: &StyleNode) -> bool {
        if node.display == DisplayKind::None {
            return true;
        }
        if self.config.is_disabled_markup(node.markup_name()) {
            return true;
        }
        if node.content_measure <= 0 || node.content_extent <= 0 {
            return true;
        }
        if node.markup.is_close_tag() {
            return true;
        }
        !node.markup.is_single_tag()
            && node.is_block()
            && node.is_markup_empty()
            && self.resolve_content(node).is_empty()
    }

    // ----- mutation -----

    /// Resize after the available space changed, keeping the node's own
    /// static size if it has one. Descendants are resized too.
    pub fn update_context_size(&mut self, id: StyleId, measure: i32, extent: i32) {
        let node = &self[id];
        let measure = node.static_measure.unwrap_or(measure);
        let extent = node.static_extent.unwrap_or(extent);
        self.force_update_context_size(id, Some(measure), Some(extent));
    }

    /// Resize to the given outer size (the parent's content size where
    /// `None`) and re-derive every descendant top-down. Descendants keep
    /// their static sizes. Calling this twice with the same input yields
    /// the same sizes.
    pub fn force_update_context_size(
        &mut self,
        id: StyleId,
        measure: Option<i32>,
        extent: Option<i32>,
    ) {
        let (measure, extent) = {
            let node = &self[id];
            (
                measure.unwrap_or_else(|| self.parent_content_measure(node)),
                extent.unwrap_or_else(|| self.parent_content_extent(node)),
            )
        };
        self.nodes[id.0].set_context_size(measure, extent);
        trace!(target: "nehan", "resize {} to {measure}x{extent}", id.0);

        let children = self.nodes[id.0].children.clone();
        for child in children {
            let (static_measure, static_extent) = {
                let node = &self[child];
                (node.static_measure, node.static_extent)
            };
            self.force_update_context_size(child, static_measure, static_extent);
        }
    }

    /// Measure the widest marker of a list with `item_count` items on a
    /// detached clone and cache it for the list's descendants.
    pub fn set_list_item_count(&mut self, id: StyleId, item_count: usize) {
        let clone = self.clone_node(id, PropertyMap::new());
        let marker = self.list_marker_html(&clone, item_count);
        let font_size = clone.font_size();
        let (measure, extent) = if marker.starts_with("<img") {
            (font_size, font_size)
        } else {
            let texts = TextItem::split(&marker, clone.is_text_vertical());
            let measure: i32 = texts
                .iter()
                .map(|t| t.advance(font_size, clone.letter_spacing()))
                .sum();
            let line = self.create_line(
                &clone,
                LineOptions {
                    measure: Some(measure),
                    char_count: texts.iter().map(TextItem::char_count).sum(),
                    texts,
                    ..LineOptions::default()
                },
            );
            let inline_measure = line.line.as_ref().map_or(measure, |m| m.inline_measure);
            (inline_measure, line.size.extent(clone.flow))
        };
        let node = &mut self.nodes[id.0];
        node.list_marker_size = Some(node.marker_box_size(measure, extent));
    }

    /// Store the column partition computed by the table driver.
    pub fn set_table_partition(&mut self, id: StyleId, partition: Vec<i32>) {
        self.nodes[id.0].table_partition = Some(partition);
    }

    // ----- outline -----

    /// Open an outline at a section root.
    pub fn start_outline_context(&mut self, id: StyleId) {
        let node = &mut self.nodes[id.0];
        node.outline = Some(OutlineContext::new(node.markup.name()));
    }

    /// Close the outline opened at `id` and move it to
    /// [`StyleTree::outlines`].
    pub fn end_outline_context(&mut self, id: StyleId) {
        let outline = self.nodes[id.0].outline.take();
        match outline {
            Some(outline) => self.outlines.add(outline),
            None => warn_once(
                "outline",
                &format!("<{}> ended an outline it never started", self[id].markup_name()),
            ),
        }
    }

    /// Record the start of a sectioning element in the nearest outline.
    pub fn start_section_context(&mut self, id: StyleId) {
        let name = self[id].markup_name().to_string();
        if let Some(outline) = self.outline_mut(id) {
            outline.start_section(&name);
        }
    }

    /// Record the end of a sectioning element in the nearest outline.
    pub fn end_section_context(&mut self, id: StyleId) {
        let name = self[id].markup_name().to_string();
        if let Some(outline) = self.outline_mut(id) {
            outline.end_section(&name);
        }
    }

    /// Record a heading in the nearest outline and return the anchor id
    /// generated for it. Returns `None` outside any section root.
    pub fn start_header_context(&mut self, id: StyleId, opts: HeaderOptions) -> Option<String> {
        let header_id = format!("nehan-header-{}", self.header_count);
        let outline = self.outline_mut(id)?;
        outline.add_header(OutlineHeader {
            kind: opts.kind,
            rank: opts.rank,
            title: opts.title,
            id: header_id.clone(),
        });
        self.header_count += 1;
        Some(header_id)
    }

    fn outline_mut(&mut self, id: StyleId) -> Option<&mut OutlineContext> {
        let owner = std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&i| self[i].outline.is_some());
        let Some(owner) = owner else {
            warn_once(
                "outline",
                &format!("<{}> is outside any section root", self[id].markup_name()),
            );
            return None;
        };
        self.nodes[owner.0].outline.as_mut()
    }
}

impl Index<StyleId> for StyleTree {
    type Output = StyleNode;

    fn index(&self, id: StyleId) -> &StyleNode {
        &self.nodes[id.0]
    }
}

/// Iterator over ancestors of a node.
pub struct Ancestors<'a> {
    tree: &'a StyleTree,
    current: Option<StyleId>,
}

impl Iterator for Ancestors<'_> {
    type Item = StyleId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.get(id).and_then(StyleNode::parent);
        Some(id)
    }
}

/// Wrap the first character that is neither whitespace nor inside a tag.
fn wrap_first_letter(content: &str) -> String {
    let mut rest = content;
    let mut offset = 0;
    loop {
        if rest.starts_with('<')
            && let Some(close) = rest.find('>')
            && close > 1
        {
            offset += close + 1;
            rest = &rest[close + 1..];
            continue;
        }
        match rest.chars().next() {
            Some(c) if c.is_whitespace() => {
                offset += c.len_utf8();
                rest = &rest[c.len_utf8()..];
            }
            Some(c) => {
                let end = offset + c.len_utf8();
                return format!(
                    "{}{}{}",
                    &content[..offset],
                    tag_wrap(PseudoElement::FirstLetter.tag_name(), &content[offset..end]),
                    &content[end..]
                );
            }
            None => return content.to_string(),
        }
    }
}
