//! The resolved style of one element.
//!
//! A [`StyleNode`] is produced once by the cascade and afterwards only its
//! context size, list-marker cache, break flags and outline log change.
//! Tree links are [`StyleId`] handles into the owning [`crate::StyleTree`];
//! a detached clone keeps its parent handle but is never listed among the
//! parent's children.

use nehan_markup::Markup;
use serde::Serialize;

use crate::cascade::PropertyStore;
use crate::context::CursorContext;
use crate::edge::Edge;
use crate::flow::{BoxFlow, BoxSize};
use crate::outline::OutlineContext;
use crate::tree::StyleId;
use crate::values::{
    BoxSizing, BreakValue, Color, CssValue, DisplayKind, FloatDirection, Font, ListStyle,
    Position, TextAlign, TextEmpha, WordBreak,
};

/// Resolved style of one element, pseudo-element or clone.
#[derive(Debug, Clone)]
pub struct StyleNode {
    pub(crate) id: Option<StyleId>,
    pub(crate) parent: Option<StyleId>,
    pub(crate) children: Vec<StyleId>,
    pub(crate) prev: Option<StyleId>,
    pub(crate) next: Option<StyleId>,

    /// The element this style belongs to.
    pub markup: Markup,
    /// Declarations interpreted by the engine.
    pub managed: PropertyStore,
    /// Declarations passed through to the renderer.
    pub unmanaged: PropertyStore,

    /// `display`, `inline` unless declared.
    pub display: DisplayKind,
    /// Writing flow, inherited unless declared.
    pub flow: BoxFlow,
    /// `box-sizing`, `margin-box` unless declared.
    pub box_sizing: BoxSizing,
    /// Declared text color. See [`crate::StyleTree::color`] for the
    /// inherited value.
    pub color: Option<Color>,
    /// Font, inherited field by field.
    pub font: Font,
    /// Positioning, `None` for `static`.
    pub position: Option<Position>,
    /// Padding, border and margin, `None` if none is declared.
    pub edge: Option<Edge>,
    /// Line extent as a multiple of the font size, inherited.
    pub line_rate: f64,
    /// Text alignment, inherited.
    pub text_align: TextAlign,
    /// Emphasis marks.
    pub text_empha: Option<TextEmpha>,
    /// `text-combine`, as declared.
    pub text_combine: Option<String>,
    /// List style of a list container.
    pub list_style: Option<ListStyle>,
    /// `float`, `None` for `none`.
    pub float_direction: Option<FloatDirection>,
    /// `break-before`.
    pub break_before: Option<BreakValue>,
    /// `break-after`.
    pub break_after: Option<BreakValue>,
    /// `word-break`.
    pub word_break: Option<WordBreak>,
    /// `letter-spacing` in px.
    pub letter_spacing: Option<i32>,

    /// Declared measure in px.
    pub static_measure: Option<i32>,
    /// Declared extent in px.
    pub static_extent: Option<i32>,
    /// Measure including the edge charged by `box_sizing`.
    pub outer_measure: i32,
    /// Extent including the edge charged by `box_sizing`.
    pub outer_extent: i32,
    /// Measure available to content.
    pub content_measure: i32,
    /// Extent available to content.
    pub content_extent: i32,

    pub(crate) outline: Option<OutlineContext>,
    pub(crate) table_partition: Option<Vec<i32>>,
    pub(crate) list_marker_size: Option<BoxSize>,
    pub(crate) is_clone: bool,
    pub(crate) cursor: Option<CursorContext>,
}

/// Snapshot of the sizes of a node, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContextSize {
    /// See [`StyleNode::outer_measure`].
    pub outer_measure: i32,
    /// See [`StyleNode::outer_extent`].
    pub outer_extent: i32,
    /// See [`StyleNode::content_measure`].
    pub content_measure: i32,
    /// See [`StyleNode::content_extent`].
    pub content_extent: i32,
}

impl StyleNode {
    /// Arena handle, `None` for a detached clone.
    #[must_use]
    pub const fn id(&self) -> Option<StyleId> {
        self.id
    }

    /// Parent handle.
    #[must_use]
    pub const fn parent(&self) -> Option<StyleId> {
        self.parent
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[StyleId] {
        &self.children
    }

    /// Previous sibling.
    #[must_use]
    pub const fn prev_sibling(&self) -> Option<StyleId> {
        self.prev
    }

    /// Next sibling.
    #[must_use]
    pub const fn next_sibling(&self) -> Option<StyleId> {
        self.next
    }

    /// Number of children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// The `nth` child.
    #[must_use]
    pub fn nth_child(&self, nth: usize) -> Option<StyleId> {
        self.children.get(nth).copied()
    }

    /// Returns true for a detached measurement copy.
    #[must_use]
    pub const fn is_clone(&self) -> bool {
        self.is_clone
    }

    /// Outline log, if this node is a section root whose context is open.
    #[must_use]
    pub const fn outline(&self) -> Option<&OutlineContext> {
        self.outline.as_ref()
    }

    /// Current sizes.
    #[must_use]
    pub const fn context_size(&self) -> ContextSize {
        ContextSize {
            outer_measure: self.outer_measure,
            outer_extent: self.outer_extent,
            content_measure: self.content_measure,
            content_extent: self.content_extent,
        }
    }

    /// Markup name.
    #[must_use]
    pub fn markup_name(&self) -> &str {
        self.markup.name()
    }

    /// Markup attribute.
    #[must_use]
    pub fn markup_attr(&self, name: &str) -> Option<&str> {
        self.markup.attr(name)
    }

    /// `data-*` attribute, by camelCase name.
    #[must_use]
    pub fn markup_data(&self, name: &str) -> Option<&str> {
        self.markup.data(name)
    }

    /// Raw declared value, managed first. Computed values are not
    /// evaluated; see [`crate::StyleTree::css_attr`].
    #[must_use]
    pub fn declared(&self, name: &str) -> Option<&CssValue> {
        self.managed.get(name).or_else(|| self.unmanaged.get(name))
    }

    /// Computed font size.
    #[must_use]
    pub const fn font_size(&self) -> i32 {
        self.font.size
    }

    /// Font family.
    #[must_use]
    pub fn font_family(&self) -> &str {
        &self.font.family
    }

    /// Letter spacing in px, 0 unless declared.
    #[must_use]
    pub fn letter_spacing(&self) -> i32 {
        self.letter_spacing.unwrap_or(0)
    }

    /// Returns true if the node stacks in the block direction.
    #[must_use]
    pub const fn is_block(&self) -> bool {
        self.display.is_block_level()
    }

    /// Returns true for `display: inline`.
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        matches!(self.display, DisplayKind::Inline)
    }

    /// Returns true for `display: inline-block`.
    #[must_use]
    pub const fn is_inline_block(&self) -> bool {
        matches!(self.display, DisplayKind::InlineBlock)
    }

    /// Returns true if the node has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns true for a block that is not the root.
    #[must_use]
    pub const fn is_child_block(&self) -> bool {
        self.is_block() && !self.is_root()
    }

    /// Returns true if lines directly under this node are anonymous root
    /// lines, i.e. the node is a block or an inline-block.
    ///
    /// ```text
    /// <p>text in a root line<span>not a root line</span></p>
    /// ```
    #[must_use]
    pub const fn is_root_line(&self) -> bool {
        self.is_block() || self.is_inline_block()
    }

    /// Returns true for `float: start`.
    #[must_use]
    pub const fn is_float_start(&self) -> bool {
        matches!(self.float_direction, Some(FloatDirection::Start))
    }

    /// Returns true for `float: end`.
    #[must_use]
    pub const fn is_float_end(&self) -> bool {
        matches!(self.float_direction, Some(FloatDirection::End))
    }

    /// Returns true if the node floats either way.
    #[must_use]
    pub const fn is_floated(&self) -> bool {
        self.float_direction.is_some()
    }

    /// Returns true for list items, whose marker and body are laid out
    /// side by side.
    #[must_use]
    pub const fn is_parallel(&self) -> bool {
        matches!(self.display, DisplayKind::ListItem)
    }

    /// Returns true if the markup carries a `pushed` attribute.
    #[must_use]
    pub fn is_pushed(&self) -> bool {
        self.markup.has_attr("pushed")
    }

    /// Returns true if the markup carries a `pulled` attribute.
    #[must_use]
    pub fn is_pulled(&self) -> bool {
        self.markup.has_attr("pulled")
    }

    /// Returns true if the markup carries a `pasted` attribute.
    #[must_use]
    pub fn is_pasted(&self) -> bool {
        self.markup.has_attr("pasted")
    }

    /// Returns true if emphasis marks are drawn.
    #[must_use]
    pub fn is_text_empha_enable(&self) -> bool {
        self.text_empha.as_ref().is_some_and(TextEmpha::is_enable)
    }

    /// Returns true if this node's lines need extra extent for decoration:
    /// emphasis marks or a ruby annotation.
    #[must_use]
    pub fn is_decorated(&self) -> bool {
        self.is_text_empha_enable() || self.markup_name() == "ruby"
    }

    /// Returns true in a vertical flow.
    #[must_use]
    pub const fn is_text_vertical(&self) -> bool {
        self.flow.is_text_vertical()
    }

    /// Returns true in a horizontal flow.
    #[must_use]
    pub const fn is_text_horizontal(&self) -> bool {
        self.flow.is_text_horizontal()
    }

    /// Returns true for `position: absolute`.
    #[must_use]
    pub const fn is_position_absolute(&self) -> bool {
        match &self.position {
            Some(position) => position.is_absolute(),
            None => false,
        }
    }

    /// Returns true for the page-break markups.
    #[must_use]
    pub fn is_page_break(&self) -> bool {
        matches!(self.markup_name(), "page-break" | "end-page" | "pbr")
    }

    /// Returns true if a break before this node is requested.
    #[must_use]
    pub const fn is_break_before(&self) -> bool {
        match self.break_before {
            Some(value) => !value.is_avoid(),
            None => false,
        }
    }

    /// Returns true if a break after this node is requested.
    #[must_use]
    pub const fn is_break_after(&self) -> bool {
        match self.break_after {
            Some(value) => !value.is_avoid(),
            None => false,
        }
    }

    /// Returns true if the markup has no raw content.
    #[must_use]
    pub fn is_markup_empty(&self) -> bool {
        self.markup.is_empty()
    }

    /// Returns true for `word-break: break-all`.
    #[must_use]
    pub const fn is_word_break_all(&self) -> bool {
        matches!(self.word_break, Some(WordBreak::BreakAll))
    }

    /// Line extent reserved for emphasis marks.
    #[must_use]
    pub const fn empha_line_extent(&self) -> i32 {
        self.font.size * 3
    }

    /// Line extent without decoration.
    #[must_use]
    pub fn auto_line_extent(&self) -> i32 {
        (f64::from(self.font.size) * self.line_rate).floor() as i32
    }

    /// Line extent of a ruby line whose annotation font is `rt_font_size`.
    #[must_use]
    pub fn ruby_line_extent(&self, rt_font_size: i32) -> i32 {
        self.auto_line_extent() + rt_font_size
    }

    /// Edge along the inline axis, 0 without an edge.
    #[must_use]
    pub fn edge_measure(&self) -> i32 {
        self.edge.as_ref().map_or(0, Edge::measure)
    }

    /// Edge along the block axis, 0 without an edge.
    #[must_use]
    pub fn edge_extent(&self) -> i32 {
        self.edge.as_ref().map_or(0, Edge::extent)
    }

    /// Border and padding along the inline axis.
    #[must_use]
    pub fn inner_edge_measure(&self) -> i32 {
        self.edge.as_ref().map_or(0, Edge::inner_measure)
    }

    /// Border and padding along the block axis.
    #[must_use]
    pub fn inner_edge_extent(&self) -> i32 {
        self.edge.as_ref().map_or(0, Edge::inner_extent)
    }

    /// (before, after) edge a block context must leave free.
    #[must_use]
    pub fn block_context_edge(&self) -> (i32, i32) {
        self.edge.as_ref().map_or((0, 0), |e| (e.before(), e.after()))
    }

    /// Forget `break-before`, e.g. once the break has been taken.
    pub const fn clear_break_before(&mut self) {
        self.break_before = None;
    }

    /// Forget `break-after`.
    pub const fn clear_break_after(&mut self) {
        self.break_after = None;
    }

    /// [§ 4.1 box-sizing](https://www.w3.org/TR/css-sizing-3/#box-sizing)
    ///
    /// Content measure for an outer measure.
    #[must_use]
    pub fn compute_content_measure(&self, outer_measure: i32) -> i32 {
        match self.box_sizing {
            BoxSizing::MarginBox => outer_measure - self.edge_measure(),
            BoxSizing::BorderBox => outer_measure - self.inner_edge_measure(),
            BoxSizing::ContentBox => outer_measure,
        }
    }

    /// Content extent for an outer extent.
    #[must_use]
    pub fn compute_content_extent(&self, outer_extent: i32) -> i32 {
        match self.box_sizing {
            BoxSizing::MarginBox => outer_extent - self.edge_extent(),
            BoxSizing::BorderBox => outer_extent - self.inner_edge_extent(),
            BoxSizing::ContentBox => outer_extent,
        }
    }

    /// Set outer and content sizes from an outer size.
    pub(crate) fn set_context_size(&mut self, outer_measure: i32, outer_extent: i32) {
        self.outer_measure = outer_measure;
        self.outer_extent = outer_extent;
        self.content_measure = self.compute_content_measure(outer_measure);
        self.content_extent = self.compute_content_extent(outer_extent);
    }

    /// Marker box size of a list whose widest marker is `marker_measure`
    /// long and `marker_extent` tall, with half an em of gap.
    pub(crate) fn marker_box_size(&self, marker_measure: i32, marker_extent: i32) -> BoxSize {
        self.flow
            .box_size(marker_measure + self.font.size.div_euclid(2), marker_extent)
    }
}
