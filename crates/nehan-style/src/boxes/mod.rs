//! Boxes: the output of layout.
//!
//! A [`LayoutBox`] is built from a resolved [`crate::StyleNode`] by the
//! builders in this module and is not resized afterwards, except that a
//! root line adjusts its own children once while it is built (baseline
//! and text alignment).

mod builder;
mod text;

use serde::Serialize;

use crate::edge::Edge;
use crate::flow::{BoxFlow, BoxSize};
use crate::node::StyleNode;
use crate::tree::StyleId;
use crate::values::DisplayKind;

pub use builder::{BlockOptions, CancelEdge, ImageOptions, LineOptions};
pub use text::TextItem;

/// The three kinds of box the builders produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxKind {
    /// A block container, stacked along the block axis.
    Block,
    /// A line, or an inline element within a line.
    Line,
    /// A replaced image.
    Image,
}

/// The parts of the generating style a finished box still needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxOrigin {
    /// Handle of the generating node, `None` for a detached clone.
    pub id: Option<StyleId>,
    /// Markup name of the generating node.
    pub markup_name: String,
    /// Display of the generating node.
    pub display: DisplayKind,
    /// Font size of the generating node.
    pub font_size: i32,
    /// Whether the generating node draws emphasis marks or is a ruby.
    pub decorated: bool,
}

impl BoxOrigin {
    fn of(node: &StyleNode) -> Self {
        Self {
            id: node.id(),
            markup_name: node.markup_name().to_string(),
            display: node.display,
            font_size: node.font_size(),
            decorated: node.is_decorated(),
        }
    }
}

/// Child of a block or line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BoxElement {
    /// A nested box.
    Box(LayoutBox),
    /// A run of text.
    Text(TextItem),
}

impl BoxElement {
    /// Characters this element stands for.
    #[must_use]
    pub fn char_count(&self) -> usize {
        match self {
            Self::Box(b) => b.char_count,
            Self::Text(t) => t.char_count(),
        }
    }

    /// The nested box, if this is one.
    #[must_use]
    pub const fn as_box(&self) -> Option<&LayoutBox> {
        match self {
            Self::Box(b) => Some(b),
            Self::Text(_) => None,
        }
    }
}

impl From<LayoutBox> for BoxElement {
    fn from(b: LayoutBox) -> Self {
        Self::Box(b)
    }
}

impl From<TextItem> for BoxElement {
    fn from(t: TextItem) -> Self {
        Self::Text(t)
    }
}

/// State a root line keeps so an inline context can be resumed from it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LineMetrics {
    /// Largest font size in the line.
    pub max_font_size: i32,
    /// Extent of the line.
    pub max_extent: i32,
    /// Measure actually taken by the line's content.
    pub inline_measure: i32,
    /// The line ended at an explicit line break.
    pub line_break: bool,
    /// Text runs of the line.
    pub texts: Vec<TextItem>,
}

/// A positioned box in flow-relative coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutBox {
    /// Block, line or image.
    pub kind: BoxKind,
    /// Physical size of the content area.
    pub size: BoxSize,
    /// Flow of the generating node.
    pub flow: BoxFlow,
    /// `block` or `inline-block` for blocks, `inline` for lines, the
    /// node's display for images.
    pub display: DisplayKind,
    /// Edge drawn around the box.
    pub edge: Option<Edge>,
    /// CSS classes for the renderer.
    pub classes: Vec<String>,
    /// Characters contained, for pagination bookkeeping.
    pub char_count: usize,
    /// A page break follows this box.
    pub break_after: bool,
    /// The element is pushed to the end of its line.
    pub pushed: bool,
    /// The element is pulled to the start of its line.
    pub pulled: bool,
    /// The style the box was built from.
    pub origin: BoxOrigin,
    /// Children.
    pub elements: Vec<BoxElement>,
    /// Raw content override.
    pub content: Option<String>,
    /// Id of the block within a paginated document.
    pub block_id: Option<usize>,
    /// Id of the outermost block this one was split from.
    pub root_block_id: Option<usize>,
    /// Set on lines only. Only root lines carry `inline_measure`,
    /// `line_break` and `texts`.
    pub line: Option<LineMetrics>,
}

impl LayoutBox {
    fn new(kind: BoxKind, size: BoxSize, node: &StyleNode) -> Self {
        Self {
            kind,
            size,
            flow: node.flow,
            display: node.display,
            edge: None,
            classes: Vec::new(),
            char_count: 0,
            break_after: false,
            pushed: node.is_pushed(),
            pulled: !node.is_pushed() && node.is_pulled(),
            origin: BoxOrigin::of(node),
            elements: Vec::new(),
            content: None,
            block_id: None,
            root_block_id: None,
            line: None,
        }
    }

    /// Measure of the box.
    #[must_use]
    pub const fn measure(&self) -> i32 {
        self.size.measure(self.flow)
    }

    /// Extent of the box.
    #[must_use]
    pub const fn extent(&self) -> i32 {
        self.size.extent(self.flow)
    }

    /// Measure including the edge, as the parent lays it out.
    #[must_use]
    pub fn layout_measure(&self) -> i32 {
        self.measure() + self.edge.as_ref().map_or(0, Edge::measure)
    }

    /// Extent including the edge, as the parent lays it out.
    #[must_use]
    pub fn layout_extent(&self) -> i32 {
        self.extent() + self.edge.as_ref().map_or(0, Edge::extent)
    }

    /// Nested boxes, skipping text.
    pub fn child_boxes(&self) -> impl Iterator<Item = &Self> {
        self.elements.iter().filter_map(BoxElement::as_box)
    }

    /// Returns true for a line box.
    #[must_use]
    pub const fn is_line(&self) -> bool {
        matches!(self.kind, BoxKind::Line)
    }

    /// Returns true if the box carries class `name`.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }
}
