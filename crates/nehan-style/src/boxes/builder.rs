//! Block, line and image construction.

use log::trace;

use super::{BoxElement, BoxKind, LayoutBox, LineMetrics, TextItem};
use crate::edge::Edge;
use crate::flow::{BoxFlow, BoxSize, LogicalSide};
use crate::node::StyleNode;
use crate::tree::StyleTree;
use crate::values::unit::parse_leading_int;
use crate::values::{DisplayKind, LogicalSides, TextAlign};

/// Which edges a continued block leaves out.
///
/// A block split across pages draws its before edge on the first page
/// only and its after edge on the last page only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CancelEdge {
    /// Drop the before edge.
    pub before: bool,
    /// Drop the after edge.
    pub after: bool,
}

/// Per-call options of [`StyleNode::create_block`].
#[derive(Debug, Clone, Default)]
pub struct BlockOptions {
    /// Children.
    pub elements: Vec<BoxElement>,
    /// Extent actually used, for a block that ends before its content
    /// extent is filled.
    pub extent: Option<i32>,
    /// Force a break after the block.
    pub break_after: bool,
    /// Id of the block.
    pub block_id: Option<usize>,
    /// Id of the block this one continues.
    pub root_block_id: Option<usize>,
    /// Raw content override.
    pub content: Option<String>,
    /// Edges to leave out.
    pub cancel_edge: Option<CancelEdge>,
}

/// Per-call options of [`StyleTree::create_line`].
#[derive(Debug, Clone, Default)]
pub struct LineOptions {
    /// Measure taken by the line's content.
    pub measure: Option<i32>,
    /// Children.
    pub elements: Vec<BoxElement>,
    /// Text runs.
    pub texts: Vec<TextItem>,
    /// Characters in the line.
    pub char_count: usize,
    /// Largest font size in the line.
    pub max_font_size: Option<i32>,
    /// Largest extent among the children.
    pub max_extent: Option<i32>,
    /// The line ends at an explicit line break.
    pub line_break: bool,
    /// Force a break after the line.
    pub break_after: bool,
    /// Raw content override.
    pub content: Option<String>,
}

/// Per-call options of [`StyleNode::create_image`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageOptions {
    /// Force a break after the image.
    pub break_after: bool,
}

impl StyleNode {
    /// Build a block box of this node.
    ///
    /// The extent is the node's content extent unless the caller supplies
    /// one and the node is neither the root nor statically sized.
    #[must_use]
    pub fn create_block(&self, opts: BlockOptions) -> LayoutBox {
        let measure = self.content_measure;
        let extent = match opts.extent {
            Some(extent) if extent > 0 && !self.is_root() && self.static_extent.is_none() => extent,
            _ => self.content_extent,
        };
        let mut block = LayoutBox::new(BoxKind::Block, self.flow.box_size(measure, extent), self);
        block.display = if self.is_inline_block() {
            DisplayKind::InlineBlock
        } else {
            DisplayKind::Block
        };
        block.classes = self.block_classes();
        block.edge = self.block_context_edge_of(opts.cancel_edge);
        block.char_count = opts.elements.iter().map(BoxElement::char_count).sum();
        block.elements = opts.elements;
        block.break_after = self.is_break_after() || opts.break_after;
        block.content = opts.content;
        block.block_id = opts.block_id;
        block.root_block_id = opts.root_block_id;
        block
    }

    fn block_classes(&self) -> Vec<String> {
        let mut classes = vec![
            "nehan-block".to_string(),
            format!("nehan-{}", self.markup_name()),
        ];
        classes.extend(self.markup.classes().into_iter().map(str::to_string));
        if self.markup.is_header_tag() {
            classes.push("nehan-header".to_string());
        }
        if self.is_clone() {
            classes.push("nehan-clone".to_string());
        }
        classes
    }

    fn block_context_edge_of(&self, cancel: Option<CancelEdge>) -> Option<Edge> {
        let mut edge = self.edge.clone()?;
        if let Some(cancel) = cancel {
            if cancel.before {
                edge.clear_before();
            }
            if cancel.after {
                edge.clear_after();
            }
        }
        Some(edge)
    }

    /// Build an image box. Images are always sized physically: the
    /// `width` and `height` attributes, else the static size, else a
    /// square of the font size.
    #[must_use]
    pub fn create_image(&self, opts: ImageOptions) -> LayoutBox {
        let attr_px = |name: &str| {
            self.markup_attr(name)
                .and_then(parse_leading_int)
                .and_then(|n| i32::try_from(n).ok())
        };
        let width = attr_px("width")
            .or(self.static_measure)
            .unwrap_or(self.font.size);
        let height = attr_px("height")
            .or(self.static_extent)
            .unwrap_or(self.font.size);
        let mut image = LayoutBox::new(BoxKind::Image, BoxSize::new(width, height), self);
        image.edge.clone_from(&self.edge);
        image.classes = vec!["nehan-block".to_string(), "nehan-image".to_string()];
        image
            .classes
            .extend(self.markup.classes().into_iter().map(str::to_string));
        image.break_after = self.is_break_after() || opts.break_after;
        image
    }

    /// An empty line that forces a break after itself.
    #[must_use]
    pub fn create_break_line(&self) -> LayoutBox {
        let mut line = LayoutBox::new(
            BoxKind::Line,
            self.flow.box_size(self.content_measure, 0),
            self,
        );
        line.display = DisplayKind::Inline;
        line.break_after = true;
        line
    }

    /// Smallest extent a line of this node may have.
    fn min_line_extent(&self, rt_font_size: i32) -> i32 {
        if self.is_text_empha_enable() {
            self.empha_line_extent()
        } else if self.markup_name() == "ruby" {
            self.ruby_line_extent(rt_font_size)
        } else {
            self.auto_line_extent()
        }
    }
}

impl StyleTree {
    /// Build a line box of `node`.
    ///
    /// A root line (one directly under a block or an inline-block) has no
    /// edge of its own, keeps the state needed to resume its inline
    /// context, and aligns its children: to a common center in vertical
    /// flow, and along the inline axis for any `text-align` but start.
    #[must_use]
    pub fn create_line(&self, node: &StyleNode, opts: LineOptions) -> LayoutBox {
        let rt_font_size = self.config().rt_font_size(node.font_size());
        let max_font_size = opts
            .max_font_size
            .filter(|&size| size > 0)
            .unwrap_or_else(|| node.font_size());
        let max_extent = opts
            .max_extent
            .unwrap_or(0)
            .max(node.min_line_extent(rt_font_size));
        let supplied = opts.measure.filter(|&m| m > 0);
        let mut measure = match supplied {
            Some(m) if !node.is_root() && node.static_measure.is_none() && !node.is_root_line() => {
                m
            }
            _ => node.content_measure,
        };
        if node.is_inline_block() {
            measure = node
                .static_measure
                .or(supplied)
                .unwrap_or(node.content_measure);
        }

        let mut line = LayoutBox::new(BoxKind::Line, node.flow.box_size(measure, max_extent), node);
        line.display = DisplayKind::Inline;
        line.classes = vec![
            "nehan-inline".to_string(),
            format!("nehan-inline-{}", node.flow),
        ];
        line.classes
            .extend(node.markup.classes().into_iter().map(str::to_string));
        line.char_count = opts.char_count;
        line.content = opts.content;

        if !node.is_root_line() {
            line.classes.push(format!("nehan-{}", node.markup_name()));
            line.edge.clone_from(&node.edge);
            line.elements = opts.elements;
            line.line = Some(LineMetrics {
                max_font_size,
                max_extent,
                ..LineMetrics::default()
            });
            return line;
        }

        let inline_measure = supplied.unwrap_or(node.content_measure);
        line.break_after = opts.break_after;
        line.elements = opts.elements;
        line.line = Some(LineMetrics {
            max_font_size,
            max_extent,
            inline_measure,
            line_break: opts.line_break,
            texts: opts.texts,
        });
        if node.is_text_vertical() {
            align_vertical_baseline(&mut line.elements, node.flow, max_extent);
        }
        if !node.text_align.is_start() {
            apply_text_align(&mut line, node.text_align, inline_measure);
        }
        line
    }
}

/// Give every child box of a vertical root line the line's extent, then
/// pad decorated children after so their glyphs sit on the line's center
/// instead of its before edge.
///
/// ```text
///  max_extent
/// |<------>|
/// |  rt|ab |   ruby: padding after = max_extent/2 - font/2
/// ```
fn align_vertical_baseline(elements: &mut [BoxElement], flow: BoxFlow, max_extent: i32) {
    for element in elements.iter_mut() {
        if let BoxElement::Box(child) = element
            && child.origin.markup_name != "img"
            && child.origin.display != DisplayKind::InlineBlock
        {
            child.size.set_extent(flow, max_extent);
        }
    }
    pad_decorated(elements, max_extent.div_euclid(2));
}

fn pad_decorated(elements: &mut [BoxElement], text_center: i32) {
    for element in elements.iter_mut() {
        let BoxElement::Box(child) = element else {
            continue;
        };
        if !child.origin.decorated {
            pad_decorated(&mut child.elements, text_center);
            continue;
        }
        let offset = text_center - child.origin.font_size.div_euclid(2);
        if offset > 0 {
            let mut edge = child.edge.clone().unwrap_or_default();
            *edge.padding.get_mut(LogicalSide::After) = offset;
            trace!(target: "nehan", "<{}> baseline offset {offset}", child.origin.markup_name);
            child.edge = Some(edge);
        }
    }
}

/// [§ 6.1 text-align](https://www.w3.org/TR/css-text-3/#text-align-property)
///
/// Shift a root line's content along the inline axis by padding its
/// start. `inline_measure` is the measure the content actually takes.
fn apply_text_align(line: &mut LayoutBox, text_align: TextAlign, inline_measure: i32) {
    let content_measure = line.measure();
    let space = content_measure - inline_measure;
    if space <= 0 {
        return;
    }
    let (measure, start) = match text_align {
        TextAlign::Center => {
            let offset = space.div_euclid(2);
            (content_measure - offset, offset)
        }
        TextAlign::End => (inline_measure, space),
        TextAlign::Start | TextAlign::Justify => return,
    };
    let flow = line.flow;
    line.size.set_measure(flow, measure);
    line.edge = Some(Edge::with_padding(LogicalSides {
        start,
        ..LogicalSides::default()
    }));
}
