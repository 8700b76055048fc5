//! Read-only views handed to selector engines, computed values and hooks.

use nehan_markup::Markup;

use crate::config::LayoutConfig;
use crate::node::StyleNode;
use crate::tree::{StyleId, StyleTree};
use crate::values::{CssValue, PropertyMap};

/// Where the layout driver stands when a node is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorContext {
    /// Measure left on the current line.
    pub rest_measure: i32,
    /// Extent left on the current page.
    pub rest_extent: i32,
}

/// A node as seen from user code.
///
/// During the cascade the node does not exist yet: `properties` holds the
/// declarations merged so far and `font_size` is the parent's. Once the node
/// is resolved the context describes it fully.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    /// The tree the node belongs to.
    pub tree: &'a StyleTree,
    /// Markup of the node.
    pub markup: &'a Markup,
    /// Parent node, `None` for the root.
    pub parent: Option<StyleId>,
    /// Font size in px the node's `em` refers to.
    pub font_size: i32,
    /// Declarations visible at this point, if any.
    pub properties: Option<&'a PropertyMap>,
    /// Cursor at creation time.
    pub cursor: Option<&'a CursorContext>,
}

impl<'a> EvalContext<'a> {
    /// Context describing a resolved node.
    #[must_use]
    pub fn for_node(tree: &'a StyleTree, node: &'a StyleNode) -> Self {
        Self {
            tree,
            markup: &node.markup,
            parent: node.parent,
            font_size: node.font.size,
            properties: Some(node.managed.map()),
            cursor: node.cursor.as_ref(),
        }
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &'a LayoutConfig {
        self.tree.config()
    }

    /// Resolved parent node.
    #[must_use]
    pub fn parent_node(&self) -> Option<&'a StyleNode> {
        self.parent.and_then(|id| self.tree.get(id))
    }

    /// Declared value of `name`, unevaluated.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&'a CssValue> {
        self.properties.and_then(|map| map.get(name))
    }

    /// Measure left on the current line, the parent's content measure when
    /// no cursor was given.
    #[must_use]
    pub fn rest_measure(&self) -> i32 {
        self.cursor.map_or_else(
            || self.parent_node().map_or(0, |p| p.content_measure),
            |c| c.rest_measure,
        )
    }

    /// Extent left on the current page, the parent's content extent when
    /// no cursor was given.
    #[must_use]
    pub fn rest_extent(&self) -> i32 {
        self.cursor.map_or_else(
            || self.parent_node().map_or(0, |p| p.content_extent),
            |c| c.rest_extent,
        )
    }
}
