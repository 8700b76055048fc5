//! Style resolution and box construction for the nehan layout engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Cascade** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - Selector, inline `style`, `onload` hook and forced declarations
//!   - Shorthand expansion into logical sides and corners
//!   - Managed/unmanaged partition of the result
//!
//! - **Box model** ([CSS Box Model Level 4](https://www.w3.org/TR/css-box-4/))
//!   - Flow-relative edges (margin, border, padding)
//!   - `box-sizing` and content size propagation
//!   - Margin collapsing between sibling blocks
//!
//! - **Writing modes** ([CSS Writing Modes Level 4](https://www.w3.org/TR/css-writing-modes-4/))
//!   - Horizontal and vertical flows, measured as measure × extent
//!
//! - **Boxes**
//!   - Block, line and image construction
//!   - Baseline alignment of ruby and emphasis in vertical lines
//!   - `text-align` on root lines
//!
//! - **Generated content and outlines**
//!   - `::before`, `::after`, `::first-letter`, `::first-line`
//!   - Section and heading tracking
//!
//! # Not Implemented
//!
//! - Selector matching beyond compound selectors (see [`selector`])
//! - CSS serialization of resolved styles
//! - Page and line breaking, which belong to the layout driver

/// Box types and builders.
pub mod boxes;
/// Declaration normalization and the property store.
pub mod cascade;
/// Display defaults.
pub mod config;
/// Evaluation contexts for computed values.
pub mod context;
/// Margin, border and padding.
pub mod edge;
/// Error types.
pub mod error;
/// Writing flows.
pub mod flow;
/// Resolved style nodes.
pub mod node;
/// Document outline.
pub mod outline;
mod resolve;
/// Selector engines.
pub mod selector;
/// The style tree.
pub mod tree;
/// Property values.
pub mod values;

pub use boxes::{BlockOptions, BoxElement, BoxKind, ImageOptions, LayoutBox, LineOptions, TextItem};
pub use config::LayoutConfig;
pub use context::{CursorContext, EvalContext};
pub use error::StyleError;
pub use flow::{BoxFlow, BoxSize, LogicalSide};
pub use node::StyleNode;
pub use selector::{NoSelectors, SelectorEngine, SimpleSelectors};
pub use tree::{HeaderOptions, StyleArgs, StyleId, StyleTree};
pub use values::{Color, CssValue, PropertyMap};
