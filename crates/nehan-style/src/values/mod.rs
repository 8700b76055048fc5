//! Property values.
//!
//! A declared value is kept as a [`CssValue`]: literal text, a number, a
//! per-side map produced by shorthand expansion, or a function evaluated
//! lazily against an [`EvalContext`]. Typed values ([`Color`], [`Font`],
//! [`ListStyle`], ...) are produced from these during style resolution.

pub mod color;
pub mod empha;
pub mod font;
pub mod keywords;
pub mod list;
pub mod position;
pub mod sides;
pub mod unit;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Serialize, Serializer};

use crate::context::EvalContext;

pub use color::Color;
pub use empha::{TextEmpha, TextEmphaStyle};
pub use font::Font;
pub use keywords::*;
pub use list::ListStyle;
pub use position::Position;
pub use sides::{LogicalCorners, LogicalSides};
pub use unit::{UnitBasis, compute_unit_size, round_half_up};

/// Property name to declared value.
pub type PropertyMap = HashMap<String, CssValue>;

/// A value computed from the node it is read on.
///
/// Stored under an ordinary property name and evaluated every time that
/// property is read, so the same rule can yield different values for
/// different nodes without re-running the cascade.
#[derive(Clone)]
pub struct ComputedFn(Rc<dyn Fn(&EvalContext<'_>) -> CssValue>);

impl ComputedFn {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&EvalContext<'_>) -> CssValue + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Evaluate against `ctx`.
    #[must_use]
    pub fn call(&self, ctx: &EvalContext<'_>) -> CssValue {
        (self.0)(ctx)
    }
}

/// A hook returning extra declarations for the node being resolved.
///
/// Stored under `onload` (invoked during the cascade) or `oncreate`
/// (kept verbatim for the renderer).
#[derive(Clone)]
pub struct HookFn(Rc<dyn Fn(&EvalContext<'_>) -> PropertyMap>);

impl HookFn {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&EvalContext<'_>) -> PropertyMap + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Evaluate against `ctx`.
    #[must_use]
    pub fn call(&self, ctx: &EvalContext<'_>) -> PropertyMap {
        (self.0)(ctx)
    }
}

impl fmt::Debug for ComputedFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ComputedFn(..)")
    }
}

impl fmt::Debug for HookFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HookFn(..)")
    }
}

impl PartialEq for ComputedFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for HookFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A declared property value.
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    /// Literal text, already trimmed.
    Text(String),
    /// A bare number (`line-rate: 1.5`).
    Number(f64),
    /// Per-side values from `margin`, `padding`, `border-*` and their
    /// subdivided forms. Unset sides are `None`.
    Sides(LogicalSides<Option<String>>),
    /// Per-corner values from `border-radius`.
    Corners(LogicalCorners<Option<String>>),
    /// Evaluated on read.
    Computed(ComputedFn),
    /// `onload`/`oncreate` hooks.
    Hook(HookFn),
}

impl CssValue {
    /// Text payload, if this is [`CssValue::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text or number rendered as text.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Per-side payload, if this is [`CssValue::Sides`].
    #[must_use]
    pub const fn as_sides(&self) -> Option<&LogicalSides<Option<String>>> {
        match self {
            Self::Sides(sides) => Some(sides),
            _ => None,
        }
    }

    /// Per-corner payload, if this is [`CssValue::Corners`].
    #[must_use]
    pub const fn as_corners(&self) -> Option<&LogicalCorners<Option<String>>> {
        match self {
            Self::Corners(corners) => Some(corners),
            _ => None,
        }
    }
}

impl From<&str> for CssValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CssValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CssValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for CssValue {
    fn from(value: i32) -> Self {
        Self::Text(format!("{value}px"))
    }
}

impl From<ComputedFn> for CssValue {
    fn from(value: ComputedFn) -> Self {
        Self::Computed(value)
    }
}

impl From<HookFn> for CssValue {
    fn from(value: HookFn) -> Self {
        Self::Hook(value)
    }
}

impl Serialize for CssValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Sides(sides) => sides.serialize(serializer),
            Self::Corners(corners) => corners.serialize(serializer),
            Self::Computed(_) => serializer.serialize_str("<computed>"),
            Self::Hook(_) => serializer.serialize_str("<hook>"),
        }
    }
}
