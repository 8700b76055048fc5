//! [§ 3 Basic Font Properties](https://www.w3.org/TR/css-fonts-4/#basic-font-props)

use serde::Serialize;

/// Resolved font of a node. Every field is inherited from the parent unless
/// the node declares its own value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Font {
    /// Computed size in px, already clamped to the configured maximum.
    pub size: i32,
    /// `font-family` as declared.
    pub family: String,
    /// `font-weight` as declared.
    pub weight: Option<String>,
    /// `font-style` as declared.
    pub style: Option<String>,
}

impl Font {
    /// A font with only size and family set.
    #[must_use]
    pub fn new(size: i32, family: &str) -> Self {
        Self {
            size,
            family: family.to_string(),
            weight: None,
            style: None,
        }
    }

    /// Returns true if the weight is `bold`, `bolder` or 600 and above.
    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.weight.as_deref().is_some_and(|w| match w {
            "bold" | "bolder" => true,
            w => w.parse::<u16>().is_ok_and(|n| n >= 600),
        })
    }
}
