//! Errors raised while interpreting property values and configuration.
//!
//! None of these escape a layout operation: resolution logs them through
//! [`nehan_common::warning::warn_once`] and treats the value as absent.
//! They surface directly only from explicit parsing entry points such as
//! [`crate::LayoutConfig::from_json`] and [`crate::Color::parse`].

use thiserror::Error;

/// The error type for value parsing and configuration loading.
#[derive(Debug, Error)]
pub enum StyleError {
    /// A length could not be read (`"3q"`, `"abc"`, `""`).
    #[error("invalid length '{0}'")]
    InvalidLength(String),

    /// A keyword property got a value it does not define.
    #[error("unknown value '{value}' for property '{property}'")]
    UnknownKeyword {
        /// Property name, e.g. `text-align`.
        property: String,
        /// The rejected value.
        value: String,
    },

    /// No flow is registered under this name.
    #[error("unknown flow '{0}'")]
    UnknownFlow(String),

    /// A color value could not be parsed.
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// A selector could not be parsed.
    #[error("invalid selector '{0}'")]
    InvalidSelector(String),

    /// The layout configuration JSON was malformed.
    #[error("failed to parse layout config: {0}")]
    Config(#[from] serde_json::Error),
}

impl StyleError {
    /// Shorthand for [`StyleError::UnknownKeyword`].
    #[must_use]
    pub fn unknown_keyword(property: &str, value: &str) -> Self {
        Self::UnknownKeyword {
            property: property.to_string(),
            value: value.to_string(),
        }
    }
}
