//! Length parsing and unit conversion.
//!
//! [§ 5 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
//!
//! Every length the engine keeps is an integer number of pixels. Values are
//! read the way the markup authors of vertical documents write them:
//! a leading number followed by an optional unit, trailing garbage ignored.

use crate::error::StyleError;

/// Round half up, so `-2.5` becomes `-2` and `2.5` becomes `3`.
#[must_use]
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Read the leading integer of `s` (`"12px"` → 12, `"-3"` → -3).
#[must_use]
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let digits_start = usize::from(s.starts_with(['-', '+']));
    let digits_len = s[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    s[..digits_start + digits_len].parse().ok()
}

/// Read the leading decimal number of `s` (`"1.5em"` → 1.5, `".5"` → 0.5).
#[must_use]
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = usize::from(s.starts_with(['-', '+']));
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in s[end..].chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}

/// Sizes a relative length is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitBasis {
    /// Font size `em` refers to.
    pub font_size: i32,
    /// Root font size `rem` refers to.
    pub root_font_size: i32,
    /// Size `%` refers to.
    pub max_size: i32,
}

/// [§ 5.1 Relative Lengths](https://www.w3.org/TR/css-values-4/#relative-lengths)
///
/// Convert a length to pixels.
///
/// | unit | result |
/// |------|--------|
/// | `rem` | root font size × n |
/// | `em`  | font size × n |
/// | `pt`  | n × 4/3 |
/// | `%`   | max size × n / 100 |
/// | `px`, none | n |
///
/// # Errors
/// Returns [`StyleError::InvalidLength`] if no number can be read.
pub fn compute_unit_size(value: &str, basis: UnitBasis) -> Result<i32, StyleError> {
    let s = value.trim().to_ascii_lowercase();
    let invalid = || StyleError::InvalidLength(value.to_string());
    let has_unit = |unit: &str| s.find(unit).is_some_and(|pos| pos > 0);

    if has_unit("rem") {
        let scale = parse_leading_float(&s).ok_or_else(invalid)?;
        return Ok(round_half_up(f64::from(basis.root_font_size) * scale));
    }
    if has_unit("em") {
        let scale = parse_leading_float(&s).ok_or_else(invalid)?;
        return Ok(round_half_up(f64::from(basis.font_size) * scale));
    }
    if has_unit("pt") {
        let pt = parse_leading_int(&s).ok_or_else(invalid)?;
        return Ok(round_half_up(pt as f64 * 4.0 / 3.0));
    }
    if has_unit("%") {
        let percent = parse_leading_int(&s).ok_or_else(invalid)?;
        return Ok(round_half_up(f64::from(basis.max_size) * percent as f64 / 100.0));
    }
    parse_leading_int(&s)
        .and_then(|px| i32::try_from(px).ok())
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIS: UnitBasis = UnitBasis {
        font_size: 20,
        root_font_size: 16,
        max_size: 300,
    };

    #[test]
    fn test_units() {
        assert_eq!(compute_unit_size("12px", BASIS).unwrap(), 12);
        assert_eq!(compute_unit_size("12", BASIS).unwrap(), 12);
        assert_eq!(compute_unit_size("1.5em", BASIS).unwrap(), 30);
        assert_eq!(compute_unit_size("2rem", BASIS).unwrap(), 32);
        assert_eq!(compute_unit_size("12pt", BASIS).unwrap(), 16);
        assert_eq!(compute_unit_size("50%", BASIS).unwrap(), 150);
    }

    #[test]
    fn test_invalid_length() {
        assert!(matches!(
            compute_unit_size("auto", BASIS),
            Err(StyleError::InvalidLength(_))
        ));
        assert!(compute_unit_size("em", BASIS).is_err());
    }

    #[test]
    fn test_leading_numbers() {
        assert_eq!(parse_leading_int(" -3px"), Some(-3));
        assert_eq!(parse_leading_int("px"), None);
        assert_eq!(parse_leading_float(".5em"), Some(0.5));
        assert_eq!(parse_leading_float("1.em"), Some(1.0));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
    }
}
