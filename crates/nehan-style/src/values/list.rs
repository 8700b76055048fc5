//! [§ 3 Markers](https://www.w3.org/TR/css-lists-3/#markers)

use serde::Serialize;

use crate::values::keywords::{ListStylePosition, ListStyleType};

/// Resolved list style of a list container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListStyle {
    /// Counter style of the marker.
    pub kind: ListStyleType,
    /// Where the marker is placed.
    pub position: ListStylePosition,
    /// `list-style-image` URL, replacing the text marker when set.
    pub image: Option<String>,
}

impl ListStyle {
    /// Returns true if markers stand outside the item box.
    #[must_use]
    pub const fn is_outside(&self) -> bool {
        matches!(self.position, ListStylePosition::Outside)
    }

    /// Marker text of the `order`-th item (1-based).
    #[must_use]
    pub fn marker_text(&self, order: usize) -> String {
        let counter = match self.kind {
            ListStyleType::Disc => return "\u{2022}".to_string(),
            ListStyleType::Circle => return "\u{25e6}".to_string(),
            ListStyleType::Square => return "\u{25aa}".to_string(),
            ListStyleType::Decimal => order.to_string(),
            ListStyleType::DecimalLeadingZero => format!("{order:02}"),
            ListStyleType::LowerAlpha => alphabetic(order, 'a', 26),
            ListStyleType::UpperAlpha => alphabetic(order, 'A', 26),
            ListStyleType::LowerRoman => roman(order).to_lowercase(),
            ListStyleType::UpperRoman => roman(order),
            ListStyleType::LowerGreek => alphabetic(order, '\u{3b1}', 24),
            ListStyleType::CjkIdeographic => return format!("{}\u{3001}", cjk(order)),
        };
        format!("{counter}.")
    }

    /// Markup the marker of the `order`-th item is laid out from.
    #[must_use]
    pub fn marker_html(&self, order: usize) -> String {
        self.image.as_ref().map_or_else(
            || self.marker_text(order),
            |src| format!("<img src='{src}' class='nehan-list-image' />"),
        )
    }
}

/// [§ 6.1.4 alphabetic](https://www.w3.org/TR/css-counter-styles-3/#alphabetic-system)
fn alphabetic(order: usize, first: char, radix: u32) -> String {
    let mut n = order as u32;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(char::from_u32(u32::from(first) + n % radix).unwrap_or(first));
        n /= radix;
    }
    out.iter().rev().collect()
}

/// [§ 6.1.5 additive](https://www.w3.org/TR/css-counter-styles-3/#additive-system)
fn roman(order: usize) -> String {
    const TABLE: &[(usize, &str)] = &[
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    if order == 0 || order > 3999 {
        return order.to_string();
    }
    let mut rest = order;
    let mut out = String::new();
    for &(value, digits) in TABLE {
        while rest >= value {
            out.push_str(digits);
            rest -= value;
        }
    }
    out
}

fn cjk(order: usize) -> String {
    const DIGITS: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];
    const UNITS: [(usize, char); 3] = [(1000, '千'), (100, '百'), (10, '十')];
    if order == 0 || order > 9999 {
        return order.to_string();
    }
    let mut rest = order;
    let mut out = String::new();
    for (unit, name) in UNITS {
        let digit = rest / unit;
        if digit > 1 {
            out.push(DIGITS[digit]);
        }
        if digit > 0 {
            out.push(name);
        }
        rest %= unit;
    }
    if rest > 0 {
        out.push(DIGITS[rest]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(kind: ListStyleType) -> ListStyle {
        ListStyle {
            kind,
            position: ListStylePosition::Outside,
            image: None,
        }
    }

    #[test]
    fn test_counter_markers() {
        assert_eq!(style(ListStyleType::Decimal).marker_text(12), "12.");
        assert_eq!(style(ListStyleType::LowerAlpha).marker_text(28), "ab.");
        assert_eq!(style(ListStyleType::UpperRoman).marker_text(14), "XIV.");
        assert_eq!(style(ListStyleType::CjkIdeographic).marker_text(21), "二十一、");
        assert_eq!(style(ListStyleType::Disc).marker_text(3), "\u{2022}");
    }

    #[test]
    fn test_image_marker() {
        let mut list = style(ListStyleType::Disc);
        list.image = Some("dot.png".to_string());
        assert_eq!(
            list.marker_html(1),
            "<img src='dot.png' class='nehan-list-image' />"
        );
    }
}
