//! Text runs inside a line.

use serde::Serialize;

/// Longest run of half-width characters set upright in one cell of a
/// vertical line.
const TCY_MAX_LEN: usize = 2;

/// A unit of text as the line breaker sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextItem {
    /// A single character.
    Char(char),
    /// A run of half-width characters that never breaks.
    Word(String),
    /// Tate-chu-yoko: a short half-width run set horizontally inside a
    /// vertical line, taking one full-width cell.
    Tcy(String),
}

impl TextItem {
    /// Split `text` into items. Runs of ASCII alphanumerics become words,
    /// or tate-chu-yoko when `vertical` and the run is short enough.
    #[must_use]
    pub fn split(text: &str, vertical: bool) -> Vec<Self> {
        let mut items = Vec::new();
        let mut run = String::new();
        for c in text.chars() {
            if c.is_ascii_alphanumeric() {
                run.push(c);
                continue;
            }
            if !run.is_empty() {
                items.push(Self::from_run(std::mem::take(&mut run), vertical));
            }
            items.push(Self::Char(c));
        }
        if !run.is_empty() {
            items.push(Self::from_run(run, vertical));
        }
        items
    }

    fn from_run(run: String, vertical: bool) -> Self {
        if vertical && run.len() <= TCY_MAX_LEN {
            Self::Tcy(run)
        } else {
            Self::Word(run)
        }
    }

    /// Characters counted for pagination. Tate-chu-yoko counts as one.
    #[must_use]
    pub fn char_count(&self) -> usize {
        match self {
            Self::Char(_) | Self::Tcy(_) => 1,
            Self::Word(word) => word.chars().count(),
        }
    }

    /// Advance along the inline axis. Half-width characters take half the
    /// font size; `letter_spacing` is added once per item.
    #[must_use]
    pub fn advance(&self, font_size: i32, letter_spacing: i32) -> i32 {
        let half = font_size.div_euclid(2);
        let body = match self {
            Self::Char(c) if c.is_ascii() => half,
            Self::Char(_) | Self::Tcy(_) => font_size,
            Self::Word(word) => {
                i32::try_from(word.len()).map_or(i32::MAX, |n| half.saturating_mul(n))
            }
        };
        body + letter_spacing
    }

    /// The text of the item.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::Word(s) | Self::Tcy(s) => s.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_mixed_text() {
        let items = TextItem::split("第1章 chapter", true);
        assert_eq!(
            items,
            vec![
                TextItem::Char('第'),
                TextItem::Tcy("1".to_string()),
                TextItem::Char('章'),
                TextItem::Char(' '),
                TextItem::Word("chapter".to_string()),
            ]
        );
    }

    #[test]
    fn test_horizontal_runs_are_words() {
        let items = TextItem::split("12", false);
        assert_eq!(items, vec![TextItem::Word("12".to_string())]);
    }

    #[test]
    fn test_advance() {
        assert_eq!(TextItem::Char('あ').advance(16, 0), 16);
        assert_eq!(TextItem::Char('a').advance(16, 2), 10);
        assert_eq!(TextItem::Tcy("12".to_string()).advance(16, 0), 16);
        assert_eq!(TextItem::Word("abc".to_string()).advance(16, 0), 24);
    }

    #[test]
    fn test_char_count() {
        assert_eq!(TextItem::Tcy("12".to_string()).char_count(), 1);
        assert_eq!(TextItem::Word("abc".to_string()).char_count(), 3);
    }
}
