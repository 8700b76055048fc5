//! The selector seam.
//!
//! Style resolution only needs "the declarations that apply to this node"
//! and "the declarations of this node's `::before`" (and friends); how rules
//! are matched is up to the [`SelectorEngine`]. [`SimpleSelectors`] covers
//! type, class and id selectors, which is enough for the CLI and for tests.

use std::str::FromStr;

use nehan_markup::Markup;

use crate::cascade::PropertyStore;
use crate::context::EvalContext;
use crate::error::StyleError;
use crate::values::{PropertyMap, PseudoElement};

/// Source of selector-matched declarations.
///
/// Both methods may be called any number of times for the same node and
/// must return the same result each time.
pub trait SelectorEngine {
    /// Declarations matching the node described by `ctx`.
    fn get_value(&self, ctx: &EvalContext<'_>) -> PropertyMap;

    /// Declarations of `pseudo` on the node described by `ctx`. An empty
    /// map means the pseudo-element does not exist.
    fn get_value_pe(&self, ctx: &EvalContext<'_>, pseudo: PseudoElement) -> PropertyMap;
}

/// A selector engine that matches nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelectors;

impl SelectorEngine for NoSelectors {
    fn get_value(&self, _ctx: &EvalContext<'_>) -> PropertyMap {
        PropertyMap::new()
    }

    fn get_value_pe(&self, _ctx: &EvalContext<'_>, _pseudo: PseudoElement) -> PropertyMap {
        PropertyMap::new()
    }
}

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
///
/// A compound of an optional type (or `*`), classes and an id, optionally
/// followed by a pseudo-element: `p`, `li.note#first`, `h1::before`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CompoundSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    pseudo: Option<PseudoElement>,
}

impl FromStr for CompoundSelector {
    type Err = StyleError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let invalid = || StyleError::InvalidSelector(source.to_string());
        let source_trimmed = source.trim();
        let (base, pseudo) = match source_trimmed.split_once("::") {
            Some((base, pseudo)) => (base, Some(pseudo.parse().map_err(|_| invalid())?)),
            None => (source_trimmed, None),
        };
        if base.is_empty() || base.contains(char::is_whitespace) {
            return Err(invalid());
        }

        let mut selector = Self {
            tag: None,
            id: None,
            classes: Vec::new(),
            pseudo,
        };
        let mut rest = base;
        let head_len = rest.find(['.', '#']).unwrap_or(rest.len());
        let head = &rest[..head_len];
        if head != "*" && !head.is_empty() {
            selector.tag = Some(head.to_ascii_lowercase());
        }
        rest = &rest[head_len..];
        while let Some(kind) = rest.chars().next() {
            let body = &rest[1..];
            let len = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..len];
            if name.is_empty() {
                return Err(invalid());
            }
            if kind == '#' {
                selector.id = Some(name.to_string());
            } else {
                selector.classes.push(name.to_string());
            }
            rest = &body[len..];
        }
        Ok(selector)
    }
}

impl CompoundSelector {
    /// [§ 17 Calculating a selector's specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
    fn specificity(&self) -> (usize, usize, usize) {
        (
            usize::from(self.id.is_some()),
            self.classes.len(),
            usize::from(self.tag.is_some()),
        )
    }

    fn matches(&self, markup: &Markup) -> bool {
        if self.tag.as_deref().is_some_and(|tag| tag != markup.name()) {
            return false;
        }
        if self.id.as_deref().is_some_and(|id| Some(id) != markup.id()) {
            return false;
        }
        let classes = markup.classes();
        self.classes.iter().all(|c| classes.contains(&c.as_str()))
    }
}

#[derive(Debug)]
struct Rule {
    selector: CompoundSelector,
    properties: PropertyMap,
}

/// An ordered list of `selector { declarations }` rules.
///
/// Matching rules are applied in specificity order, ties broken by
/// insertion order.
#[derive(Debug, Default)]
pub struct SimpleSelectors {
    rules: Vec<Rule>,
}

impl SimpleSelectors {
    /// No rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Add a rule. Declarations are normalized here, once.
    ///
    /// # Errors
    /// Returns [`StyleError::InvalidSelector`] if `selector` is not a
    /// compound selector.
    pub fn set_style(
        &mut self,
        selector: &str,
        declarations: PropertyMap,
    ) -> Result<(), StyleError> {
        let selector = selector.parse()?;
        let mut store = PropertyStore::new();
        store.add_declarations(declarations);
        self.rules.push(Rule {
            selector,
            properties: store.into_map(),
        });
        Ok(())
    }

    /// Builder form of [`SimpleSelectors::set_style`].
    ///
    /// # Errors
    /// See [`SimpleSelectors::set_style`].
    pub fn with_style(
        mut self,
        selector: &str,
        declarations: PropertyMap,
    ) -> Result<Self, StyleError> {
        self.set_style(selector, declarations)?;
        Ok(self)
    }

    fn collect(&self, markup: &Markup, pseudo: Option<PseudoElement>) -> PropertyMap {
        let mut matched: Vec<(usize, &Rule)> = self
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.selector.pseudo == pseudo && rule.selector.matches(markup))
            .collect();
        matched.sort_by_key(|(order, rule)| (rule.selector.specificity(), *order));

        let mut store = PropertyStore::new();
        for (_, rule) in matched {
            store.add_values(rule.properties.clone());
        }
        store.into_map()
    }
}

impl SelectorEngine for SimpleSelectors {
    fn get_value(&self, ctx: &EvalContext<'_>) -> PropertyMap {
        self.collect(ctx.markup, None)
    }

    fn get_value_pe(&self, ctx: &EvalContext<'_>, pseudo: PseudoElement) -> PropertyMap {
        self.collect(ctx.markup, Some(pseudo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound() {
        let sel: CompoundSelector = "li.note#first::before".parse().unwrap();
        assert_eq!(sel.tag.as_deref(), Some("li"));
        assert_eq!(sel.id.as_deref(), Some("first"));
        assert_eq!(sel.classes, ["note"]);
        assert_eq!(sel.pseudo, Some(PseudoElement::Before));
        assert_eq!(sel.specificity(), (1, 1, 1));

        let any: CompoundSelector = "*".parse().unwrap();
        assert_eq!(any.specificity(), (0, 0, 0));
    }

    #[test]
    fn test_invalid_selectors() {
        assert!("div p".parse::<CompoundSelector>().is_err());
        assert!("p::marker".parse::<CompoundSelector>().is_err());
        assert!("p.".parse::<CompoundSelector>().is_err());
    }

    #[test]
    fn test_matches() {
        let markup = Markup::new("p")
            .with_attr("class", "note wide")
            .with_attr("id", "intro");
        let sel: CompoundSelector = "p.wide#intro".parse().unwrap();
        assert!(sel.matches(&markup));
        let sel: CompoundSelector = ".missing".parse().unwrap();
        assert!(!sel.matches(&markup));
    }
}
