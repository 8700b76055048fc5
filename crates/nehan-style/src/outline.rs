//! [§ 4.3.11 Headings and outlines](https://html.spec.whatwg.org/multipage/sections.html#headings-and-outlines)
//!
//! Section roots (`body`, `blockquote`, `fieldset`, `figure`, `td`) record
//! sections and headings as the layout driver walks them. When a root ends
//! its log is moved into the tree's [`OutlineCollection`], from which a
//! table of contents can be built with [`OutlineContext::sections`].

use serde::Serialize;

/// [§ 4.3.11 Sectioning roots](https://html.spec.whatwg.org/multipage/sections.html#sectioning-root)
pub const SECTION_ROOTS: &[&str] = &["body", "blockquote", "fieldset", "figure", "td"];

/// [§ 3.2.5.2.3 Sectioning content](https://html.spec.whatwg.org/multipage/dom.html#sectioning-content)
pub const SECTIONING_CONTENT: &[&str] = &["article", "aside", "nav", "section"];

/// Returns true if `name` starts an outline of its own.
#[must_use]
pub fn is_section_root(name: &str) -> bool {
    SECTION_ROOTS.contains(&name)
}

/// Returns true if `name` opens a section in the nearest outline.
#[must_use]
pub fn is_sectioning_content(name: &str) -> bool {
    SECTIONING_CONTENT.contains(&name)
}

/// A heading as recorded in an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineHeader {
    /// Markup name, `h1` to `h6`.
    pub kind: String,
    /// Heading rank, 1 to 6.
    pub rank: u8,
    /// Heading text.
    pub title: String,
    /// Anchor id generated for the heading.
    pub id: String,
}

/// One outline event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutlineLog {
    /// A sectioning element (`section`, `article`, `aside`, `nav`) opened.
    StartSection {
        /// Markup name of the section.
        name: String,
    },
    /// A sectioning element closed.
    EndSection {
        /// Markup name of the section.
        name: String,
    },
    /// A heading was met.
    Header(OutlineHeader),
}

/// Outline log of one section root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineContext {
    markup_name: String,
    logs: Vec<OutlineLog>,
}

/// A section with its heading and nested sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Markup name of the sectioning element, or the heading name for
    /// implicit sections.
    pub kind: String,
    /// First heading of the section.
    pub header: Option<OutlineHeader>,
    /// Nested sections in document order.
    pub children: Vec<Section>,
}

impl Section {
    fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            header: None,
            children: Vec::new(),
        }
    }
}

impl OutlineContext {
    /// Empty log for the section root `markup_name`.
    #[must_use]
    pub fn new(markup_name: &str) -> Self {
        Self {
            markup_name: markup_name.to_string(),
            logs: Vec::new(),
        }
    }

    /// Markup name of the section root.
    #[must_use]
    pub fn markup_name(&self) -> &str {
        &self.markup_name
    }

    /// Recorded events in document order.
    #[must_use]
    pub fn logs(&self) -> &[OutlineLog] {
        &self.logs
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Record the start of a sectioning element.
    pub fn start_section(&mut self, name: &str) {
        self.logs.push(OutlineLog::StartSection {
            name: name.to_string(),
        });
    }

    /// Record the end of a sectioning element.
    pub fn end_section(&mut self, name: &str) {
        self.logs.push(OutlineLog::EndSection {
            name: name.to_string(),
        });
    }

    /// Record a heading.
    pub fn add_header(&mut self, header: OutlineHeader) {
        self.logs.push(OutlineLog::Header(header));
    }

    /// [§ 4.3.11.1 Creating an outline](https://html.spec.whatwg.org/multipage/sections.html#outline)
    ///
    /// Fold the log into a section tree rooted at the section root. A
    /// heading in a section that already has one opens an implicit
    /// subsection; implicit sections close when a heading of the same or
    /// higher rank arrives or their explicit parent ends.
    #[must_use]
    pub fn sections(&self) -> Section {
        let mut stack: Vec<(Section, bool)> = vec![(Section::new(&self.markup_name), false)];

        for log in &self.logs {
            match log {
                OutlineLog::StartSection { name } => {
                    close_implicit(&mut stack, None);
                    stack.push((Section::new(name), false));
                }
                OutlineLog::EndSection { .. } => {
                    close_implicit(&mut stack, None);
                    if stack.len() > 1 {
                        pop_into_parent(&mut stack);
                    }
                }
                OutlineLog::Header(header) => {
                    close_implicit(&mut stack, Some(header.rank));
                    let Some((top, _)) = stack.last_mut() else {
                        continue;
                    };
                    if top.header.is_none() {
                        top.header = Some(header.clone());
                    } else {
                        let mut implicit = Section::new(&header.kind);
                        implicit.header = Some(header.clone());
                        stack.push((implicit, true));
                    }
                }
            }
        }
        while stack.len() > 1 {
            pop_into_parent(&mut stack);
        }
        stack
            .pop()
            .map_or_else(|| Section::new(&self.markup_name), |(root, _)| root)
    }
}

/// Close implicit sections on top of the stack. With a rank, only those
/// whose heading is of the same or lower importance.
fn close_implicit(stack: &mut Vec<(Section, bool)>, rank: Option<u8>) {
    while let Some((top, true)) = stack.last() {
        let outranked = match (rank, &top.header) {
            (Some(rank), Some(header)) => header.rank >= rank,
            _ => true,
        };
        if !outranked {
            break;
        }
        pop_into_parent(stack);
    }
}

fn pop_into_parent(stack: &mut Vec<(Section, bool)>) {
    if let Some((section, _)) = stack.pop()
        && let Some((parent, _)) = stack.last_mut()
    {
        parent.children.push(section);
    }
}

/// Outlines flushed from finished section roots, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutlineCollection {
    contexts: Vec<OutlineContext>,
}

impl OutlineCollection {
    /// Append a finished outline.
    pub fn add(&mut self, context: OutlineContext) {
        self.contexts.push(context);
    }

    /// All outlines.
    #[must_use]
    pub fn contexts(&self) -> &[OutlineContext] {
        &self.contexts
    }

    /// Outlines of section roots named `markup_name`.
    pub fn find<'a>(&'a self, markup_name: &'a str) -> impl Iterator<Item = &'a OutlineContext> {
        self.contexts
            .iter()
            .filter(move |c| c.markup_name == markup_name)
    }

    /// Number of outlines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Returns true if no outline was flushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(rank: u8, title: &str) -> OutlineHeader {
        OutlineHeader {
            kind: format!("h{rank}"),
            rank,
            title: title.to_string(),
            id: format!("id-{title}"),
        }
    }

    #[test]
    fn test_sections_nest_explicit_and_implicit() {
        let mut ctx = OutlineContext::new("body");
        ctx.add_header(header(1, "book"));
        ctx.start_section("section");
        ctx.add_header(header(2, "chapter"));
        ctx.add_header(header(3, "part a"));
        ctx.add_header(header(3, "part b"));
        ctx.end_section("section");

        let root = ctx.sections();
        assert_eq!(root.kind, "body");
        assert_eq!(root.header.as_ref().unwrap().title, "book");
        assert_eq!(root.children.len(), 1);

        let chapter = &root.children[0];
        assert_eq!(chapter.kind, "section");
        let titles: Vec<&str> = chapter
            .children
            .iter()
            .map(|s| s.header.as_ref().unwrap().title.as_str())
            .collect();
        assert_eq!(titles, ["part a", "part b"]);
    }

    #[test]
    fn test_unbalanced_end_is_ignored() {
        let mut ctx = OutlineContext::new("td");
        ctx.end_section("section");
        assert!(ctx.sections().children.is_empty());
    }
}
