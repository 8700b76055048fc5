//! Integration tests for outline tracking on the style tree.

use nehan_markup::Markup;
use nehan_style::outline::OutlineLog;
use nehan_style::{HeaderOptions, LayoutConfig, NoSelectors, StyleArgs, StyleTree};

fn header(rank: u8, title: &str) -> HeaderOptions {
    HeaderOptions {
        kind: format!("h{rank}"),
        rank,
        title: title.to_string(),
    }
}

#[test]
fn test_outline_lifecycle() {
    let mut tree = StyleTree::new(LayoutConfig::default(), NoSelectors);
    let body = tree.create_root(Markup::new("body"));
    tree.start_outline_context(body);

    let h1 = tree.create_node(Markup::new("h1"), Some(body), StyleArgs::default());
    let section = tree.create_node(Markup::new("section"), Some(body), StyleArgs::default());
    let h2 = tree.create_node(Markup::new("h2"), Some(section), StyleArgs::default());

    assert_eq!(
        tree.start_header_context(h1, header(1, "Title")).as_deref(),
        Some("nehan-header-0")
    );
    tree.start_section_context(section);
    assert_eq!(
        tree.start_header_context(h2, header(2, "Chapter")).as_deref(),
        Some("nehan-header-1")
    );
    tree.end_section_context(section);
    assert!(tree.outlines().is_empty());

    tree.end_outline_context(body);
    assert_eq!(tree.outlines().len(), 1);
    let outline = tree.outlines().find("body").next().unwrap();
    assert_eq!(outline.logs().len(), 4);
    assert!(matches!(
        &outline.logs()[1],
        OutlineLog::StartSection { name } if name == "section"
    ));

    let root = outline.sections();
    assert_eq!(root.header.as_ref().unwrap().title, "Title");
    assert_eq!(root.children[0].header.as_ref().unwrap().id, "nehan-header-1");
}

#[test]
fn test_header_outside_section_root() {
    let mut tree = StyleTree::new(LayoutConfig::default(), NoSelectors);
    let div = tree.create_root(Markup::new("div"));
    let h1 = tree.create_node(Markup::new("h1"), Some(div), StyleArgs::default());
    assert_eq!(tree.start_header_context(h1, header(1, "Lost")), None);

    tree.end_outline_context(div);
    assert!(tree.outlines().is_empty());
}

#[test]
fn test_nested_section_roots_keep_separate_outlines() {
    let mut tree = StyleTree::new(LayoutConfig::default(), NoSelectors);
    let body = tree.create_root(Markup::new("body"));
    tree.start_outline_context(body);
    let quote = tree.create_node(Markup::new("blockquote"), Some(body), StyleArgs::default());
    tree.start_outline_context(quote);
    let h3 = tree.create_node(Markup::new("h3"), Some(quote), StyleArgs::default());
    let _ = tree.start_header_context(h3, header(3, "Quoted"));
    tree.end_outline_context(quote);
    tree.end_outline_context(body);

    assert_eq!(tree.outlines().len(), 2);
    assert_eq!(tree.outlines().find("blockquote").next().unwrap().logs().len(), 1);
    assert!(tree.outlines().find("body").next().unwrap().is_empty());
}
