//! Integration tests for markup nodes.

use nehan_markup::{Markup, tag_wrap};

#[test]
fn test_name_is_lowercased() {
    let markup = Markup::new("DIV");
    assert_eq!(markup.name(), "div");
}

#[test]
fn test_classes_in_source_order_without_duplicates() {
    let markup = Markup::new("p").with_attr("class", "lead  note lead");
    assert_eq!(markup.classes(), vec!["lead", "note"]);
}

#[test]
fn test_classes_missing_attribute() {
    assert!(Markup::new("p").classes().is_empty());
}

#[test]
fn test_data_attribute_camel_case_lookup() {
    let markup = Markup::new("p").with_attr("data-min-extent", "100");
    assert_eq!(markup.data("minExtent"), Some("100"));
    assert_eq!(markup.data("maxExtent"), None);
}

#[test]
fn test_close_tag() {
    let markup = Markup::close_tag("p");
    assert!(markup.is_close_tag());
    assert_eq!(markup.name(), "p");
}

#[test]
fn test_empty_content() {
    assert!(Markup::new("div").is_empty());
    assert!(!Markup::new("div").with_content("text").is_empty());
}

#[test]
fn test_id_attribute() {
    let markup = Markup::new("section").with_attr("ID", "intro");
    assert_eq!(markup.id(), Some("intro"));
}

#[test]
fn test_tag_wrap() {
    assert_eq!(tag_wrap("before", "x"), "<before>x</before>");
}
