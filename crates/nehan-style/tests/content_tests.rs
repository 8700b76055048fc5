//! Integration tests for generated content and pseudo-element styles.

use nehan_markup::Markup;
use nehan_style::values::ComputedFn;
use nehan_style::{
    BoxFlow, Color, CssValue, LayoutConfig, PropertyMap, SimpleSelectors, StyleArgs, StyleTree,
};

fn props(pairs: &[(&str, &str)]) -> PropertyMap {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), CssValue::from(*value)))
        .collect()
}

fn pseudo_selectors() -> SimpleSelectors {
    SimpleSelectors::new()
        .with_style("p::before", props(&[("content", "'«'")]))
        .and_then(|s| s.with_style("p::after", props(&[("content", "\"»\"")])))
        .and_then(|s| s.with_style("p::first-letter", props(&[("color", "red")])))
        .and_then(|s| s.with_style("p::first-line", props(&[("font-weight", "bold")])))
        .unwrap()
}

#[test]
fn test_pseudo_content_order() {
    let mut tree = StyleTree::new(
        LayoutConfig::default().with_flow(BoxFlow::LrTb),
        pseudo_selectors(),
    );
    let body = tree.create_root(Markup::new("body"));
    let p = tree.create_node(
        Markup::new("p").with_content("hi"),
        Some(body),
        StyleArgs::default(),
    );
    assert_eq!(
        tree.resolve_content(&tree[p]),
        "<first-line><before><first-letter>«</first-letter></before>hi<after>»</after></first-line>"
    );
}

#[test]
fn test_content_without_pseudo_rules_is_raw() {
    let mut tree = StyleTree::new(LayoutConfig::default(), pseudo_selectors());
    let body = tree.create_root(Markup::new("body"));
    let div = tree.create_node(
        Markup::new("div").with_content("<b>raw</b>"),
        Some(body),
        StyleArgs::default(),
    );
    assert_eq!(tree.resolve_content(&tree[div]), "<b>raw</b>");
}

#[test]
fn test_computed_pseudo_content() {
    let mut after = PropertyMap::new();
    let _ = after.insert(
        "content".to_string(),
        CssValue::Computed(ComputedFn::new(|ctx| {
            CssValue::from(format!("[{}]", ctx.markup.attr("title").unwrap_or_default()))
        })),
    );
    let selectors = SimpleSelectors::new().with_style("a::after", after).unwrap();
    let mut tree = StyleTree::new(LayoutConfig::default(), selectors);
    let body = tree.create_root(Markup::new("body"));
    let a = tree.create_node(
        Markup::new("a")
            .with_attr("title", "note")
            .with_content("link"),
        Some(body),
        StyleArgs::default(),
    );
    assert_eq!(tree.resolve_content(&tree[a]), "link<after>[note]</after>");
}

#[test]
fn test_pseudo_element_node_uses_parent_rules() {
    let mut tree = StyleTree::new(LayoutConfig::default(), pseudo_selectors());
    let body = tree.create_root(Markup::new("body"));
    let p = tree.create_node(Markup::new("p"), Some(body), StyleArgs::default());
    let first_letter = tree.create_node(Markup::new("first-letter"), Some(p), StyleArgs::default());
    let first_line = tree.create_node(Markup::new("first-line"), Some(p), StyleArgs::default());

    assert_eq!(tree[first_letter].color, Some(Color::rgb(255, 0, 0)));
    assert!(tree[first_line].font.is_bold());
    assert_eq!(tree[p].color, None);
}

#[test]
fn test_text_emphasis_marks() {
    let selectors = SimpleSelectors::new()
        .with_style("em", props(&[("text-emphasis-style", "filled circle")]))
        .unwrap();
    let mut tree = StyleTree::new(LayoutConfig::default(), selectors);
    let body = tree.create_root(Markup::new("body").with_attr("style", "color: #336699"));
    let em = tree.create_node(Markup::new("em"), Some(body), StyleArgs::default());

    let empha = tree[em].text_empha.as_ref().unwrap();
    assert!(tree[em].is_text_empha_enable());
    assert_eq!(empha.style.mark(true), "\u{25cf}");
    assert_eq!(empha.position, "right");
    assert_eq!(empha.color, Color::rgb(0x33, 0x66, 0x99));
    assert_eq!(tree[em].empha_line_extent(), 48);
}

#[test]
fn test_list_style_image() {
    let mut tree = StyleTree::new(LayoutConfig::default(), SimpleSelectors::new());
    let body = tree.create_root(Markup::new("body"));
    let ul = tree.create_node(
        Markup::new("ul").with_attr(
            "style",
            "display: block; list-style-type: disc; list-style-image: url('dot.png')",
        ),
        Some(body),
        StyleArgs::default(),
    );
    assert_eq!(
        tree.list_marker_html(&tree[ul], 1),
        "<img src='dot.png' class='nehan-list-image' />"
    );
}
