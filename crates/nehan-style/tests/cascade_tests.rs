//! Integration tests for cascade precedence and property resolution.

use nehan_markup::Markup;
use nehan_style::cascade::ONLOAD_HOOK;
use nehan_style::values::{ComputedFn, HookFn};
use nehan_style::{
    BoxFlow, Color, CssValue, CursorContext, LayoutConfig, PropertyMap, SimpleSelectors, StyleArgs,
    StyleId, StyleTree,
};

fn props(pairs: &[(&str, &str)]) -> PropertyMap {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), CssValue::from(*value)))
        .collect()
}

fn horizontal_config() -> LayoutConfig {
    LayoutConfig::default().with_flow(BoxFlow::LrTb)
}

/// Build `<body><p>` where every enabled source declares a different color.
fn resolve_p_color(hook: bool, inline: bool, forced: bool) -> Option<Color> {
    let mut rule = props(&[("color", "#ff0000")]);
    if hook {
        let _ = rule.insert(
            ONLOAD_HOOK.to_string(),
            CssValue::Hook(HookFn::new(|_| props(&[("color", "#0000ff")]))),
        );
    }
    let selectors = SimpleSelectors::new().with_style("p", rule).unwrap();
    let mut tree = StyleTree::new(horizontal_config(), selectors);
    let body = tree.create_root(Markup::new("body"));

    let mut markup = Markup::new("p");
    if inline {
        markup = markup.with_attr("style", "color: #00ff00");
    }
    let args = if forced {
        StyleArgs::forced(props(&[("color", "#ffff00")]))
    } else {
        StyleArgs::default()
    };
    let p = tree.create_node(markup, Some(body), args);
    tree[p].color
}

#[test]
fn test_cascade_precedence() {
    assert_eq!(
        resolve_p_color(true, true, true),
        Some(Color::rgb(255, 255, 0))
    );
    assert_eq!(
        resolve_p_color(true, true, false),
        Some(Color::rgb(0, 0, 255))
    );
    assert_eq!(
        resolve_p_color(false, true, false),
        Some(Color::rgb(0, 255, 0))
    );
    assert_eq!(
        resolve_p_color(false, false, false),
        Some(Color::rgb(255, 0, 0))
    );
}

#[test]
fn test_inline_style_disabled_by_config() {
    let config = LayoutConfig {
        disable_inline_style: true,
        ..horizontal_config()
    };
    let mut tree = StyleTree::new(config, SimpleSelectors::new());
    let body = tree.create_root(Markup::new("body"));
    let p = tree.create_node(
        Markup::new("p").with_attr("style", "color: red"),
        Some(body),
        StyleArgs::default(),
    );
    assert_eq!(tree[p].color, None);
    assert_eq!(tree.color(&tree[p]), Color::BLACK);
}

#[test]
fn test_malformed_inline_statements_are_skipped() {
    let mut tree = StyleTree::new(horizontal_config(), SimpleSelectors::new());
    let body = tree.create_root(Markup::new("body"));
    let p = tree.create_node(
        Markup::new("p").with_attr("style", "garbage; display: block;; color"),
        Some(body),
        StyleArgs::default(),
    );
    assert!(tree[p].is_block());
    assert_eq!(tree[p].color, None);
}

#[test]
fn test_managed_and_unmanaged_partition() {
    let mut tree = StyleTree::new(horizontal_config(), SimpleSelectors::new());
    let body = tree.create_root(Markup::new("body"));
    let p = tree.create_node(
        Markup::new("p").with_attr("style", "display: block; text-shadow: 1px 1px red"),
        Some(body),
        StyleArgs::default(),
    );
    assert!(tree[p].managed.contains("display"));
    assert!(!tree[p].managed.contains("text-shadow"));
    assert!(tree[p].unmanaged.contains("text-shadow"));
    assert_eq!(
        tree.css_text(&tree[p], "text-shadow").as_deref(),
        Some("1px 1px red")
    );
}

#[test]
fn test_vertical_flow_drops_unmanaged_line_height() {
    let selectors = SimpleSelectors::new()
        .with_style("p", props(&[("line-height", "2")]))
        .unwrap();
    let mut tree = StyleTree::new(LayoutConfig::default(), selectors);
    let body = tree.create_root(Markup::new("body"));
    let p = tree.create_node(Markup::new("p"), Some(body), StyleArgs::default());
    assert!(tree[p].is_text_vertical());
    assert!(!tree[p].unmanaged.contains("line-height"));
}

#[test]
fn test_computed_value_sees_markup() {
    let mut rule = PropertyMap::new();
    let _ = rule.insert(
        "font-size".to_string(),
        CssValue::Computed(ComputedFn::new(|ctx| {
            let size = ctx.markup.data("size").unwrap_or("16");
            CssValue::from(format!("{size}px"))
        })),
    );
    let selectors = SimpleSelectors::new().with_style("span", rule).unwrap();
    let mut tree = StyleTree::new(horizontal_config(), selectors);
    let body = tree.create_root(Markup::new("body"));
    let span = tree.create_node(
        Markup::new("span").with_attr("data-size", "24"),
        Some(body),
        StyleArgs::default(),
    );
    assert_eq!(tree[span].font_size(), 24);
}

#[test]
fn test_cursor_is_kept_for_lazy_values() {
    let rest_measure = ComputedFn::new(|ctx| CssValue::from(format!("{}px", ctx.rest_measure())));
    let mut forced = PropertyMap::new();
    let _ = forced.insert("width".to_string(), CssValue::Computed(rest_measure.clone()));
    let _ = forced.insert("background-size".to_string(), CssValue::Computed(rest_measure));

    let mut tree = StyleTree::new(horizontal_config(), SimpleSelectors::new());
    let body = tree.create_root(Markup::new("body"));
    let cursor = CursorContext {
        rest_measure: 123,
        rest_extent: 45,
    };
    let div = tree.create_node(
        Markup::new("div").with_attr("style", "display: block"),
        Some(body),
        StyleArgs {
            force_css: forced,
            cursor: Some(cursor),
        },
    );

    assert_eq!(tree[div].static_measure, Some(123));
    assert!(tree[div].unmanaged.contains("background-size"));
    assert_eq!(
        tree.css_text(&tree[div], "background-size").as_deref(),
        Some("123px")
    );
}

#[test]
fn test_lazy_values_without_cursor_use_parent_size() {
    let mut rule = PropertyMap::new();
    let _ = rule.insert(
        "background-size".to_string(),
        CssValue::Computed(ComputedFn::new(|ctx| {
            CssValue::from(format!("{}px", ctx.rest_extent()))
        })),
    );
    let selectors = SimpleSelectors::new().with_style("div", rule).unwrap();
    let mut tree = StyleTree::new(horizontal_config(), selectors);
    let body = tree.create_root(Markup::new("body"));
    let div = tree.create_node(Markup::new("div"), Some(body), StyleArgs::default());

    let extent = tree[body].content_extent;
    assert_eq!(
        tree.css_text(&tree[div], "background-size"),
        Some(format!("{extent}px"))
    );
}

#[test]
fn test_font_inherits_and_clamps() {
    let mut tree = StyleTree::new(horizontal_config(), SimpleSelectors::new());
    let body = tree.create_root(Markup::new("body").with_attr("style", "font-size: 20px"));
    let em = tree.create_node(
        Markup::new("span").with_attr("style", "font-size: 1.5em"),
        Some(body),
        StyleArgs::default(),
    );
    let keyword = tree.create_node(
        Markup::new("span").with_attr("style", "font-size: x-large"),
        Some(body),
        StyleArgs::default(),
    );
    let huge = tree.create_node(
        Markup::new("span").with_attr("style", "font-size: 500px"),
        Some(body),
        StyleArgs::default(),
    );
    let plain = tree.create_node(Markup::new("span"), Some(em), StyleArgs::default());

    assert_eq!(tree[body].font_size(), 20);
    assert_eq!(tree[em].font_size(), 30);
    assert_eq!(tree[keyword].font_size(), 24);
    assert_eq!(tree[huge].font_size(), 90);
    assert_eq!(tree[plain].font_size(), 30);
}

#[test]
fn test_flow_inherit_and_flip() {
    let mut tree = StyleTree::new(LayoutConfig::default(), SimpleSelectors::new());
    let body = tree.create_root(Markup::new("body"));
    let flipped = tree.create_node(
        Markup::new("div").with_attr("style", "flow: flip; display: block"),
        Some(body),
        StyleArgs::default(),
    );
    let inherited = tree.create_node(Markup::new("span"), Some(flipped), StyleArgs::default());

    assert_eq!(tree[body].flow, BoxFlow::TbRl);
    assert_eq!(tree[flipped].flow, BoxFlow::LrTb);
    assert_eq!(tree[inherited].flow, BoxFlow::LrTb);
    assert!(tree.has_flip_flow(&tree[flipped]));
    assert!(!tree.has_flip_flow(&tree[inherited]));
}

#[test]
fn test_unknown_values_fall_back() {
    let mut tree = StyleTree::new(horizontal_config(), SimpleSelectors::new());
    let body = tree.create_root(Markup::new("body"));
    let p = tree.create_node(
        Markup::new("p").with_attr("style", "display: bogus; color: nocolor; flow: sideways"),
        Some(body),
        StyleArgs::default(),
    );
    assert!(tree[p].is_inline());
    assert_eq!(tree[p].color, None);
    assert_eq!(tree[p].flow, BoxFlow::LrTb);
}

#[test]
fn test_structural_queries() {
    let mut tree = StyleTree::new(horizontal_config(), SimpleSelectors::new());
    let body = tree.create_root(Markup::new("body"));
    let children: Vec<StyleId> = ["p", "div", "p"]
        .iter()
        .map(|name| tree.create_node(Markup::new(name), Some(body), StyleArgs::default()))
        .collect();
    let first = &tree[children[0]];
    let third = &tree[children[2]];

    assert!(tree.is_first_child(first));
    assert!(tree.is_first_of_type(first));
    assert!(!tree.is_first_child(third));
    assert!(!tree.is_first_of_type(third));
    assert_eq!(tree.child_index(third), Some(2));
    assert_eq!(tree.child_index_of_type(third), Some(1));
    assert_eq!(tree.parent_children_of_type(third, "p").len(), 2);
    assert!(!tree.is_last_child(third));
    assert_eq!(first.next_sibling(), Some(children[1]));
    assert_eq!(third.prev_sibling(), Some(children[1]));

    assert_eq!(tree.remove_child(body, children[1]), Some(children[1]));
    assert_eq!(tree.remove_child(body, children[1]), None);
    assert_eq!(tree[children[0]].next_sibling(), Some(children[2]));
}
