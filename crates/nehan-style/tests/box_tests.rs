//! Integration tests for block, line and image construction.

use nehan_markup::Markup;
use nehan_style::boxes::CancelEdge;
use nehan_style::{
    BlockOptions, BoxElement, BoxFlow, BoxKind, BoxSize, ImageOptions, LayoutBox, LayoutConfig,
    LineOptions, SimpleSelectors, StyleArgs, StyleId, StyleTree, TextItem,
};

fn tree_with_flow(flow: BoxFlow) -> (StyleTree, StyleId) {
    let mut tree = StyleTree::new(
        LayoutConfig::default().with_flow(flow),
        SimpleSelectors::new(),
    );
    let body = tree.create_root(Markup::new("body"));
    (tree, body)
}

fn styled(tree: &mut StyleTree, parent: StyleId, markup: Markup, style: &str) -> StyleId {
    tree.create_node(
        markup.with_attr("style", style),
        Some(parent),
        StyleArgs::default(),
    )
}

fn text_line(tree: &StyleTree, id: StyleId, text: &str) -> LayoutBox {
    let node = &tree[id];
    let texts = TextItem::split(text, node.is_text_vertical());
    tree.create_line(
        node,
        LineOptions {
            char_count: texts.iter().map(TextItem::char_count).sum(),
            texts,
            ..LineOptions::default()
        },
    )
}

#[test]
fn test_vertical_baseline_pads_ruby() {
    let (mut tree, body) = tree_with_flow(BoxFlow::TbRl);
    let p = styled(&mut tree, body, Markup::new("p"), "display: block");
    let ruby = styled(&mut tree, p, Markup::new("ruby"), "font-size: 10px");
    let ruby_line = text_line(&tree, ruby, "漢字");

    let line = tree.create_line(
        &tree[p],
        LineOptions {
            measure: Some(100),
            max_extent: Some(40),
            elements: vec![ruby_line.into()],
            ..LineOptions::default()
        },
    );

    let child = line.child_boxes().next().unwrap();
    assert_eq!(child.extent(), 40);
    assert_eq!(child.edge.as_ref().unwrap().padding.after, 15);
    assert_eq!(line.extent(), 40);
}

#[test]
fn test_vertical_baseline_finds_nested_emphasis() {
    let (mut tree, body) = tree_with_flow(BoxFlow::TbRl);
    let p = styled(&mut tree, body, Markup::new("p"), "display: block");
    let span = tree.create_node(Markup::new("span"), Some(p), StyleArgs::default());
    let em = styled(
        &mut tree,
        span,
        Markup::new("em"),
        "text-emphasis-style: filled dot",
    );
    let em_line = text_line(&tree, em, "強調");
    assert_eq!(em_line.extent(), 48);

    let span_line = tree.create_line(
        &tree[span],
        LineOptions {
            elements: vec![em_line.into()],
            ..LineOptions::default()
        },
    );
    let line = tree.create_line(
        &tree[p],
        LineOptions {
            max_extent: Some(48),
            elements: vec![span_line.into()],
            ..LineOptions::default()
        },
    );

    let span_box = line.child_boxes().next().unwrap();
    assert!(span_box.edge.is_none());
    let em_box = span_box.child_boxes().next().unwrap();
    assert_eq!(em_box.edge.as_ref().unwrap().padding.after, 24 - 8);
}

#[test]
fn test_horizontal_lines_are_not_baseline_aligned() {
    let (mut tree, body) = tree_with_flow(BoxFlow::LrTb);
    let p = styled(&mut tree, body, Markup::new("p"), "display: block");
    let ruby = styled(&mut tree, p, Markup::new("ruby"), "font-size: 10px");
    let ruby_line = text_line(&tree, ruby, "ab");
    let line = tree.create_line(
        &tree[p],
        LineOptions {
            max_extent: Some(40),
            elements: vec![ruby_line.into()],
            ..LineOptions::default()
        },
    );
    let child = line.child_boxes().next().unwrap();
    assert!(child.edge.is_none());
    assert_eq!(child.extent(), 25);
}

#[test]
fn test_text_align_end() {
    let (mut tree, body) = tree_with_flow(BoxFlow::LrTb);
    let p = styled(
        &mut tree,
        body,
        Markup::new("p"),
        "display: block; width: 300px; text-align: end",
    );
    let line = tree.create_line(
        &tree[p],
        LineOptions {
            measure: Some(200),
            ..LineOptions::default()
        },
    );
    assert_eq!(line.measure(), 200);
    assert_eq!(line.edge.as_ref().unwrap().padding.start, 100);
    assert_eq!(line.line.as_ref().unwrap().inline_measure, 200);
}

#[test]
fn test_text_align_center_and_start() {
    let (mut tree, body) = tree_with_flow(BoxFlow::LrTb);
    let center = styled(
        &mut tree,
        body,
        Markup::new("p"),
        "display: block; width: 300px; text-align: center",
    );
    let start = styled(&mut tree, body, Markup::new("p"), "display: block; width: 300px");
    let opts = LineOptions {
        measure: Some(200),
        ..LineOptions::default()
    };

    let line = tree.create_line(&tree[center], opts.clone());
    assert_eq!(line.measure(), 250);
    assert_eq!(line.edge.as_ref().unwrap().padding.start, 50);

    let line = tree.create_line(&tree[start], opts);
    assert_eq!(line.measure(), 300);
    assert!(line.edge.is_none());
}

#[test]
fn test_text_align_ignores_full_lines() {
    let (mut tree, body) = tree_with_flow(BoxFlow::LrTb);
    let p = styled(
        &mut tree,
        body,
        Markup::new("p"),
        "display: block; width: 300px; text-align: end",
    );
    let line = tree.create_line(
        &tree[p],
        LineOptions {
            measure: Some(300),
            ..LineOptions::default()
        },
    );
    assert_eq!(line.measure(), 300);
    assert!(line.edge.is_none());
}

#[test]
fn test_line_extent_minimums() {
    let (mut tree, body) = tree_with_flow(BoxFlow::LrTb);
    let p = styled(&mut tree, body, Markup::new("p"), "display: block; line-rate: 1.5");
    let ruby = tree.create_node(Markup::new("ruby"), Some(p), StyleArgs::default());

    assert_eq!(text_line(&tree, p, "x").extent(), 24);
    assert_eq!(text_line(&tree, ruby, "x").extent(), 24 + 8);

    let tall = tree.create_line(
        &tree[p],
        LineOptions {
            max_extent: Some(50),
            ..LineOptions::default()
        },
    );
    assert_eq!(tall.extent(), 50);
}

#[test]
fn test_root_line_and_inline_line() {
    let (mut tree, body) = tree_with_flow(BoxFlow::LrTb);
    let p = styled(
        &mut tree,
        body,
        Markup::new("p").with_attr("class", "lead"),
        "display: block; padding: 4px",
    );
    let span = styled(&mut tree, p, Markup::new("span"), "padding: 2px");

    let root = tree.create_line(
        &tree[p],
        LineOptions {
            measure: Some(120),
            line_break: true,
            ..LineOptions::default()
        },
    );
    assert_eq!(root.kind, BoxKind::Line);
    assert_eq!(root.measure(), tree[p].content_measure);
    assert!(root.edge.is_none());
    assert_eq!(root.classes, ["nehan-inline", "nehan-inline-lr-tb", "lead"]);
    let metrics = root.line.as_ref().unwrap();
    assert!(metrics.line_break);
    assert_eq!(metrics.inline_measure, 120);

    let inline = tree.create_line(
        &tree[span],
        LineOptions {
            measure: Some(120),
            line_break: true,
            ..LineOptions::default()
        },
    );
    assert_eq!(inline.measure(), 120);
    assert_eq!(inline.edge.as_ref().unwrap().padding.start, 2);
    assert!(inline.has_class("nehan-span"));
    let metrics = inline.line.as_ref().unwrap();
    assert!(!metrics.line_break);
    assert_eq!(metrics.inline_measure, 0);
}

#[test]
fn test_inline_block_line_measure() {
    let (mut tree, body) = tree_with_flow(BoxFlow::LrTb);
    let sized = styled(
        &mut tree,
        body,
        Markup::new("span"),
        "display: inline-block; width: 90px",
    );
    let line = tree.create_line(
        &tree[sized],
        LineOptions {
            measure: Some(40),
            ..LineOptions::default()
        },
    );
    assert_eq!(line.measure(), 90);

    let auto = styled(&mut tree, body, Markup::new("span"), "display: inline-block");
    let line = tree.create_line(
        &tree[auto],
        LineOptions {
            measure: Some(40),
            ..LineOptions::default()
        },
    );
    assert_eq!(line.measure(), 40);
}

#[test]
fn test_block_box() {
    let (mut tree, body) = tree_with_flow(BoxFlow::LrTb);
    let section = styled(
        &mut tree,
        body,
        Markup::new("h2").with_attr("class", "title"),
        "display: block; margin: 8px; break-after: always",
    );
    let child = text_line(&tree, section, "abc def");
    let block = tree[section].create_block(BlockOptions {
        elements: vec![child.into(), BoxElement::Text(TextItem::Char('x'))],
        extent: Some(70),
        block_id: Some(3),
        ..BlockOptions::default()
    });

    assert_eq!(block.kind, BoxKind::Block);
    assert_eq!(block.measure(), tree[section].content_measure);
    assert_eq!(block.extent(), 70);
    assert_eq!(block.char_count, 8);
    assert!(block.break_after);
    assert_eq!(block.block_id, Some(3));
    assert_eq!(
        block.classes,
        ["nehan-block", "nehan-h2", "title", "nehan-header"]
    );
    assert_eq!(block.layout_measure(), block.measure() + 16);
}

#[test]
fn test_block_extent_override_rules() {
    let (mut tree, body) = tree_with_flow(BoxFlow::LrTb);
    let fixed = styled(&mut tree, body, Markup::new("div"), "display: block; height: 200px");
    let opts = BlockOptions {
        extent: Some(70),
        ..BlockOptions::default()
    };
    assert_eq!(tree[fixed].create_block(opts.clone()).extent(), 200);
    assert_eq!(tree[body].create_block(opts).extent(), 580);
}

#[test]
fn test_block_cancel_edge() {
    let (mut tree, body) = tree_with_flow(BoxFlow::LrTb);
    let div = styled(
        &mut tree,
        body,
        Markup::new("div"),
        "display: block; margin: 10px; padding: 5px",
    );
    let block = tree[div].create_block(BlockOptions {
        cancel_edge: Some(CancelEdge {
            before: true,
            after: false,
        }),
        ..BlockOptions::default()
    });
    let edge = block.edge.as_ref().unwrap();
    assert_eq!(edge.before(), 0);
    assert_eq!(edge.after(), 15);
    assert_eq!(edge.padding.start, 5);
    assert_eq!(tree[div].edge.as_ref().unwrap().before(), 15);
}

#[test]
fn test_pushed_wins_over_pulled() {
    let (mut tree, body) = tree_with_flow(BoxFlow::LrTb);
    let both = tree.create_node(
        Markup::new("div")
            .with_attr("pushed", "")
            .with_attr("pulled", ""),
        Some(body),
        StyleArgs::default(),
    );
    let block = tree[both].create_block(BlockOptions::default());
    assert!(block.pushed);
    assert!(!block.pulled);
}

#[test]
fn test_image_size() {
    let (mut tree, body) = tree_with_flow(BoxFlow::TbRl);
    let attrs = tree.create_node(
        Markup::new("img")
            .with_attr("width", "120")
            .with_attr("height", "80px"),
        Some(body),
        StyleArgs::default(),
    );
    let fallback = tree.create_node(Markup::new("img"), Some(body), StyleArgs::default());

    let image = tree[attrs].create_image(ImageOptions { break_after: true });
    assert_eq!(image.kind, BoxKind::Image);
    assert_eq!(image.size, BoxSize::new(120, 80));
    assert_eq!(image.char_count, 0);
    assert!(image.break_after);
    assert_eq!(image.classes, ["nehan-block", "nehan-image"]);

    let image = tree[fallback].create_image(ImageOptions::default());
    assert_eq!(image.size, BoxSize::new(16, 16));
}

#[test]
fn test_break_line() {
    let (mut tree, body) = tree_with_flow(BoxFlow::LrTb);
    let p = styled(&mut tree, body, Markup::new("p"), "display: block");
    let line = tree[p].create_break_line();
    assert!(line.break_after);
    assert_eq!(line.measure(), 800);
    assert_eq!(line.extent(), 0);
}

#[test]
fn test_list_marker_size() {
    let (mut tree, body) = tree_with_flow(BoxFlow::LrTb);
    let ul = styled(
        &mut tree,
        body,
        Markup::new("ol"),
        "display: block; list-style-type: decimal",
    );
    let li = styled(&mut tree, ul, Markup::new("li"), "display: list-item");

    assert_eq!(tree.list_marker_size(&tree[li]), BoxSize::new(16, 16));
    tree.set_list_item_count(ul, 12);
    // "12." is 16 + 8, plus half an em of gap.
    assert_eq!(tree.list_marker_size(&tree[li]), BoxSize::new(32, 32));
    assert_eq!(tree.list_marker_html(&tree[li], 3), "3.");
    assert!(tree[li].is_parallel());
}
