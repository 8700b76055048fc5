//! Style resolution: from markup, parent and forced declarations to a
//! [`StyleNode`].
//!
//! The cascade merges the four declaration sources, the result is split
//! into managed and unmanaged sets, and the managed set is interpreted
//! property by property. Order matters: font size feeds every length,
//! flow feeds static sizes, and display, float and flow feed margin
//! collapsing.

use std::str::FromStr;

use nehan_common::warning::warn_once;
use nehan_markup::Markup;

use crate::cascade::{
    ONCREATE_HOOK, ONLOAD_HOOK, PropertyStore, normalize_declaration, normalize_value,
    parse_inline_style,
};
use crate::context::{CursorContext, EvalContext};
use crate::edge::{Border, Edge, collapse_margin};
use crate::flow::{BoxFlow, LogicalSide};
use crate::node::StyleNode;
use crate::tree::{StyleArgs, StyleId, StyleTree};
use crate::values::unit::parse_leading_float;
use crate::values::{
    Color, CssValue, DisplayKind, Font, ListStyle, LogicalCorners, LogicalSides, Position,
    PseudoElement, TextEmpha, TextEmphaStyle, UnitBasis, compute_unit_size, parse_keyword,
};

const COMPONENT: &str = "style";

/// Read a declared value: computed values are evaluated against `ctx` and
/// their result normalized; `oncreate` is returned untouched.
pub(crate) fn evaluate(name: &str, value: &CssValue, ctx: &EvalContext<'_>) -> CssValue {
    match value {
        CssValue::Computed(f) if name != ONCREATE_HOOK => normalize_value(name, f.call(ctx)),
        other => other.clone(),
    }
}

impl StyleTree {
    /// Merge declarations for `markup` from, lowest first: selector rules
    /// (the parent's pseudo-element rules for a pseudo-element markup),
    /// the `style` attribute, the `onload` hook and `args.force_css`.
    pub(crate) fn cascade(
        &self,
        markup: &Markup,
        parent: Option<StyleId>,
        args: &StyleArgs,
    ) -> PropertyStore {
        let parent_node = parent.and_then(|id| self.get(id));
        let ctx = EvalContext {
            tree: self,
            markup,
            parent,
            font_size: parent_node.map_or(self.config().font_size, StyleNode::font_size),
            properties: None,
            cursor: args.cursor.as_ref(),
        };
        let mut store = PropertyStore::new();

        let selected = match (markup.name().parse::<PseudoElement>(), parent_node) {
            (Ok(pseudo), Some(parent_node)) => self
                .selectors()
                .get_value_pe(&EvalContext::for_node(self, parent_node), pseudo),
            _ => self.selectors().get_value(&ctx),
        };
        store.add_declarations(selected);

        if !self.config().disable_inline_style
            && let Some(style) = markup.attr("style")
        {
            for (name, value) in parse_inline_style(style) {
                store.add(&name, value);
            }
        }

        if let Some(CssValue::Hook(hook)) = store.get(ONLOAD_HOOK).cloned() {
            let hook_ctx = EvalContext {
                properties: Some(store.map()),
                ..ctx
            };
            let declarations: Vec<(String, CssValue)> = hook
                .call(&hook_ctx)
                .into_iter()
                .flat_map(|(name, value)| normalize_declaration(&name, value))
                .map(|(name, value)| {
                    let value = evaluate(&name, &value, &hook_ctx);
                    (name, value)
                })
                .collect();
            for (name, value) in declarations {
                store.add(&name, value);
            }
        }

        store.add_declarations(args.force_css.clone());
        store
    }

    /// Build a fully resolved, unattached node.
    pub(crate) fn resolve(
        &self,
        markup: Markup,
        parent: Option<StyleId>,
        args: &StyleArgs,
    ) -> StyleNode {
        let (managed, mut unmanaged) = self
            .cascade(&markup, parent, args)
            .partition(self.config());
        let parent_node = parent.and_then(|id| self.get(id));
        let prev = parent_node
            .and_then(|p| p.children().last())
            .and_then(|&id| self.get(id));

        let mut r = Resolver {
            tree: self,
            markup: &markup,
            parent_id: parent,
            parent: parent_node,
            cursor: args.cursor.as_ref(),
            managed: &managed,
            unmanaged: &unmanaged,
            font_size: parent_node.map_or(self.config().font_size, StyleNode::font_size),
        };

        let display = r.display();
        let flow = r.flow();
        let box_sizing = r.keyword("box-sizing").unwrap_or_default();
        let color = r.color();
        let font = r.font();
        r.font_size = font.size;
        let float_direction = r.text("float").filter(|v| v != "none").and_then(|v| {
            parse_keyword("float", &v)
                .map_err(|e| warn_once(COMPONENT, &e.to_string()))
                .ok()
        });
        let (parent_measure, parent_extent) = parent_node.map_or_else(
            || (self.config().measure(flow), self.config().extent(flow)),
            |p| (p.content_measure, p.content_extent),
        );
        let position = r.position(parent_measure, parent_extent);
        let edge = r.edge(
            parent_measure,
            &Collapse {
                prev,
                flow,
                display,
                floated: float_direction.is_some(),
            },
        );
        let line_rate = r.line_rate();
        let text_align = r
            .inherited_text("text-align")
            .and_then(|v| {
                parse_keyword("text-align", &v)
                    .map_err(|e| warn_once(COMPONENT, &e.to_string()))
                    .ok()
            })
            .or_else(|| parent_node.map(|p| p.text_align))
            .unwrap_or_default();
        let inherited_color = color
            .or_else(|| parent_node.map(|p| self.color(p)))
            .or_else(|| Color::parse(&self.config().font_color).ok())
            .unwrap_or_default();
        let text_empha = r.text_empha(inherited_color, flow);
        let text_combine = r.text("text-combine");
        let list_style = r.list_style();
        let break_before = r.keyword("break-before");
        let break_after = r.keyword("break-after");
        let word_break = r.keyword("word-break");
        let letter_spacing = r
            .text("letter-spacing")
            .filter(|v| v != "normal")
            .and_then(|v| r.length(&v, parent_measure));
        let static_measure = r.static_size(flow.prop_measure(), "measure", parent_measure);
        let static_extent = r.static_size(flow.prop_extent(), "extent", parent_extent);

        if flow.is_text_vertical() {
            let _ = unmanaged.remove("line-height");
        }

        let mut node = StyleNode {
            id: None,
            parent,
            children: Vec::new(),
            prev: prev.and_then(StyleNode::id),
            next: None,
            markup,
            managed,
            unmanaged,
            display,
            flow,
            box_sizing,
            color,
            font,
            position,
            edge,
            line_rate,
            text_align,
            text_empha,
            text_combine,
            list_style,
            float_direction,
            break_before,
            break_after,
            word_break,
            letter_spacing,
            static_measure,
            static_extent,
            outer_measure: 0,
            outer_extent: 0,
            content_measure: 0,
            content_extent: 0,
            outline: None,
            table_partition: None,
            list_marker_size: None,
            is_clone: false,
            cursor: args.cursor,
        };
        node.set_context_size(
            static_measure.unwrap_or(parent_measure),
            static_extent.unwrap_or(parent_extent),
        );
        node
    }
}

/// What margin collapsing needs to know about the node being resolved.
struct Collapse<'a> {
    prev: Option<&'a StyleNode>,
    flow: BoxFlow,
    display: DisplayKind,
    floated: bool,
}

impl Collapse<'_> {
    /// [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
    ///
    /// The previous sibling's after margin collapses with our before
    /// margin when both are non-floated blocks in the same flow and both
    /// margins are positive.
    fn prev_after_margin(&self, cur_before: i32) -> Option<i32> {
        let prev = self.prev?;
        let prev_edge = prev.edge.as_ref()?;
        let applies = prev.is_block()
            && !prev.is_floated()
            && prev.flow == self.flow
            && self.display.is_block_level()
            && !self.floated
            && prev_edge.margin.after > 0
            && cur_before > 0;
        applies.then_some(prev_edge.margin.after)
    }
}

/// Property lookups during resolution of one node.
struct Resolver<'a> {
    tree: &'a StyleTree,
    markup: &'a Markup,
    parent_id: Option<StyleId>,
    parent: Option<&'a StyleNode>,
    cursor: Option<&'a CursorContext>,
    managed: &'a PropertyStore,
    unmanaged: &'a PropertyStore,
    /// The node's font size once resolved, the parent's before.
    font_size: i32,
}

impl Resolver<'_> {
    fn ctx(&self) -> EvalContext<'_> {
        EvalContext {
            tree: self.tree,
            markup: self.markup,
            parent: self.parent_id,
            font_size: self.font_size,
            properties: Some(self.managed.map()),
            cursor: self.cursor,
        }
    }

    fn css(&self, name: &str) -> Option<CssValue> {
        let value = self
            .managed
            .get(name)
            .or_else(|| self.unmanaged.get(name))?;
        Some(evaluate(name, value, &self.ctx()))
    }

    fn text(&self, name: &str) -> Option<String> {
        self.css(name).and_then(|v| v.to_text())
    }

    /// Declared text, with `inherit` read as undeclared.
    fn inherited_text(&self, name: &str) -> Option<String> {
        self.text(name).filter(|v| v != "inherit")
    }

    /// Markup attribute first, declared value second.
    fn attr(&self, name: &str) -> Option<String> {
        self.markup
            .attr(name)
            .map(str::to_string)
            .or_else(|| self.text(name))
    }

    fn keyword<T: FromStr>(&self, name: &str) -> Option<T> {
        let value = self.inherited_text(name)?;
        parse_keyword(name, &value)
            .map_err(|e| warn_once(COMPONENT, &e.to_string()))
            .ok()
    }

    fn basis(&self, max_size: i32) -> UnitBasis {
        UnitBasis {
            font_size: self.font_size,
            root_font_size: self.tree.config().font_size,
            max_size,
        }
    }

    /// A length in px, `None` (with a warning) if it cannot be read.
    fn length(&self, value: &str, max_size: i32) -> Option<i32> {
        compute_unit_size(value, self.basis(max_size))
            .map_err(|e| warn_once(COMPONENT, &e.to_string()))
            .ok()
    }

    fn display(&self) -> DisplayKind {
        self.keyword("display").unwrap_or_default()
    }

    fn flow(&self) -> BoxFlow {
        let parent_flow = self.parent.map_or(self.tree.config().flow, |p| p.flow);
        match self.text("flow").as_deref() {
            None | Some("inherit") => parent_flow,
            Some("flip") => parent_flow.flip(),
            Some(name) => BoxFlow::get_by_name(name).unwrap_or_else(|e| {
                warn_once(COMPONENT, &e.to_string());
                parent_flow
            }),
        }
    }

    fn color(&self) -> Option<Color> {
        let value = self.inherited_text("color")?;
        Color::parse(&value)
            .map_err(|e| warn_once(COMPONENT, &e.to_string()))
            .ok()
    }

    /// [§ 2.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
    ///
    /// Keywords map through the configured table, `%` and `em` refer to the
    /// parent's size, and the result never exceeds the configured maximum.
    fn font(&self) -> Font {
        let config = self.tree.config();
        let mut font = self.parent.map_or_else(
            || Font::new(config.font_size, &config.font_family),
            |p| p.font.clone(),
        );
        if let Some(size) = self.inherited_text("font-size") {
            // 'large/150%' carries a line height we do not use.
            let size = size.split('/').next().unwrap_or_default().trim();
            let size = config
                .font_size_names
                .get(size)
                .map_or(size, String::as_str);
            if let Some(px) = self.length(size, font.size) {
                font.size = px.min(config.max_font_size);
            }
        }
        if let Some(family) = self.inherited_text("font-family") {
            font.family = family;
        }
        if let Some(weight) = self.inherited_text("font-weight") {
            font.weight = Some(weight);
        }
        if let Some(style) = self.inherited_text("font-style") {
            font.style = Some(style);
        }
        font
    }

    fn position(&self, parent_measure: i32, parent_extent: i32) -> Option<Position> {
        let value = self.text("position").filter(|v| v != "static")?;
        let kind = parse_keyword("position", &value)
            .map_err(|e| warn_once(COMPONENT, &e.to_string()))
            .ok()?;
        let mut offsets = LogicalSides::<Option<i32>>::default();
        for side in LogicalSide::ALL {
            let max_size = match side {
                LogicalSide::Before | LogicalSide::After => parent_extent,
                LogicalSide::Start | LogicalSide::End => parent_measure,
            };
            *offsets.get_mut(side) = self
                .text(&side.to_string())
                .filter(|v| v != "auto")
                .and_then(|v| self.length(&v, max_size));
        }
        Some(Position { kind, offsets })
    }

    /// Per-side lengths of `name`. Unset and `auto` sides are 0.
    fn edge_sides(&self, name: &str, max_size: i32) -> Option<LogicalSides<i32>> {
        let sides = match self.css(name)? {
            CssValue::Sides(sides) => sides,
            other => normalize_value(name, other).as_sides()?.clone(),
        };
        Some(sides.map(|side| {
            side.filter(|v| v != "auto")
                .and_then(|v| self.length(&v, max_size))
                .unwrap_or(0)
        }))
    }

    fn edge(&self, max_size: i32, collapse: &Collapse<'_>) -> Option<Edge> {
        let padding = self.edge_sides("padding", max_size);
        let mut margin = self.edge_sides("margin", max_size);
        if let Some(margin) = margin.as_mut() {
            if let Some(prev_after) = collapse.prev_after_margin(margin.before) {
                margin.before = collapse_margin(prev_after, margin.before);
            }
            // Inline margins never push lines apart.
            if collapse.display == DisplayKind::Inline {
                margin.before = 0;
                margin.after = 0;
            }
        }
        let border = self.border(max_size);
        Edge::new(padding, margin, border)
    }

    fn border(&self, max_size: i32) -> Option<Border> {
        let width = self.edge_sides("border-width", max_size)?;
        let radius = match self.css("border-radius") {
            Some(CssValue::Corners(corners)) => Some(corners),
            Some(other) => normalize_value("border-radius", other).as_corners().cloned(),
            None => None,
        }
        .map(|corners: LogicalCorners<Option<String>>| {
            corners.map(|c| c.and_then(|v| self.length(&v, max_size)).unwrap_or(0))
        });
        let sides = |name: &str| self.css(name).and_then(|v| v.as_sides().cloned());
        Some(Border {
            width,
            radius,
            color: sides("border-color"),
            style: sides("border-style"),
        })
    }

    fn line_rate(&self) -> f64 {
        self.inherited_text("line-rate")
            .and_then(|v| parse_leading_float(&v))
            .or_else(|| self.parent.map(|p| p.line_rate))
            .unwrap_or(self.tree.config().line_rate)
    }

    /// [§ 3.1 text-emphasis-style](https://www.w3.org/TR/css-text-decor-3/#text-emphasis-style-property)
    fn text_empha(&self, color: Color, flow: BoxFlow) -> Option<TextEmpha> {
        let style = self
            .inherited_text("text-emphasis-style")
            .filter(|v| v != "none")?;
        let position = self.text("text-emphasis-position").unwrap_or_else(|| {
            let side = if flow.is_text_vertical() { "right" } else { "over" };
            side.to_string()
        });
        let color = self
            .text("text-emphasis-color")
            .and_then(|v| {
                Color::parse(&v)
                    .map_err(|e| warn_once(COMPONENT, &e.to_string()))
                    .ok()
            })
            .unwrap_or(color);
        Some(TextEmpha {
            style: TextEmphaStyle::new(&style),
            position,
            color,
        })
    }

    fn list_style(&self) -> Option<ListStyle> {
        let kind = self
            .text("list-style-type")
            .filter(|v| v != "none")
            .and_then(|v| {
                parse_keyword("list-style-type", &v)
                    .map_err(|e| warn_once(COMPONENT, &e.to_string()))
                    .ok()
            })?;
        let image = self
            .text("list-style-image")
            .filter(|v| v != "none")
            .map(|v| {
                let url = v.trim_start_matches("url(").trim_end_matches(')');
                url.trim_matches(['"', '\'']).to_string()
            });
        Some(ListStyle {
            kind,
            position: self.keyword("list-style-position").unwrap_or_default(),
            image,
        })
    }

    /// Explicit size along one axis: the physical property for this flow
    /// (`width` or `height`), then the logical one (`measure` or `extent`),
    /// each read from the markup attribute before the declaration.
    fn static_size(&self, physical: &str, logical: &str, max_size: i32) -> Option<i32> {
        let value = self.attr(physical).or_else(|| self.attr(logical))?;
        if value == "auto" {
            return None;
        }
        self.length(&value, max_size)
    }
}
