//! nehan CLI - style and box inspection tool
//!
//! Reads a JSON document description (element tree plus style rules),
//! resolves every style and prints the style tree, the box tree and the
//! document outline.

mod document;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nehan_common::warning::clear_warnings;
use nehan_style::outline::Section;
use nehan_style::{BoxElement, LayoutBox, LayoutConfig, StyleId, StyleTree};
use owo_colors::OwoColorize;

use document::{Document, layout};

/// Resolve styles and boxes of a nehan document description
#[derive(Parser, Debug)]
#[command(name = "nehan")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the style tree and boxes
    nehan doc.json

    # Override the configuration embedded in the document
    nehan --config vertical.json doc.json

    # Dump boxes as JSON
    nehan --json doc.json
"#)]
struct Cli {
    /// Document description (JSON)
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Engine configuration (JSON), replacing the document's own
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print boxes as JSON instead of a tree
    #[arg(long)]
    json: bool,

    /// Skip the style tree
    #[arg(long)]
    boxes_only: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.path)
        .with_context(|| format!("reading '{}'", cli.path.display()))?;
    let doc = Document::from_json(&source)?;
    let config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading '{}'", path.display()))?;
            LayoutConfig::from_json(&json)?
        }
        None => doc.config.clone().unwrap_or_default(),
    };

    clear_warnings();
    let result = layout(&doc, config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result.root_box)?);
        return Ok(());
    }
    if !cli.boxes_only {
        println!("{}", "=== Style Tree ===".bold());
        print_style(&result.tree, result.root, 0);
        println!();
    }
    println!("{}", "=== Boxes ===".bold());
    match &result.root_box {
        Some(root_box) => print_box(root_box, 0),
        None => println!("{}", "(root is disabled)".dimmed()),
    }
    if !result.tree.outlines().is_empty() {
        println!("\n{}", "=== Outline ===".bold());
        for outline in result.tree.outlines().contexts() {
            print_section(&outline.sections(), 0);
        }
    }
    Ok(())
}

fn print_style(tree: &StyleTree, id: StyleId, depth: usize) {
    let indent = "  ".repeat(depth);
    let node = &tree[id];
    let disabled = if tree.is_disabled(node) {
        " disabled".red().to_string()
    } else {
        String::new()
    };
    println!(
        "{indent}{} {} {} {}{disabled}",
        format!("<{}>", node.markup_name()).cyan(),
        node.display.yellow(),
        node.flow.green(),
        format!("{}x{}", node.content_measure, node.content_extent).dimmed(),
    );
    if let Some(edge) = &node.edge {
        println!(
            "{indent}  edge: margin {:?} border {:?} padding {:?}",
            edge.margin, edge.border.width, edge.padding
        );
    }
    println!(
        "{indent}  font: {}px {} color {}",
        node.font_size(),
        node.font_family(),
        tree.color(node)
    );
    let unmanaged = node.unmanaged.names();
    if !unmanaged.is_empty() {
        println!("{indent}  unmanaged: {}", unmanaged.join(", ").dimmed());
    }
    for &child in node.children() {
        print_style(tree, child, depth + 1);
    }
}

fn print_box(layout_box: &LayoutBox, depth: usize) {
    let indent = "  ".repeat(depth);
    println!(
        "{indent}{} {} {} {}",
        format!("{:?}", layout_box.kind).magenta(),
        format!("<{}>", layout_box.origin.markup_name).cyan(),
        format!("{}x{}", layout_box.measure(), layout_box.extent()).dimmed(),
        layout_box.classes.join(" "),
    );
    for element in &layout_box.elements {
        match element {
            BoxElement::Box(child) => print_box(child, depth + 1),
            BoxElement::Text(text) => println!("{indent}  {:?}", text.text()),
        }
    }
}

fn print_section(section: &Section, depth: usize) {
    let indent = "  ".repeat(depth);
    let title = section
        .header
        .as_ref()
        .map_or("(untitled)", |h| h.title.as_str());
    println!("{indent}{} {title}", section.kind.cyan());
    for child in &section.children {
        print_section(child, depth + 1);
    }
}
