//! Strata CLI
//!
//! Converts a layout snapshot into an SVG whose groups follow CSS painting
//! order, or prints the stacking tree it was built from.
//!
//! - strata page.json -o page.svg       # write SVG
//! - strata page.json --layers          # print the layer tree
//! - strata page.json --json            # dump the layer tree as JSON

use std::fs;
use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use owo_colors::OwoColorize;
use strata_common::warning::clear_warnings;
use strata_css::{EntryContent, LayerEntry, StackingContext};
use strata_dom::{DomTree, load};
use strata_svg::{ConvertOptions, Primitive, build_layers, inline_resources, to_svg};

/// Strata: render a layout snapshot as layered SVG
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Write the SVG to stdout
    strata page.json

    # Write the SVG to a file with images embedded
    strata page.json -o page.svg --inline --base-url https://example.com/

    # Show which layer every element was painted in
    strata page.json --layers
"#)]
struct Cli {
    /// Path to a JSON layout snapshot
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// Write output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the stacking tree instead of SVG
    #[arg(long, conflicts_with = "json")]
    layers: bool,

    /// Print the stacking tree as JSON instead of SVG
    #[arg(long)]
    json: bool,

    /// Replace image references with data: URLs
    #[arg(long)]
    inline: bool,

    /// Base URL for resolving relative image references
    #[arg(long, value_name = "URL", requires = "inline")]
    base_url: Option<String>,
}

/// Nested stacking contexts are converted recursively.
const CONVERT_STACK_SIZE: usize = 64 * 1024 * 1024;

fn main() -> Result<()> {
    let cli = Cli::parse();
    thread::Builder::new()
        .name("strata-convert".into())
        .stack_size(CONVERT_STACK_SIZE)
        .spawn(move || run(cli))
        .context("failed to start the conversion thread")?
        .join()
        .map_err(|_| anyhow!("conversion thread panicked"))?
}

fn run(cli: Cli) -> Result<()> {
    clear_warnings();

    let json = fs::read_to_string(&cli.snapshot)
        .with_context(|| format!("failed to read {}", cli.snapshot.display()))?;
    let tree = load(&json).with_context(|| format!("failed to load {}", cli.snapshot.display()))?;

    let options = ConvertOptions {
        inline_resources: false,
        base_url: cli.base_url.clone(),
    };
    let mut root = build_layers(&tree, &options).context("failed to build the stacking tree")?;
    if cli.inline {
        let (inlined, report) = inline_resources(root, options.base_url.as_deref());
        root = inlined;
        if !report.failed.is_empty() {
            eprintln!(
                "{} of {} images could not be inlined",
                report.failed.len(),
                report.failed.len() + report.inlined.len()
            );
        }
    }

    let output = if cli.layers {
        let mut out = String::new();
        format_context(&root, &tree, 0, &mut out);
        out
    } else if cli.json {
        serde_json::to_string_pretty(&root).context("failed to serialize the stacking tree")?
    } else {
        let viewport = tree
            .view()
            .context("snapshot has no viewport; nothing can be rendered")?;
        to_svg(&root, viewport, &tree).context("failed to write SVG")?
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{output}"),
    }
    Ok(())
}

/// Append an indented listing of `context` to `out`.
fn format_context(
    context: &StackingContext<Primitive>,
    tree: &DomTree,
    depth: usize,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);
    let mut header = format!(
        "{indent}{} <{}> ({:?}) {}",
        "context".bold(),
        context.tag_name,
        context.owner,
        context.reason.dimmed()
    );
    if let Some(level) = context.z_index.integer() {
        header.push_str(&format!(" z={level}"));
    }
    if context.opacity < 1.0 {
        header.push_str(&format!(" opacity={}", context.opacity));
    }
    out.push_str(&header);
    out.push('\n');

    for layer in context.layers.layers().filter(|layer| !layer.is_empty()) {
        out.push_str(&format!(
            "{indent}  {} {}\n",
            layer.name().number().cyan(),
            layer.name().green()
        ));
        for entry in layer.entries() {
            match &entry.content {
                EntryContent::Context { context } => format_context(context, tree, depth + 2, out),
                EntryContent::Paint { primitives } => {
                    let label = tree.as_element(entry.node).map_or_else(
                        || text_preview(tree, entry),
                        |element| format!("<{}>", element.tag_name),
                    );
                    out.push_str(&format!(
                        "{indent}    {label} ({:?}) {}\n",
                        entry.node,
                        format!("{} primitives", primitives.len()).dimmed()
                    ));
                }
            }
        }
    }
}

fn text_preview(tree: &DomTree, entry: &LayerEntry<Primitive>) -> String {
    let text = tree.as_text(entry.node).map_or("", |text| text.text.trim());
    let preview: String = text.chars().take(30).collect();
    let suffix = if text.chars().count() > 30 { "..." } else { "" };
    format!("Text(\"{}{suffix}\")", preview.replace('\n', "\\n"))
}
