//! Trellis CLI
//!
//! Lays out a JSON scene description and prints the resolved geometry.
//!
//! Usage:
//!   trellis <scene.json>                   Print the layout tree
//!   trellis <scene.json> --json            Print the layout tree as JSON
//!   trellis <scene.json> --viewport 1280x720
//!
//! Set `RUST_LOG=trellis_layout=trace` to follow the solver.

mod scene_file;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trellis_layout::{Edges, Size};

use scene_file::{BoxSnapshot, SceneFile};

/// Trellis - incremental box layout inspector
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the resolved layout tree
    trellis demos/scene.json

    # Resolve root percentages against a custom viewport
    trellis demos/scene.json --viewport 1280x720

    # Machine-readable output
    trellis demos/scene.json --json
"#)]
struct Cli {
    /// Path to a JSON scene description
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Viewport used as the percentage base of layout roots (overrides the file)
    #[arg(long, value_name = "WxH", value_parser = parse_viewport)]
    viewport: Option<Size>,

    /// Print the layout tree as JSON
    #[arg(long)]
    json: bool,
}

fn parse_viewport(value: &str) -> Result<Size, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid viewport dimension {part:?}: {e}"))
    };
    Ok(Size::new(parse(width)?, parse(height)?))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let text = fs::read_to_string(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;
    let file = SceneFile::parse(&text)
        .with_context(|| format!("failed to load {}", cli.path.display()))?;
    let mut loaded = file.build(cli.viewport)?;

    let report = loaded.scene.update();
    info!(
        updated = report.updated,
        resized_roots = report.resized_roots.len(),
        "layout finished"
    );

    let snapshot = loaded.snapshot();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        let viewport = loaded.scene.config().viewport;
        println!(
            "=== Layout Tree (viewport: {}x{}) ===\n",
            viewport.width, viewport.height
        );
        for root in &snapshot {
            print_box(root, 0);
        }
    }
    Ok(())
}

/// Recursively print a box with its geometry.
fn print_box(node: &BoxSnapshot, depth: usize) {
    let indent = "  ".repeat(depth);
    let name = node.name.clone().unwrap_or_else(|| format!("#{}", node.id));
    let kind = if node.leaf { "leaf" } else { "box" };

    if node.hidden {
        println!("{indent}[{name}] {kind} {}", "hidden".dimmed());
    } else {
        println!("{indent}[{}] {kind}", name.bold().cyan());
    }
    println!(
        "{indent}  size: {} border box: {}x{}",
        format!("{}x{}", node.size.width, node.size.height).green(),
        node.boundings.width,
        node.boundings.height
    );
    println!(
        "{indent}  offset: {} world: ({:.1}, {:.1}) baseline: {}",
        format!("({}, {})", node.offset.x, node.offset.y).yellow(),
        node.world_origin[0],
        node.world_origin[1],
        node.baseline
    );
    if node.margin != Edges::ZERO {
        println!("{indent}  margin: {}", edges(node.margin));
    }
    if node.padding != Edges::ZERO {
        println!("{indent}  padding: {}", edges(node.padding));
    }

    for child in &node.children {
        print_box(child, depth + 1);
    }
}

fn edges(edges: Edges) -> String {
    format!("t={} r={} b={} l={}", edges.top, edges.right, edges.bottom, edges.left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_viewport() {
        assert_eq!(parse_viewport("1280x720"), Ok(Size::new(1280, 720)));
        assert_eq!(parse_viewport("10X20"), Ok(Size::new(10, 20)));
        assert!(parse_viewport("1280").is_err());
        assert!(parse_viewport("wide x 720").is_err());
    }
}
