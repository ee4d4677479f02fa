//! sizetree: attribute every byte of an analysed binary.
//!
//! Thin binary entry point. All logic lives in the `sizetree-core` crate.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sizetree_core::analysis::largest_nodes;
use sizetree_core::export::{to_json, write_csv};
use sizetree_core::load::load_result;
use sizetree_core::model::size::format_size;
use sizetree_core::tree::validate;
use sizetree_core::{BuildOptions, NodeIdAllocator, NodeKind, NodeRef, TreeBuilder};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Leaf kinds listed by `--top`.
const TOP_KINDS: [NodeKind; 5] = [
    NodeKind::File,
    NodeKind::Symbol,
    NodeKind::Section,
    NodeKind::Disasm,
    NodeKind::Unknown,
];

#[derive(Parser, Debug)]
#[command(name = "sizetree")]
#[command(about = "Build a size-accounting tree from analyzer JSON", long_about = None)]
struct Cli {
    /// Analyzer JSON describing the binary.
    input: PathBuf,

    /// Output representation.
    #[arg(long, value_enum, default_value_t = Format::Outline)]
    format: Format,

    /// List the N largest files, symbols and unattributed regions instead of the tree.
    #[arg(long)]
    top: Option<usize>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Do not log composites whose children exceed their declared size.
    #[arg(long)]
    quiet_overshoot: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
    Outline,
    Summary,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .init();

    let result = load_result(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;

    for issue in validate(&result) {
        tracing::warn!("{issue}");
    }

    let ids = NodeIdAllocator::new();
    let options = BuildOptions::default().warn_on_overshoot(!cli.quiet_overshoot);
    let built = TreeBuilder::new(&ids).with_options(options).build(&result);
    if !built.overshoots.is_empty() {
        tracing::info!(
            count = built.overshoots.len(),
            "some sizes exceed their declared totals"
        );
    }

    let root = built.root.as_node();
    let mut out = BufWriter::new(io::stdout().lock());

    if let Some(n) = cli.top {
        for entry in largest_nodes(root, n, &TOP_KINDS) {
            writeln!(
                out,
                "{:>10}  {:<9} {}",
                format_size(entry.size),
                entry.kind.as_str(),
                entry.path
            )?;
        }
        out.flush()?;
        return Ok(());
    }

    match cli.format {
        Format::Json => {
            let json = to_json(root, cli.pretty).context("serializing tree")?;
            writeln!(out, "{json}")?;
        }
        Format::Csv => write_csv(root, &mut out).context("writing CSV")?,
        Format::Outline => write_outline(root, &mut out)?,
        Format::Summary => writeln!(out, "{}", root.summary())?,
    }
    out.flush()?;
    Ok(())
}

fn write_outline(root: NodeRef<'_>, out: &mut impl Write) -> io::Result<()> {
    for visit in root.walk() {
        writeln!(
            out,
            "{:indent$}{}  {}",
            "",
            visit.node.name(),
            format_size(visit.node.size()),
            indent = visit.depth * 2
        )?;
    }
    Ok(())
}
