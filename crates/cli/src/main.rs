//! `gvstyle`: render a JSON graph document with Graphviz.
//!
//! ```text
//! gvstyle graph.json --style base.json --style highlight.json --format svg -o graph.svg
//! gvstyle graph.json --verbose-style --format raw
//! ```

mod document;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use document::{subgraph_selector, DocGraph, GraphDocument, StyleFile};
use gvstyle_core::compose;
use gvstyle_core::styles::verbose;
use gvstyle_graph::{neighborhood, to_ordered_graph};
use gvstyle_render::{RenderRequest, Rendered, Renderer};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about = "Render styled graph documents with Graphviz", long_about = None)]
struct Args {
    /// Graph document (JSON)
    input: PathBuf,

    /// Style file (JSON). Repeat to layer styles; later files win.
    #[arg(long = "style", value_name = "FILE")]
    styles: Vec<PathBuf>,

    /// Label everything with its attributes, under any style files
    #[arg(long)]
    verbose_style: bool,

    /// Cluster nodes by the value of this node attribute
    #[arg(long, value_name = "ATTRIBUTE")]
    subgraph_by: Option<String>,

    /// Graphviz layout algorithm
    #[arg(long, default_value = "dot")]
    algorithm: String,

    /// Graphviz output format, or `raw` for the serialized graph
    #[arg(long, default_value = "svg")]
    format: String,

    /// Graphviz `bin` directory (defaults to $GRAPHVIZ_BIN)
    #[arg(long, value_name = "DIR")]
    graphviz_bin: Option<PathBuf>,

    /// Sort nodes, edges, and attributes for stable output
    #[arg(long)]
    ordered: bool,

    /// Only render nodes near these nodes
    #[arg(long, value_name = "NODE")]
    neighborhood: Vec<String>,

    /// Maximum distance for --neighborhood
    #[arg(long, requires = "neighborhood")]
    radius: Option<usize>,

    /// Write output here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(&args)
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let mut graph = GraphDocument::load(&args.input)?.into_graph()?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded {}",
        args.input.display()
    );

    if args.ordered {
        graph = to_ordered_graph(&graph);
    }
    if !args.neighborhood.is_empty() {
        let missing: Vec<&str> = args
            .neighborhood
            .iter()
            .filter(|n| !graph.has_node(n))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            bail!("unknown nodes for --neighborhood: {}", missing.join(", "));
        }
        graph = neighborhood(&graph, &args.neighborhood, args.radius);
        debug!(nodes = graph.node_count(), "cut neighborhood");
    }

    let mut layers = Vec::new();
    if args.verbose_style {
        layers.push(verbose::<DocGraph>());
    }
    for path in &args.styles {
        let style = StyleFile::load(path)?
            .to_style()
            .with_context(|| format!("invalid style file {}", path.display()))?;
        layers.push(style);
    }
    let style = compose(layers.iter().map(Some));

    let selector = args.subgraph_by.clone().map(subgraph_selector);
    let mut request = RenderRequest::new()
        .style(&style)
        .algorithm(args.algorithm.as_str())
        .format(args.format.as_str());
    if let Some(dir) = &args.graphviz_bin {
        request = request.graphviz_bin(dir);
    }
    if let Some(selector) = &selector {
        request = request.subgraph(selector);
    }

    let Some(rendered) = Renderer::new().render(&graph, &request)? else {
        return Ok(());
    };
    write_output(args, &rendered)
}

fn write_output(args: &Args, rendered: &Rendered) -> Result<()> {
    let mut bytes = rendered.as_bytes().to_vec();
    if matches!(rendered, Rendered::Text(_)) {
        bytes.push(b'\n');
    }
    match &args.output {
        Some(path) => fs::write(path, &bytes).with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes).context("failed to write to stdout")?;
            stdout.flush().context("failed to write to stdout")
        }
    }
}
