//! Coloring Driver Binary
//!
//! Loads a graph description, runs the coloring engine one step at a time,
//! verifies the result, and prints the report as JSON on stdout.
//!
//! ## Configuration
//!
//! Arguments (each option also reads an environment variable):
//! - `<GRAPH>`: Path to the graph JSON file
//! - `[PALETTE_SIZE]`: Number of colors (env `PALETTE_SIZE`, default: 8)
//! - `--removal-order`: `largest_first` or `smallest_last` (env `REMOVAL_ORDER`, default: largest_first)
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: pretty)
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin color_driver -- graph.json 3 --removal-order smallest_last
//! ```
//!
//! where `graph.json` looks like:
//!
//! ```json
//! {"vertices": [0, 1, 2], "edges": [[0, 1], [1, 2], [0, 2]]}
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use degeneracy_coloring::{
    degeneracy, verify_coloring, AdjacencyGraph, ColorableGraph, ColoringEngine, ColoringPolicyV1,
    EnginePhase, GraphSpec, RemovalOrder, DEFAULT_PALETTE_SIZE,
};

/// Command-line arguments for the coloring driver.
#[derive(Parser, Debug)]
#[command(
    name = "color_driver",
    version,
    about = "Step-driven degeneracy coloring of a JSON graph",
    long_about = None
)]
struct Args {
    /// Path to the graph JSON file.
    #[arg(value_name = "GRAPH")]
    graph: PathBuf,

    /// Number of palette colors.
    #[arg(env = "PALETTE_SIZE", default_value_t = DEFAULT_PALETTE_SIZE)]
    palette_size: usize,

    /// Which active vertex the ordering phase removes next.
    #[arg(long, env = "REMOVAL_ORDER", value_enum, default_value_t = RemovalOrderArg::LargestFirst)]
    removal_order: RemovalOrderArg,
}

/// Removal order argument enum for CLI
#[derive(ValueEnum, Clone, Copy, Debug)]
enum RemovalOrderArg {
    /// Highest cost first.
    #[value(name = "largest_first")]
    LargestFirst,
    /// Lowest cost first; bounds colors by degeneracy + 1.
    #[value(name = "smallest_last")]
    SmallestLast,
}

impl From<RemovalOrderArg> for RemovalOrder {
    fn from(val: RemovalOrderArg) -> Self {
        match val {
            RemovalOrderArg::LargestFirst => RemovalOrder::LargestFirst,
            RemovalOrderArg::SmallestLast => RemovalOrder::SmallestLast,
        }
    }
}

/// Initialize the tracing subscriber with JSON or pretty format.
///
/// Logs go to stderr so stdout carries only the report.
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "color_driver=info,degeneracy_coloring=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .flatten_event(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = Args::parse();
    let policy = ColoringPolicyV1::new(args.palette_size).with_removal_order(args.removal_order.into());
    policy.validate()?;

    let raw = std::fs::read_to_string(&args.graph)?;
    let spec: GraphSpec = serde_json::from_str(&raw)?;
    let graph = Arc::new(AdjacencyGraph::from_spec(&spec)?);

    let degeneracy = degeneracy(graph.as_ref())?;
    info!(
        path = %args.graph.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        degeneracy,
        palette_size = policy.palette_size,
        params_hash = %policy.params_hash(),
        "graph loaded"
    );

    let started = Instant::now();
    let mut engine = ColoringEngine::new(Arc::clone(&graph), policy)?;
    engine.start()?;

    let mut steps = 0usize;
    let mut phase = engine.current_phase();
    loop {
        let more = engine.step()?;
        steps += 1;
        if engine.current_phase() != phase {
            phase = engine.current_phase();
            debug!(steps, phase = %phase, "phase changed");
        }
        if !more {
            break;
        }
    }
    debug_assert_eq!(phase, EnginePhase::Done);

    let report = engine.report()?;
    let check = verify_coloring(graph.as_ref(), &report);
    if !check.is_valid {
        for violation in &check.violations {
            tracing::error!(?violation, "coloring violation");
        }
        return Err("coloring failed verification".into());
    }

    info!(
        steps,
        colors_used = report.colors_used,
        conflicts = report.conflicts.len(),
        fingerprint = %report.fingerprint,
        latency_ms = started.elapsed().as_millis() as u64,
        "coloring finished"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
