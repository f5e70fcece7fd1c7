//! Headless layout driver
//!
//! Lays out one of the built-in graphs until it settles and prints the
//! resulting positions as JSON.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kinlayout::graph::fixtures;
use kinlayout::{EdgePosition, ForceLayout, IntGraph, LayoutSettings, NodePosition, TickStats};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kinlayout", version, about = "Relatedness-driven force layout")]
struct Args {
    /// Graph to lay out
    #[arg(short = 'f', long = "fixture", value_enum, default_value = "two-hubs")]
    fixture: Fixture,

    /// Settings JSON file; defaults to the user config file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Seed for the initial positions
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    width: Option<f64>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    height: Option<f64>,

    /// Save the effective settings to the user config file
    #[arg(long = "write-config")]
    write_config: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Fixture {
    Pair,
    Triple,
    Star,
    TwoHubs,
    ThreeHubs,
    ThreeHubsConnected,
    ThreeHubsConnectedMore,
}

impl Fixture {
    fn build(self) -> IntGraph {
        match self {
            Fixture::Pair => fixtures::pair(),
            Fixture::Triple => fixtures::triple(),
            Fixture::Star => fixtures::star(),
            Fixture::TwoHubs => fixtures::two_hubs(),
            Fixture::ThreeHubs => fixtures::three_hubs(),
            Fixture::ThreeHubsConnected => fixtures::three_hubs_connected(),
            Fixture::ThreeHubsConnectedMore => fixtures::three_hubs_connected_more(),
        }
    }
}

#[derive(Serialize)]
struct Snapshot {
    ticks: u64,
    settled: bool,
    stats: TickStats,
    nodes: Vec<NodePosition>,
    edges: Vec<EdgePosition>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => LayoutSettings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => LayoutSettings::load(),
    };
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(width) = args.width {
        settings.canvas_width = width;
    }
    if let Some(height) = args.height {
        settings.canvas_height = height;
    }

    if args.write_config {
        let path = settings.save()?;
        tracing::info!("wrote settings to {}", path.display());
    }

    let graph = args.fixture.build();
    let max_ticks = settings.max_ticks;
    let threshold = settings.settle_threshold;
    let mut layout = ForceLayout::from_settings(&graph, settings)?;

    let mut settled = false;
    for _ in 0..max_ticks {
        layout.iterate();
        if layout.max_displacement() < threshold {
            settled = true;
            break;
        }
    }
    tracing::info!(ticks = layout.ticks(), settled, "layout finished");

    let snapshot = Snapshot {
        ticks: layout.ticks(),
        settled,
        stats: *layout.stats(),
        nodes: layout.positions().collect(),
        edges: layout.edges().collect(),
    };
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
