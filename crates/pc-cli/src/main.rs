//! Demo and diagnostic entrypoint: generates a random triangulation,
//! three-colors it into paths (sequentially or across a worker pool),
//! and verifies the result.

mod config;
mod error;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use error::Error;
use pc_color::{p3_color, verify_path_coloring, VerifyOutcome};
use pc_core::Arena;
use pc_fixtures::generate_stacked_triangulation;
use pc_graph::{AugmentedGraph, PlaneGraph};
use pc_pool::color_parallel;

/// Generates and colors a plane triangulation.
#[derive(Parser, Debug)]
#[command(name = "pc-cli", version, about = "Path-coloring demo")]
struct Args {
    /// Number of vertices in the generated triangulation.
    #[arg(long)]
    vertices: Option<usize>,

    /// Seed state for the triangulation generator's random stream.
    #[arg(long)]
    seed_state: Option<u64>,

    /// Seed sequence selector for the triangulation generator.
    #[arg(long)]
    seed_seq: Option<u64>,

    /// Index splitting the outer triangle into an X-path and a Y-path.
    #[arg(long)]
    split: Option<usize>,

    /// Number of worker threads; 1 runs the sequential algorithm.
    #[arg(long)]
    workers: Option<usize>,

    /// Optional path to a TOML run profile (defaults to ./pc-cli.toml).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn configure_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<()> {
    configure_logging();

    let args = Args::parse();
    let config_override = args.config.is_some();
    let mut profile = config::load_from(args.config)?;
    if let Some(v) = args.vertices {
        profile.generation.vertex_count = v;
    }
    if let Some(s) = args.seed_state {
        profile.generation.seed_state = s;
    }
    if let Some(s) = args.seed_seq {
        profile.generation.seed_seq = s;
    }
    if let Some(s) = args.split {
        profile.coloring.split = s;
    }
    if let Some(w) = args.workers {
        profile.coloring.workers = w;
    }

    info!(
        target: "runtime.startup",
        vertex_count = profile.generation.vertex_count,
        workers = profile.coloring.workers,
        config_override,
        "bootstrap_complete"
    );

    let fixture = generate_stacked_triangulation(
        profile.generation.seed_state,
        profile.generation.seed_seq,
        profile.generation.vertex_count,
    )?;

    let arena = Arena::with_capacity(arena_budget(fixture.rotations.len()));
    let graph = PlaneGraph::build(&arena, &fixture.rotations)
        .map_err(|e| Error::GraphBuild(e.to_string()))?;
    let augmented =
        AugmentedGraph::build(&arena, &graph).map_err(|e| Error::GraphBuild(e.to_string()))?;

    let coloring = if profile.coloring.workers <= 1 {
        p3_color(&arena, &augmented, &fixture.outer_cycle, profile.coloring.split)
            .map_err(|e| Error::Coloring(e.to_string()))?
            .coloring
    } else {
        color_parallel(
            &arena,
            &augmented,
            &fixture.outer_cycle,
            profile.coloring.split,
            profile.coloring.workers,
        )
        .map_err(|e| Error::Coloring(e.to_string()))?
        .coloring
    };

    let outcome = verify_path_coloring(&graph, &coloring);
    match outcome {
        VerifyOutcome::Valid => {
            info!(
                target: "runtime.result",
                vertex_count = graph.n(),
                "coloring_verified"
            );
            println!("verified a path coloring of {} vertices", graph.n());
            Ok(())
        }
        other => {
            warn!(target: "runtime.result", outcome = ?other, "coloring_failed_verification");
            Err(Error::Verification(other).into())
        }
    }
}

/// Rough per-vertex working-set estimate: rotation storage, augmented
/// twins, coloring, boundary marks, and frame-stack bookkeeping.
fn arena_budget(vertex_count: usize) -> usize {
    (vertex_count * 256).max(4096)
}
