use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use miniball::api::{
    random_ball_points, ArrayPointSet, Miniball, MiniballCfg, PointSet, Verbosity,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;
mod report;

#[derive(Parser, Debug)]
#[command(name = "miniball")]
#[command(about = "Smallest enclosing ball of a point set in d dimensions")]
struct Cmd {
    /// Log solver iterations and support changes
    #[arg(long, global = true)]
    verbose: bool,

    /// Stop with an error after this many iterations
    #[arg(long, global = true)]
    max_iterations: Option<usize>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Generate n random points in the cube [-1,1]^d and compute their miniball
    Random {
        n: usize,
        d: usize,
        /// Push every point (almost) onto the unit sphere
        #[arg(long)]
        boundary: bool,
        #[arg(long)]
        seed: Option<u64>,
        /// Write the result as JSON (plus a provenance sidecar)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Compute the miniball of points read from a file (.txt, .csv or .parquet)
    Solve {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();

    let cfg = solver_cfg(&cmd);
    match cmd.action {
        Action::Random {
            n,
            d,
            boundary,
            seed,
            out,
        } => random(n, d, boundary, seed, out.as_deref(), cfg),
        Action::Solve { input, out } => solve(&input, out.as_deref(), cfg),
    }
}

fn solver_cfg(cmd: &Cmd) -> MiniballCfg {
    MiniballCfg {
        max_iterations: cmd.max_iterations,
        verbosity: if cmd.verbose {
            Verbosity::Debug
        } else {
            Verbosity::Silent
        },
        ..MiniballCfg::default()
    }
}

fn random(
    n: usize,
    d: usize,
    boundary: bool,
    seed: Option<u64>,
    out: Option<&Path>,
    cfg: MiniballCfg,
) -> Result<()> {
    if d == 0 {
        bail!("dimension must be at least 1");
    }
    tracing::info!(n, d, boundary, seed = ?seed, "random");
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let pts = random_ball_points(d, n, boundary, &mut rng);
    let params = json!({
        "command": "random",
        "n": n,
        "d": d,
        "boundary": boundary,
        "seed": seed,
    });
    compute(&pts, out, cfg, params)
}

fn solve(input: &Path, out: Option<&Path>, cfg: MiniballCfg) -> Result<()> {
    let pts = input::load_points(input)?;
    tracing::info!(
        input = %input.display(),
        n = pts.size(),
        d = pts.dimension(),
        "solve"
    );
    let params = json!({
        "command": "solve",
        "input": input.to_string_lossy(),
    });
    compute(&pts, out, cfg, params)
}

fn compute(
    pts: &ArrayPointSet,
    out: Option<&Path>,
    cfg: MiniballCfg,
    params: serde_json::Value,
) -> Result<()> {
    report::print_banner();
    let start = Instant::now();
    let mb = Miniball::with_cfg(pts, cfg)?;
    let elapsed = start.elapsed();
    report::print_console(&mb, elapsed);

    if let Some(out) = out {
        report::BallReport::new(&mb, elapsed).write_json(out)?;
        let prov = provenance::Provenance::new(params, &cfg, pts).write_next_to(out)?;
        tracing::info!(out = %out.display(), provenance = %prov.display(), "wrote result");
    }
    Ok(())
}
