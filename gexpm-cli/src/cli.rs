// SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later

//! Subcommand-per-algorithm CLI structure, modeled on the teacher's
//! `webgraph-cli` (`cli/src/rank/mod.rs` and `Cli`/`SubCommands` in
//! `cli/src/lib.rs`).

use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use dsi_progress_logger::{progress_logger, ProgressLog};
use std::path::PathBuf;
use std::time::Duration;

use crate::io::{load_graph, load_seeds, write_vector};
use gexpm::preds::{Converged, RunOutcome};

/// Global arguments shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    #[arg(long, global = true)]
    /// How often to log progress, in seconds. Defaults to env_logger's own pace.
    pub log_interval: Option<u64>,

    #[arg(long, global = true, default_value_t = false)]
    /// Node indices in the graph and seeds files are 1-based rather than 0-based.
    pub one_based: bool,
}

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    /// Exact Gauss-Southwell relaxation via an indexed max-heap.
    Heap(HeapArgs),
    /// Approximate relaxation via an admission-gated FIFO queue.
    Queue(QueueArgs),
}

#[derive(Parser, Debug)]
#[command(name = "gexpm", about = "Push-based relaxation for exp(t(P-I))s on a graph's random-walk matrix.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: SubCommands,
    #[clap(flatten)]
    pub args: GlobalArgs,
}

#[derive(Parser, Debug)]
pub struct HeapArgs {
    /// Path to the graph's edge list.
    pub graph: PathBuf,

    #[arg(long)]
    /// Path to a file with one 1-based seed node index per line.
    pub seeds: PathBuf,

    #[arg(long, default_value_t = 1e-5)]
    /// Truncation/residual tolerance.
    pub eps: f64,

    #[arg(long, default_value_t = 1.0)]
    /// Diffusion time t.
    pub t: f64,

    #[arg(long, default_value_t = 10_000_000)]
    /// Hard cap on the number of relaxation steps.
    pub maxsteps: u64,

    #[arg(short, long)]
    /// Where to write the output vector (one f64 per line, node order).
    pub output: PathBuf,
}

#[derive(Parser, Debug)]
pub struct QueueArgs {
    /// Path to the graph's edge list.
    pub graph: PathBuf,

    #[arg(long)]
    /// 1-based index of the single seed node.
    pub seed: usize,

    #[arg(long)]
    /// Taylor truncation degree N (supplied directly, not derived).
    pub degree: u32,

    #[arg(long, default_value_t = 1e-5)]
    /// Residual tolerance, in (0, 1].
    pub tol: f64,

    #[arg(long, default_value_t = 10_000_000)]
    /// Hard cap on the number of relaxation steps.
    pub maxsteps: u64,

    #[arg(short, long)]
    /// Where to write the output vector (one f64 per line, node order).
    pub output: PathBuf,
}

/// Initializes `env_logger`, honoring `RUST_LOG`.
pub fn init_env_logger() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    Ok(())
}

fn build_progress_logger(global: &GlobalArgs) -> impl ProgressLog {
    let mut pl = progress_logger![];
    if let Some(secs) = global.log_interval {
        pl.log_interval(Duration::from_secs(secs));
    }
    pl
}

fn report_convergence(outcome: &gexpm::RunReport, threshold: f64, maxsteps: u64) {
    use predicates::Predicate;
    let converged = Converged::try_from(threshold).unwrap_or_default();
    let run_outcome = RunOutcome::from(outcome);
    if converged.eval(&run_outcome) {
        log::info!("converged after {} step(s), {} push(es)", outcome.nsteps, outcome.npushes);
    } else {
        log::warn!(
            "did not converge within {maxsteps} step(s): residual mass {:.3e} remains",
            outcome.sumresid
        );
    }
}

fn run_heap(global: GlobalArgs, args: HeapArgs) -> Result<()> {
    let graph = load_graph(&args.graph, global.one_based).with_context(|| format!("loading graph {}", args.graph.display()))?;
    let seeds = load_seeds(&args.seeds).with_context(|| format!("loading seeds {}", args.seeds.display()))?;
    ensure!(args.eps > 0.0, "--eps must be > 0, got {}", args.eps);
    ensure!(args.t >= 0.0, "--t must be >= 0, got {}", args.t);
    ensure!(args.maxsteps >= 1, "--maxsteps must be >= 1, got {}", args.maxsteps);
    for &s in &seeds {
        ensure!(s < graph.num_nodes(), "seed {} is outside the graph's {} nodes (1-based)", s + 1, graph.num_nodes());
    }
    graph.ensure_no_dangling(seeds.iter().copied()).context("seed set")?;

    let mut pl = build_progress_logger(&global);
    let report = gexpm::run_heap_with_logging(&graph, &seeds, args.t, args.eps, args.maxsteps, &mut pl)?;
    report_convergence(&report, args.eps, args.maxsteps);
    write_vector(&args.output, &report.y)?;
    Ok(())
}

fn run_queue(global: GlobalArgs, args: QueueArgs) -> Result<()> {
    let graph = load_graph(&args.graph, global.one_based).with_context(|| format!("loading graph {}", args.graph.display()))?;
    ensure!(args.seed >= 1, "--seed is 1-based, got {}", args.seed);
    let seed = args.seed - 1;
    ensure!(seed < graph.num_nodes(), "--seed {} is outside the graph's {} nodes (1-based)", args.seed, graph.num_nodes());
    ensure!(args.degree >= 1, "--degree must be >= 1, got {}", args.degree);
    ensure!(args.tol > 0.0 && args.tol <= 1.0, "--tol must be in (0, 1], got {}", args.tol);
    ensure!(args.maxsteps >= 1, "--maxsteps must be >= 1, got {}", args.maxsteps);
    graph.ensure_no_dangling([seed]).context("seed node")?;

    let mut pl = build_progress_logger(&global);
    let report = gexpm::run_queue_with_logging(&graph, seed, args.degree, args.tol, args.maxsteps, &mut pl)?;
    report_convergence(&report, args.tol, args.maxsteps);
    write_vector(&args.output, &report.y)?;
    Ok(())
}

/// The entry point of the command-line interface.
pub fn cli_main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    match cli.command {
        SubCommands::Heap(args) => run_heap(cli.args, args),
        SubCommands::Queue(args) => run_queue(cli.args, args),
    }
}
