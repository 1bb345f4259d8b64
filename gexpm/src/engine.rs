// SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later

//! The relaxation engine (spec component F): the push loop shared by the
//! heap-driven exact variant and the queue-driven approximate variant.
//!
//! Both variants select a coordinate `(i, j)` via a [`RelaxationStrategy`],
//! commit its residual to `y[i]`, and propagate `t * rij / (j+1)` (heap) or
//! `rij / (j+1)` (queue, which hard-codes `t = 1`, see spec.md §9) across
//! `i`'s out-edges — either into `y` directly, if `j` is the terminal Taylor
//! step, or into next step's residual otherwise.

use dsi_progress_logger::{no_logging, ProgressLog};
use gexpm_graph::Csr;
use std::f64::consts::E;

use crate::error::{Error, Result};
use crate::residual::{decode, encode};
use crate::select::{HeapStrategy, QueueStrategy, RelaxationStrategy};
use crate::taylor::taylor_degree;

/// The result of a completed (or budget-exhausted) relaxation run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Dense output vector, one entry per node.
    pub y: Vec<f64>,
    /// Total number of edges relaxed across the whole run.
    pub npushes: u64,
    /// The iteration at which termination fired, or `maxsteps` if the
    /// budget was exhausted without meeting the residual bound.
    pub nsteps: u64,
    /// Remaining residual mass (`sumresid`) at the end of the run, for
    /// convergence diagnostics; see [`crate::preds`].
    pub sumresid: f64,
}

/// Runs the exact, heap-driven Gauss–Southwell relaxation (spec §4.F, heap
/// variant): `P[v, u] = 1/deg(u)` is assumed implicitly, and every seed
/// contributes unit mass.
///
/// `seeds` are 0-based node indices.
pub fn run_heap(graph: &Csr, seeds: &[usize], t: f64, eps: f64, max_steps: u64) -> Result<RunReport> {
    run_heap_with_logging(graph, seeds, t, eps, max_steps, &mut no_logging![])
}

/// As [`run_heap`], but reporting push-count progress through `pl`.
pub fn run_heap_with_logging(
    graph: &Csr,
    seeds: &[usize],
    t: f64,
    eps: f64,
    max_steps: u64,
    pl: &mut impl ProgressLog,
) -> Result<RunReport> {
    if seeds.is_empty() {
        return Err(Error::EmptySeedSet);
    }
    if eps <= 0.0 {
        return Err(Error::NonPositiveEps(eps));
    }
    if t < 0.0 {
        return Err(Error::NegativeT(t));
    }
    if max_steps == 0 {
        return Err(Error::NonPositiveMaxsteps(0));
    }
    let n = graph.num_nodes();
    for &s in seeds {
        if s >= n {
            return Err(Error::SeedOutOfRange(s + 1, n));
        }
    }

    let num_steps = taylor_degree(t, eps);
    let universe = n * (num_steps as usize + 1);
    let mut strategy = HeapStrategy::new(universe);
    let mut y = vec![0.0; n];

    let mut sumresid = 0.0;
    for &s in seeds {
        strategy.seed(encode(s, 0, n), 1.0);
        sumresid += 1.0;
    }

    let bound = eps / t.exp();
    let mut npushes: u64 = 0;
    let mut nsteps: u64 = max_steps;

    pl.item_name("push");
    pl.expected_updates(None);
    pl.start("Relaxing (heap variant)...");

    for iter in 0..max_steps {
        let Some((key, rij)) = strategy.select_and_extract() else {
            nsteps = iter;
            break;
        };
        sumresid -= rij;

        let (i, j) = decode(key, n);
        y[i] += rij;

        let deg = graph.out_degree(i);
        debug_assert!(deg > 0, "relaxing a zero-degree coordinate is undefined");
        let rijs = t * rij / (j as f64 + 1.0);
        let per_edge = rijs / deg as f64;

        if j as u32 + 1 == num_steps {
            for &v in graph.successors(i) {
                y[v] += per_edge;
            }
        } else {
            for &v in graph.successors(i) {
                let re = encode(v, j + 1, n);
                strategy.observe_update(re, per_edge);
                sumresid += per_edge;
            }
        }
        npushes += deg as u64;
        pl.light_update();

        if sumresid < bound || strategy.is_empty() {
            nsteps = iter;
            break;
        }
    }

    pl.done();
    log::info!(
        "heap variant done: {} pushes, {} steps, final residual mass {:.3e}",
        npushes,
        nsteps,
        sumresid.max(0.0)
    );

    Ok(RunReport {
        y,
        npushes,
        nsteps,
        sumresid: sumresid.max(0.0),
    })
}

/// Runs the approximate, queue-driven relaxation (spec §4.F, queue variant):
/// edge weights are taken directly from the graph (no `1/deg` assumption),
/// and the Taylor degree `N` is supplied by the caller rather than derived.
///
/// `seed` is a 0-based node index. This variant hard-codes `t = 1` (see
/// spec.md §9's discussion of `sumsol`'s `-e` offset).
pub fn run_queue(graph: &Csr, seed: usize, n_degree: u32, tol: f64, max_steps: u64) -> Result<RunReport> {
    run_queue_with_logging(graph, seed, n_degree, tol, max_steps, &mut no_logging![])
}

/// As [`run_queue`], but reporting push-count progress through `pl`.
pub fn run_queue_with_logging(
    graph: &Csr,
    seed: usize,
    n_degree: u32,
    tol: f64,
    max_steps: u64,
    pl: &mut impl ProgressLog,
) -> Result<RunReport> {
    if n_degree == 0 {
        return Err(Error::NonPositiveDegree(n_degree as i64));
    }
    if !(0.0 < tol && tol <= 1.0) {
        return Err(Error::TolOutOfRange(tol));
    }
    if max_steps == 0 {
        return Err(Error::NonPositiveMaxsteps(0));
    }
    let n = graph.num_nodes();
    if seed >= n {
        return Err(Error::SeedOutOfRange(seed + 1, n));
    }

    let tau = tol / (n as f64 * n_degree as f64);
    let universe = n * n_degree as usize;
    let mut strategy = QueueStrategy::new(universe, tau);
    let mut y = vec![0.0; n];

    strategy.seed(encode(seed, 0, n), 1.0);
    let mut sumresid = 1.0;
    let mut sumsol = -E;

    let mut npushes: u64 = 0;
    let mut nsteps: u64 = max_steps;

    pl.item_name("push");
    pl.expected_updates(None);
    pl.start("Relaxing (queue variant)...");

    for iter in 0..max_steps {
        let Some((key, rij)) = strategy.select_and_extract() else {
            nsteps = iter;
            break;
        };
        sumresid -= rij;

        let (i, j) = decode(key, n);
        y[i] += rij;

        let deg = graph.out_degree(i);
        debug_assert!(deg > 0, "relaxing a zero-degree coordinate is undefined");
        let rijs = rij / (j as f64 + 1.0);

        if j as u32 + 1 == n_degree {
            for (v, w) in graph.out_edges(i) {
                let update = rijs * w;
                y[v] += update;
                sumsol += update;
            }
        } else {
            for (v, w) in graph.out_edges(i) {
                let update = rijs * w;
                let re = encode(v, j + 1, n);
                strategy.observe_update(re, update);
                sumresid += update;
                sumsol += update;
            }
        }
        npushes += deg as u64;
        pl.light_update();

        if sumresid < tol || strategy.is_empty() || sumsol > -tol {
            nsteps = iter;
            break;
        }
    }

    pl.done();
    log::info!(
        "queue variant done: {} pushes, {} steps, final residual mass {:.3e}",
        npushes,
        nsteps,
        sumresid.max(0.0)
    );

    Ok(RunReport {
        y,
        npushes,
        nsteps,
        sumresid: sumresid.max(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gexpm_graph::CsrBuilder;

    fn two_node_cycle() -> Csr {
        let mut b = CsrBuilder::new(2);
        b.add_unweighted_arc(0, 1).unwrap();
        b.add_unweighted_arc(1, 0).unwrap();
        b.build()
    }

    // Closed-form check against cosh/sinh: scenario-level coverage for the
    // push algebra itself lives in `gexpm/tests/test_relaxation.rs`.
    #[test]
    fn heap_variant_matches_cosh_sinh_closed_form() {
        let g = two_node_cycle();
        let report = run_heap(&g, &[0], 1.0, 1e-10, 1000).unwrap();
        let expected0 = 0.5 * (1.0 + (-2.0f64).exp());
        let expected1 = 0.5 * (1.0 - (-2.0f64).exp());
        assert!((report.y[0] - expected0).abs() < 1e-6);
        assert!((report.y[1] - expected1).abs() < 1e-6);
        assert!((report.y[0] + report.y[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn empty_seed_set_is_rejected() {
        let g = two_node_cycle();
        assert!(matches!(run_heap(&g, &[], 1.0, 1e-5, 10), Err(Error::EmptySeedSet)));
    }

    #[test]
    fn seed_out_of_range_is_rejected() {
        let g = two_node_cycle();
        assert!(run_heap(&g, &[9], 1.0, 1e-5, 10).is_err());
    }

    #[test]
    fn negative_t_is_rejected() {
        let g = two_node_cycle();
        assert!(matches!(run_heap(&g, &[0], -1.0, 1e-5, 10), Err(Error::NegativeT(_))));
    }

    #[test]
    fn zero_degree_tol_is_rejected_for_queue_variant() {
        let g = two_node_cycle();
        assert!(matches!(run_queue(&g, 0, 0, 1e-5, 10), Err(Error::NonPositiveDegree(0))));
        assert!(matches!(run_queue(&g, 0, 10, 2.0, 10), Err(Error::TolOutOfRange(_))));
    }

    #[test]
    fn zero_maxsteps_is_rejected_for_both_variants() {
        let g = two_node_cycle();
        assert!(matches!(
            run_heap(&g, &[0], 1.0, 1e-5, 0),
            Err(Error::NonPositiveMaxsteps(0))
        ));
        assert!(matches!(
            run_queue(&g, 0, 10, 1e-5, 0),
            Err(Error::NonPositiveMaxsteps(0))
        ));
    }
}
