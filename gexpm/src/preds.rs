// SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later

//! Composable post-run convergence predicates.
//!
//! [`crate::engine::run_heap`] and [`crate::engine::run_queue`] always
//! terminate according to the fixed rule in spec.md §4.F — these predicates
//! do not participate in that decision. They exist for callers (notably the
//! CLI) that want to report, after the fact, whether a [`RunReport`] actually
//! converged or merely exhausted its step budget, composed the same way
//! `webgraph_algo::rank::pagerank::preds` composes its stopping predicates.
//!
//! # Examples
//! ```
//! use predicates::prelude::*;
//! use gexpm::preds::{Converged, MaxSteps, RunOutcome};
//!
//! let healthy = Converged::try_from(1e-6).unwrap().boxed();
//! let outcome = RunOutcome { sumresid: 1e-9, nsteps: 12 };
//! assert!(healthy.eval(&outcome));
//! ```

use anyhow::ensure;
use predicates::reflection::PredicateReflection;
use predicates::Predicate;
use std::fmt::Display;

use crate::engine::RunReport;

/// The information a post-run predicate needs to evaluate a [`RunReport`].
#[derive(Debug, Clone, Copy)]
pub struct RunOutcome {
    pub sumresid: f64,
    pub nsteps: u64,
}

impl From<&RunReport> for RunOutcome {
    fn from(report: &RunReport) -> Self {
        Self {
            sumresid: report.sumresid,
            nsteps: report.nsteps,
        }
    }
}

/// True when the remaining residual mass is at or below a threshold.
#[derive(Debug, Clone)]
pub struct Converged {
    threshold: f64,
}

impl Converged {
    pub const DEFAULT_THRESHOLD: f64 = 1e-6;
}

impl TryFrom<f64> for Converged {
    type Error = anyhow::Error;
    fn try_from(threshold: f64) -> anyhow::Result<Self> {
        ensure!(!threshold.is_nan());
        ensure!(threshold > 0.0, "the threshold must be positive");
        Ok(Converged { threshold })
    }
}

impl Default for Converged {
    fn default() -> Self {
        Self::try_from(Self::DEFAULT_THRESHOLD).unwrap()
    }
}

impl Display for Converged {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("(residual <= {})", self.threshold))
    }
}

impl PredicateReflection for Converged {}
impl Predicate<RunOutcome> for Converged {
    fn eval(&self, outcome: &RunOutcome) -> bool {
        outcome.sumresid <= self.threshold
    }
}

/// True when the run stopped at or before a given step.
#[derive(Debug, Clone)]
pub struct MaxSteps {
    max_steps: u64,
}

impl From<u64> for MaxSteps {
    fn from(max_steps: u64) -> Self {
        MaxSteps { max_steps }
    }
}

impl Display for MaxSteps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("(nsteps <= {})", self.max_steps))
    }
}

impl PredicateReflection for MaxSteps {}
impl Predicate<RunOutcome> for MaxSteps {
    fn eval(&self, outcome: &RunOutcome) -> bool {
        outcome.nsteps <= self.max_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use predicates::prelude::*;

    #[test]
    fn converged_predicate_reads_the_residual_bound() {
        let p = Converged::try_from(1e-6).unwrap();
        assert!(p.eval(&RunOutcome {
            sumresid: 1e-9,
            nsteps: 5
        }));
        assert!(!p.eval(&RunOutcome {
            sumresid: 1.0,
            nsteps: 5
        }));
    }

    #[test]
    fn predicates_compose_with_or() {
        let composed = Converged::try_from(1e-6).unwrap().boxed().or(MaxSteps::from(3).boxed());
        assert!(composed.eval(&RunOutcome {
            sumresid: 1.0,
            nsteps: 2
        }));
        assert!(!composed.eval(&RunOutcome {
            sumresid: 1.0,
            nsteps: 10
        }));
    }

    #[test]
    fn rejects_nonpositive_threshold() {
        assert!(Converged::try_from(0.0).is_err());
        assert!(Converged::try_from(-1.0).is_err());
    }
}
