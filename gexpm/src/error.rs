// SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later

use thiserror::Error;

/// Errors raised while validating inputs to a `gexpm` run.
///
/// These correspond to the "argument error" class of spec.md's error
/// taxonomy: wrong arity/types are caught by Rust's type system instead, but
/// everything that is a runtime value check (ranges, positivity, seed
/// membership) surfaces here. Each variant also carries the stable
/// identifier the original MEX bridge used
/// (`gexpm_hash_mex:wrongNumberArguments` and friends), because callers that
/// bridge this crate to other languages may want to match on it the same
/// way the original MATLAB binding did.
#[derive(Error, Debug)]
pub enum Error {
    #[error("gexpm:emptySeedSet: the seed set must be nonempty")]
    EmptySeedSet,

    #[error("gexpm:seedOutOfRange: seed {0} is outside [1, {1}] (1-based)")]
    SeedOutOfRange(usize, usize),

    #[error("gexpm:nonPositiveEps: eps must be > 0, got {0}")]
    NonPositiveEps(f64),

    #[error("gexpm:nonPositiveT: t must be >= 0, got {0}")]
    NegativeT(f64),

    #[error("gexpm:nonPositiveDegree: N must be >= 1, got {0}")]
    NonPositiveDegree(i64),

    #[error("gexpm:tolOutOfRange: tol must be in (0, 1], got {0}")]
    TolOutOfRange(f64),

    #[error("gexpm:nonPositiveMaxsteps: maxsteps must be >= 1, got {0}")]
    NonPositiveMaxsteps(i64),

    #[error(transparent)]
    Graph(#[from] gexpm_graph::GraphError),
}

pub type Result<T> = std::result::Result<T, Error>;
