// SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later

//! Push-based Gauss–Southwell relaxation for a column of
//! `exp(t(P - I)) s`, where `P` is the column-stochastic random-walk
//! transition matrix implicit in a graph's adjacency structure and `s` is a
//! seed (indicator or weighted) vector.
//!
//! Two selection disciplines are provided over the same push algebra (see
//! [`select`] and [`engine`]):
//!
//! - [`engine::run_heap`]: exact Gauss–Southwell selection via an indexed
//!   max-heap ([`heap`]), assuming uniform `1/deg(u)` edge weights.
//! - [`engine::run_queue`]: approximate FIFO selection with an admission
//!   threshold ([`queue`]), honoring the graph's actual edge weights.
//!
//! Callers who just want a vector back should reach for [`engine::run_heap`]
//! or [`engine::run_queue`] directly; [`preds`] is for diagnosing whether a
//! run actually converged.

pub mod engine;
pub mod error;
pub mod heap;
pub mod preds;
pub mod queue;
pub mod residual;
pub mod select;
pub mod taylor;

pub use engine::{run_heap, run_heap_with_logging, run_queue, run_queue_with_logging, RunReport};
pub use error::{Error, Result};
pub use select::RelaxationStrategy;
