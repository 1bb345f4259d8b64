// SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later

//! A minimal compressed sparse row graph representation.
//!
//! This crate provides just enough of a graph abstraction for push-based
//! relaxation algorithms such as `gexpm`: random access to a node's
//! out-neighbors and their weights, and nothing else. It deliberately omits
//! the lazy/compressed/mmapped machinery of a general-purpose graph library,
//! since the algorithms built on top of it need direct indexed access to
//! arbitrary out-neighbor lists rather than sequential iteration over a
//! compressed bitstream.

mod csr;
mod error;

pub use csr::{Csr, CsrBuilder};
pub use error::GraphError;
