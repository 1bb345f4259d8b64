// SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later

use thiserror::Error;

/// Errors raised while building or validating a [`Csr`](crate::Csr) graph.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("arc ({0}, {1}) refers to a node outside [0, {2})")]
    NodeOutOfRange(usize, usize, usize),

    #[error("node {0} has out-degree 0 but is marked as an active coordinate")]
    DanglingNode(usize),
}
