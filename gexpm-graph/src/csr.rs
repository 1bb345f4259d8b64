// SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later

use crate::error::GraphError;

/// A directed sparse graph stored in compressed-sparse-row form.
///
/// The degree-cumulative function `dcf` (the teacher's term for the CSR
/// offset array) has length `n + 1`: the out-neighbors of node `u` are
/// `successors[dcf[u]..dcf[u+1]]`, with parallel edge weights in
/// `weights[dcf[u]..dcf[u+1]]`.
///
/// Unlike a general-purpose graph library, this representation is always
/// fully materialized in memory: there is no lazy/compressed/mmapped
/// backing, since the relaxation engine needs random access to arbitrary
/// out-neighbor lists by node index.
#[derive(Debug, Clone)]
pub struct Csr {
    dcf: Vec<usize>,
    successors: Vec<usize>,
    weights: Vec<f64>,
}

impl Csr {
    /// Builds a CSR graph directly from its parts.
    ///
    /// # Safety
    ///
    /// The caller must ensure `dcf` is monotone non-decreasing, has length
    /// `successors.len() + 1`'s node count plus one, and that `successors`
    /// and `weights` have the same length. Violating this invariant does not
    /// cause memory unsafety (everything here is a plain `Vec`), but it will
    /// silently corrupt the adjacency structure, which is why the
    /// constructor carries the same `unsafe` marker the teacher's
    /// `CsrGraph::from_parts` does.
    pub unsafe fn from_parts(dcf: Vec<usize>, successors: Vec<usize>, weights: Vec<f64>) -> Self {
        Self {
            dcf,
            successors,
            weights,
        }
    }

    /// Number of nodes in the graph.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.dcf.len().saturating_sub(1)
    }

    /// Number of arcs in the graph.
    #[inline]
    pub fn num_arcs(&self) -> usize {
        self.successors.len()
    }

    /// Out-degree of node `u`.
    #[inline]
    pub fn out_degree(&self, u: usize) -> usize {
        self.dcf[u + 1] - self.dcf[u]
    }

    /// Out-neighbors of node `u`.
    #[inline]
    pub fn successors(&self, u: usize) -> &[usize] {
        &self.successors[self.dcf[u]..self.dcf[u + 1]]
    }

    /// Edge weights of node `u`'s out-arcs, parallel to [`successors`](Self::successors).
    #[inline]
    pub fn weights(&self, u: usize) -> &[f64] {
        &self.weights[self.dcf[u]..self.dcf[u + 1]]
    }

    /// Iterates over `(successor, weight)` pairs for node `u`'s out-arcs.
    #[inline]
    pub fn out_edges(&self, u: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.successors(u).iter().copied().zip(self.weights(u).iter().copied())
    }

    /// Checks that every node in `nodes` has out-degree at least one.
    ///
    /// The relaxation engine's contract treats relaxing a zero-degree node as
    /// undefined behavior (it never occurs in practice since a seed's
    /// residual is only ever propagated, never divided by its own degree
    /// until it is selected); callers who want a hard guarantee should run
    /// this check against their seed set before invoking the engine.
    pub fn ensure_no_dangling(&self, nodes: impl IntoIterator<Item = usize>) -> Result<(), GraphError> {
        for u in nodes {
            if self.out_degree(u) == 0 {
                return Err(GraphError::DanglingNode(u));
            }
        }
        Ok(())
    }
}

/// Incrementally builds a [`Csr`] from arcs supplied in arbitrary order.
///
/// Grounded on the teacher's `CsrGraph::from_sorted_lender`, but relaxed to
/// accept unsorted input: arcs are sorted by source node once, at
/// `build()` time, rather than requiring the caller to supply a sorted
/// lender.
#[derive(Debug, Default)]
pub struct CsrBuilder {
    num_nodes: usize,
    arcs: Vec<(usize, usize, f64)>,
}

impl CsrBuilder {
    /// Creates a builder for a graph known to have `num_nodes` nodes.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            arcs: Vec::new(),
        }
    }

    /// Adds an arc `u -> v` with weight `w`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeOutOfRange`] if `u` or `v` is not in
    /// `[0, num_nodes)`.
    pub fn add_arc(&mut self, u: usize, v: usize, w: f64) -> Result<(), GraphError> {
        if u >= self.num_nodes {
            return Err(GraphError::NodeOutOfRange(u, v, self.num_nodes));
        }
        if v >= self.num_nodes {
            return Err(GraphError::NodeOutOfRange(u, v, self.num_nodes));
        }
        self.arcs.push((u, v, w));
        Ok(())
    }

    /// Adds an unweighted arc `u -> v` (weight `1.0`).
    pub fn add_unweighted_arc(&mut self, u: usize, v: usize) -> Result<(), GraphError> {
        self.add_arc(u, v, 1.0)
    }

    /// Consumes the builder, producing a [`Csr`].
    pub fn build(mut self) -> Csr {
        self.arcs.sort_unstable_by_key(|&(u, _, _)| u);

        let mut dcf = Vec::with_capacity(self.num_nodes + 1);
        let mut successors = Vec::with_capacity(self.arcs.len());
        let mut weights = Vec::with_capacity(self.arcs.len());

        dcf.push(0);
        let mut last_src = 0;
        for (u, v, w) in self.arcs {
            while last_src < u {
                dcf.push(successors.len());
                last_src += 1;
            }
            successors.push(v);
            weights.push(w);
        }
        for _ in last_src..self.num_nodes {
            dcf.push(successors.len());
        }

        log::debug!(
            "built CSR graph: {} nodes, {} arcs",
            self.num_nodes,
            successors.len()
        );

        // Safety: dcf was built monotonically above, one entry per node
        // boundary, coherent with successors/weights by construction.
        unsafe { Csr::from_parts(dcf, successors, weights) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_has_no_nodes_or_arcs() {
        let g = CsrBuilder::new(0).build();
        assert_eq!(g.num_nodes(), 0);
        assert_eq!(g.num_arcs(), 0);
    }

    #[test]
    fn isolated_nodes_have_degree_zero() {
        let g = CsrBuilder::new(3).build();
        assert_eq!(g.num_nodes(), 3);
        for u in 0..3 {
            assert_eq!(g.out_degree(u), 0);
            assert!(g.successors(u).is_empty());
        }
    }

    #[test]
    fn two_node_cycle_round_trips_successors() {
        let mut b = CsrBuilder::new(2);
        b.add_unweighted_arc(0, 1).unwrap();
        b.add_unweighted_arc(1, 0).unwrap();
        let g = b.build();
        assert_eq!(g.successors(0), &[1]);
        assert_eq!(g.successors(1), &[0]);
        assert_eq!(g.num_arcs(), 2);
    }

    #[test]
    fn arcs_out_of_order_are_sorted_by_source() {
        let mut b = CsrBuilder::new(3);
        b.add_unweighted_arc(2, 0).unwrap();
        b.add_unweighted_arc(0, 1).unwrap();
        b.add_unweighted_arc(0, 2).unwrap();
        let g = b.build();
        assert_eq!(g.successors(0), &[1, 2]);
        assert_eq!(g.successors(1), &[]);
        assert_eq!(g.successors(2), &[0]);
    }

    #[test]
    fn weighted_arcs_preserve_weights_parallel_to_successors() {
        let mut b = CsrBuilder::new(2);
        b.add_arc(0, 1, 0.25).unwrap();
        let g = b.build();
        assert_eq!(g.weights(0), &[0.25]);
        assert_eq!(g.out_edges(0).collect::<Vec<_>>(), vec![(1, 0.25)]);
    }

    #[test]
    fn out_of_range_arc_is_rejected() {
        let mut b = CsrBuilder::new(2);
        assert!(matches!(
            b.add_unweighted_arc(0, 5),
            Err(GraphError::NodeOutOfRange(0, 5, 2))
        ));
    }

    #[test]
    fn dangling_node_check_detects_zero_degree() {
        let mut b = CsrBuilder::new(2);
        b.add_unweighted_arc(0, 1).unwrap();
        let g = b.build();
        assert!(g.ensure_no_dangling([0]).is_ok());
        assert!(matches!(
            g.ensure_no_dangling([1]),
            Err(GraphError::DanglingNode(1))
        ));
    }
}
