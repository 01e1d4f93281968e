use log::info;
use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::{Graph, NodeId, input::edgelist::EdgeList};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Csr {
    offsets: Vec<usize>,
    targets: Vec<NodeId>,
}

impl Csr {
    /// Create a `CSR` from `offsets` and `targets`.
    ///
    /// Returns a new `CSR` where `offsets[i]` contains the index of the first
    /// target node in `targets` and `offsets[node_count]` equals
    /// `targets.len()`.
    pub fn new(offsets: Vec<usize>, targets: Vec<NodeId>) -> Csr {
        debug_assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        debug_assert_eq!(offsets.last().copied().unwrap_or(0), targets.len());
        Self { offsets, targets }
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of stored targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn degree(&self, i: usize) -> usize {
        let from = self.offsets[i];
        let to = self.offsets[i + 1];

        to - from
    }

    pub fn targets(&self, i: usize) -> &[NodeId] {
        let from = self.offsets[i];
        let to = self.offsets[i + 1];

        &self.targets[from..to]
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn all_targets(&self) -> &[NodeId] {
        &self.targets
    }
}

impl Default for Csr {
    fn default() -> Self {
        Csr {
            offsets: vec![0],
            targets: vec![],
        }
    }
}

/// Undirected graph with both directions of every edge stored in one [`Csr`].
///
/// Every neighbor segment is sorted ascending. Self-loops appear twice in
/// their node's segment and parallel edges are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UndirectedCsrGraph {
    csr: Csr,
    max_degree: usize,
}

impl UndirectedCsrGraph {
    pub fn new(csr: Csr) -> UndirectedCsrGraph {
        let max_degree = (0..csr.node_count())
            .map(|node| csr.degree(node))
            .max()
            .unwrap_or(0);

        let g = Self { csr, max_degree };

        info!(
            "Created undirected graph (node_count: {:?}, edge_count = {:?}, max_degree = {:?})",
            g.node_count(),
            g.edge_count(),
            g.max_degree()
        );

        g
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn csr(&self) -> &Csr {
        &self.csr
    }
}

impl Graph for UndirectedCsrGraph {
    fn node_count(&self) -> usize {
        self.csr.node_count()
    }

    fn edge_count(&self) -> usize {
        self.csr.len() / 2
    }

    fn degree(&self, node: NodeId) -> usize {
        self.csr.degree(node as usize)
    }

    fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.csr.targets(node as usize)
    }
}

impl From<EdgeList> for UndirectedCsrGraph {
    fn from(edge_list: EdgeList) -> Self {
        UndirectedCsrGraph::from(&edge_list)
    }
}

impl From<&EdgeList> for UndirectedCsrGraph {
    fn from(edge_list: &EdgeList) -> Self {
        let degrees = edge_list.degrees();
        let mut offsets = prefix_sum(&degrees);

        let target_count = *offsets.last().unwrap_or(&0);
        let mut targets = vec![0 as NodeId; target_count];

        // `offsets[i]` is the write cursor of node `i` until the scatter is done.
        edge_list.edges().for_each(|(s, t)| {
            targets[offsets[s as usize]] = t;
            offsets[s as usize] += 1;

            targets[offsets[t as usize]] = s;
            offsets[t as usize] += 1;
        });

        // Every cursor now sits on the start of the next segment.
        offsets.rotate_right(1);
        offsets[0] = 0;

        sort_segments(&offsets, &mut targets);

        UndirectedCsrGraph::new(Csr::new(offsets, targets))
    }
}

fn prefix_sum(degrees: &[usize]) -> Vec<usize> {
    std::iter::once(0)
        .chain(degrees.iter().scan(0, |total, degree| {
            *total += degree;
            Some(*total)
        }))
        .collect()
}

fn sort_segments(offsets: &[usize], targets: &mut [NodeId]) {
    let mut segments = Vec::with_capacity(offsets.len().saturating_sub(1));
    let mut rest = targets;

    for window in offsets.windows(2) {
        let (segment, tail) = std::mem::take(&mut rest).split_at_mut(window[1] - window[0]);
        segments.push(segment);
        rest = tail;
    }

    segments
        .par_iter_mut()
        .for_each(|segment| segment.sort_unstable());
}
