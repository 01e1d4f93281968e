//! Graph generators and brute-force references for unit tests.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;

use crate::{
    NodeId, builder::GraphBuilder, graph::csr::UndirectedCsrGraph, input::edgelist::EdgeList,
};

pub fn ordered_graph(edges: Vec<(NodeId, NodeId)>) -> UndirectedCsrGraph {
    GraphBuilder::new()
        .edges(EdgeList::new(edges))
        .build_degree_ordered()
        .0
}

pub fn complete_graph(m: NodeId) -> UndirectedCsrGraph {
    let edges = (0..m)
        .flat_map(|u| (u + 1..m).map(move |v| (u, v)))
        .collect();
    ordered_graph(edges)
}

/// Erdős–Rényi graph on `n` nodes; every pair is an edge with probability `p`.
pub fn random_edges(n: NodeId, p: f64, seed: u64) -> Vec<(NodeId, NodeId)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for u in 0..n {
        for v in u + 1..n {
            if rng.random_bool(p) {
                edges.push((u, v));
            }
        }
    }
    // Keep the full node range even if the last node ends up isolated.
    if n > 1 && !edges.iter().any(|&(_, v)| v == n - 1) {
        edges.push((0, n - 1));
    }
    edges
}

struct Adjacency {
    node_count: usize,
    edges: FxHashSet<(NodeId, NodeId)>,
}

impl Adjacency {
    fn new(edges: &[(NodeId, NodeId)]) -> Self {
        let node_count = edges
            .iter()
            .map(|&(s, t)| s.max(t) as usize + 1)
            .max()
            .unwrap_or(0);
        let edges = edges
            .iter()
            .filter(|(s, t)| s != t)
            .map(|&(s, t)| (s.min(t), s.max(t)))
            .collect();
        Self { node_count, edges }
    }

    fn adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.contains(&(a.min(b), a.max(b)))
    }

    fn for_each_subset<F: FnMut(&[NodeId])>(&self, k: usize, f: &mut F) {
        fn rec<F: FnMut(&[NodeId])>(
            next: NodeId,
            n: NodeId,
            k: usize,
            subset: &mut Vec<NodeId>,
            f: &mut F,
        ) {
            if subset.len() == k {
                f(subset);
                return;
            }
            for v in next..n {
                subset.push(v);
                rec(v + 1, n, k, subset, f);
                subset.pop();
            }
        }
        rec(0, self.node_count as NodeId, k, &mut Vec::new(), f);
    }
}

pub fn brute_force_cliques(edges: &[(NodeId, NodeId)], k: usize) -> u64 {
    let adjacency = Adjacency::new(edges);
    let mut count = 0;
    adjacency.for_each_subset(k, &mut |subset| {
        let clique = subset
            .iter()
            .enumerate()
            .all(|(i, &a)| subset[i + 1..].iter().all(|&b| adjacency.adjacent(a, b)));
        if clique {
            count += 1;
        }
    });
    count
}

/// Number of k-node sets containing a node adjacent to all the others.
pub fn brute_force_stars(edges: &[(NodeId, NodeId)], k: usize) -> u64 {
    let adjacency = Adjacency::new(edges);
    let mut count = 0;
    adjacency.for_each_subset(k, &mut |subset| {
        let star = subset.iter().any(|&center| {
            subset
                .iter()
                .all(|&leaf| leaf == center || adjacency.adjacent(center, leaf))
        });
        if star {
            count += 1;
        }
    });
    count
}
