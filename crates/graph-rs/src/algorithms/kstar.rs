//! Lower and upper bounds on the number of k-stars.
//!
//! A k-star is a set of k nodes in which one node, the center, is adjacent to
//! all others. Both bounds need one pass over the adjacency and no enumeration.

use log::info;
use serde::{Deserialize, Serialize};

use crate::{Graph, GraphError, NodeId, algorithms::kmotif::check_motif_size};

/// Binomial coefficient `C(n, k)`, or `None` if it does not fit into a `u64`.
pub fn choose(n: usize, k: u8) -> Option<u64> {
    choose_wide(n as u128, k).and_then(|c| u64::try_from(c).ok())
}

fn choose_wide(n: u128, k: u8) -> Option<u128> {
    if k == 0 {
        return Some(1);
    }
    if u128::from(k) > n {
        return Some(0);
    }
    // n * C(n - 1, k - 1) is always divisible by k.
    n.checked_mul(choose_wide(n - 1, k - 1)?)
        .map(|product| product / u128::from(k))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StarBounds {
    pub lower: u64,
    pub upper: u64,
}

pub trait KStars {
    fn star_bounds(&self, k: usize) -> Result<StarBounds, GraphError>;
}

impl<G> KStars for G
where
    G: Graph,
{
    fn star_bounds(&self, k: usize) -> Result<StarBounds, GraphError> {
        StarBoundEstimator::new(self.node_count()).bounds(self, k)
    }
}

/// Holds the neighbor marker set so it can be reused across calls.
pub struct StarBoundEstimator {
    seen: Vec<bool>,
}

impl StarBoundEstimator {
    pub fn new(node_count: usize) -> Self {
        Self {
            seen: vec![false; node_count],
        }
    }

    /// Every center `u` of degree `d` contributes `C(d, k - 1)` to the upper
    /// bound. The lower bound only keeps the distinct neighbors ranked above
    /// `u`, so each counted star is keyed by its lowest-ranked node.
    pub fn bounds<G: Graph>(&mut self, g: &G, k: usize) -> Result<StarBounds, GraphError> {
        check_motif_size(k)?;
        let leaves = (k - 1) as u8;

        if self.seen.len() < g.node_count() {
            self.seen.resize(g.node_count(), false);
        }

        info!("Computing bounds on the number of {}-stars", k);

        let mut bounds = StarBounds::default();

        for u in g.nodes() {
            let degree = g.degree(u);
            if degree < leaves as usize {
                continue;
            }

            bounds.upper = add(bounds.upper, choose(degree, leaves))?;

            let usable = self.usable_degree(g, u, leaves as usize);
            if usable >= leaves as usize {
                bounds.lower = add(bounds.lower, choose(usable, leaves))?;
            }
        }

        info!(
            "Bounds on the number of {}-stars: [{}, {}]",
            k, bounds.lower, bounds.upper
        );
        Ok(bounds)
    }

    /// Degree of `u` without neighbors ranked at or below `u` and without
    /// repeated neighbors. Stops early once it drops below `leaves`.
    fn usable_degree<G: Graph>(&mut self, g: &G, u: NodeId, leaves: usize) -> usize {
        let neighbors = g.neighbors(u);
        let mut usable = neighbors.len();
        let mut scanned = 0;

        for &v in neighbors {
            scanned += 1;
            if v <= u || self.seen[v as usize] {
                usable -= 1;
                if usable < leaves {
                    break;
                }
            } else {
                self.seen[v as usize] = true;
            }
        }

        for &v in &neighbors[..scanned] {
            self.seen[v as usize] = false;
        }

        usable
    }
}

fn add(total: u64, term: Option<u64>) -> Result<u64, GraphError> {
    term.and_then(|term| total.checked_add(term))
        .ok_or(GraphError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::csr::UndirectedCsrGraph,
        input::edgelist::EdgeList,
        testing::{brute_force_stars, complete_graph, ordered_graph, random_edges},
    };

    #[test]
    fn binomials() {
        assert_eq!(choose(0, 0), Some(1));
        assert_eq!(choose(5, 0), Some(1));
        assert_eq!(choose(5, 1), Some(5));
        assert_eq!(choose(5, 2), Some(10));
        assert_eq!(choose(10, 5), Some(252));
        assert_eq!(choose(3, 4), Some(0));
        assert_eq!(choose(52, 5), Some(2_598_960));
        assert_eq!(choose(64, 32), Some(1_832_624_140_942_590_534));
    }

    #[test]
    fn binomial_overflow_is_reported() {
        assert_eq!(choose(68, 34), None);
        assert_eq!(choose(1_000_000, 200), None);
    }

    #[test]
    fn star_graph_bounds() {
        let graph = ordered_graph(vec![(0, 1), (0, 2), (0, 3), (0, 4)]);

        let bounds = graph.star_bounds(2).unwrap();

        // Center contributes C(4, 1), each leaf C(1, 1).
        assert_eq!(bounds.upper, 8);
        assert_eq!(bounds.lower, 4);

        let bounds = graph.star_bounds(5).unwrap();
        assert_eq!(bounds, StarBounds { lower: 1, upper: 1 });
    }

    #[test]
    fn triangle_bounds() {
        let graph = ordered_graph(vec![(0, 1), (1, 2), (2, 0)]);

        assert_eq!(graph.star_bounds(2).unwrap(), StarBounds { lower: 3, upper: 6 });
        assert_eq!(graph.star_bounds(3).unwrap(), StarBounds { lower: 1, upper: 3 });
        assert_eq!(graph.star_bounds(4).unwrap(), StarBounds { lower: 0, upper: 0 });
    }

    #[test]
    fn single_node_stars_are_nodes() {
        let graph = ordered_graph(vec![(0, 1), (5, 1)]);

        assert_eq!(graph.star_bounds(1).unwrap(), StarBounds { lower: 6, upper: 6 });
    }

    #[test]
    fn complete_graph_lower_bound_is_exact() {
        let graph = complete_graph(8);

        for k in 2..=8 {
            let bounds = graph.star_bounds(k).unwrap();
            let expected = choose(8, k as u8).unwrap();
            assert_eq!(bounds.lower, expected, "k = {k}");
            assert_eq!(bounds.upper, 8 * choose(7, (k - 1) as u8).unwrap(), "k = {k}");
        }
    }

    #[test]
    fn bounds_enclose_brute_force_count() {
        for seed in 0..10 {
            let edges = random_edges(12, 0.3, seed);
            let graph = ordered_graph(edges.clone());
            let plain = UndirectedCsrGraph::from(EdgeList::new(edges.clone()));

            for k in 2..=6 {
                let exact = brute_force_stars(&edges, k);
                for bounds in [graph.star_bounds(k).unwrap(), plain.star_bounds(k).unwrap()] {
                    assert!(
                        bounds.lower <= exact && exact <= bounds.upper,
                        "seed {seed}, k = {k}: {bounds:?} vs {exact}"
                    );
                }
            }
        }
    }

    #[test]
    fn duplicate_edges_do_not_inflate_lower_bound() {
        let graph = ordered_graph(vec![(0, 1), (0, 1), (0, 2), (0, 2), (1, 1)]);

        let bounds = graph.star_bounds(3).unwrap();

        // Only {0, 1, 2} is a 3-star.
        assert_eq!(bounds.lower, 1);
        assert!(bounds.upper >= 1);
    }

    #[test]
    fn estimator_clears_markers_between_nodes() {
        let graph = complete_graph(6);
        let mut estimator = StarBoundEstimator::new(graph.node_count());

        let first = estimator.bounds(&graph, 3).unwrap();

        assert!(estimator.seen.iter().all(|&seen| !seen));
        assert_eq!(estimator.bounds(&graph, 3).unwrap(), first);
    }

    #[test]
    fn rejects_unsupported_sizes() {
        let graph = ordered_graph(vec![(0, 1)]);

        assert!(matches!(
            graph.star_bounds(0),
            Err(GraphError::InvalidMotifSize { k: 0, .. })
        ));
        assert!(matches!(
            graph.star_bounds(300),
            Err(GraphError::InvalidMotifSize { k: 300, .. })
        ));
    }

    #[test]
    fn large_degrees_overflow() {
        let graph = complete_graph(140);

        assert!(matches!(graph.star_bounds(70), Err(GraphError::Overflow)));
    }

    #[test]
    fn bounds_serialize_as_pair() {
        let bounds = StarBounds { lower: 2, upper: 5 };

        assert_eq!(
            serde_json::to_string(&bounds).unwrap(),
            r#"{"lower":2,"upper":5}"#
        );
    }
}
