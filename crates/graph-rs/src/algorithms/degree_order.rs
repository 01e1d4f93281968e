use std::cmp::Reverse;

use log::debug;

use crate::{GraphError, NodeId, input::edgelist::EdgeList};

/// Relabeling of nodes by non-increasing degree.
///
/// Rank 0 is the node with the largest degree. Nodes of equal degree keep the
/// order of their original ids, so the ordering is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DegreeOrdering {
    rank: Vec<NodeId>,
    original: Vec<NodeId>,
}

impl DegreeOrdering {
    pub fn from_edges(edge_list: &EdgeList) -> Self {
        let degrees = edge_list.degrees();

        let mut original: Vec<NodeId> = (0..degrees.len() as NodeId).collect();
        original.sort_unstable_by_key(|&node| (Reverse(degrees[node as usize]), node));

        let mut rank = vec![0; original.len()];
        original
            .iter()
            .enumerate()
            .for_each(|(position, &node)| rank[node as usize] = position as NodeId);

        debug!(
            "ordered {} nodes by degree (max degree: {})",
            original.len(),
            original
                .first()
                .map_or(0, |&node| degrees[node as usize])
        );

        Self { rank, original }
    }

    pub fn node_count(&self) -> usize {
        self.original.len()
    }

    /// New label of the input node `node`.
    pub fn rank(&self, node: NodeId) -> Result<NodeId, GraphError> {
        self.rank
            .get(node as usize)
            .copied()
            .ok_or(GraphError::NodeNotFound(node as usize))
    }

    /// Input id of the node labeled `rank`.
    pub fn original(&self, rank: NodeId) -> Result<NodeId, GraphError> {
        self.original
            .get(rank as usize)
            .copied()
            .ok_or(GraphError::NodeNotFound(rank as usize))
    }

    /// Rewrites every endpoint of `edge_list` into rank space.
    ///
    /// `edge_list` must be the list this ordering was computed from.
    pub fn relabel(&self, edge_list: &mut EdgeList) {
        debug_assert_eq!(edge_list.node_count(), self.node_count());
        edge_list.permute_nodes(|node| self.rank[node as usize]);
    }

    /// Translates a motif given in rank space back to input ids.
    pub fn originals<'a>(&'a self, ranks: &'a [NodeId]) -> impl Iterator<Item = NodeId> + 'a {
        ranks.iter().map(|&rank| self.original[rank as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_decreasing_degree() {
        // Degrees: 0 -> 1, 1 -> 3, 2 -> 2, 3 -> 2.
        let edges = EdgeList::new(vec![(1, 0), (1, 2), (1, 3), (2, 3)]);

        let ordering = DegreeOrdering::from_edges(&edges);

        assert_eq!(ordering.original, vec![1, 2, 3, 0]);
        assert_eq!(ordering.rank, vec![3, 0, 1, 2]);
        assert_eq!(ordering.node_count(), 4);
    }

    #[test]
    fn relabel_rewrites_endpoints() {
        let mut edges = EdgeList::new(vec![(1, 0), (1, 2), (1, 3), (2, 3)]);
        let ordering = DegreeOrdering::from_edges(&edges);

        ordering.relabel(&mut edges);

        assert_eq!(
            edges.edges().collect::<Vec<_>>(),
            vec![(0, 3), (0, 1), (0, 2), (1, 2)]
        );
        assert_eq!(edges.degrees(), vec![3, 2, 2, 1]);
    }

    #[test]
    fn relabel_keeps_isolated_nodes() {
        // Nodes 0 and 1 have no edges and take the last ranks.
        let mut edges = EdgeList::new(vec![(2, 3)]);
        let ordering = DegreeOrdering::from_edges(&edges);

        ordering.relabel(&mut edges);

        assert_eq!(ordering.original(3).unwrap(), 1);
        assert_eq!(edges.edges().collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(edges.node_count(), 4);
        assert_eq!(edges.degrees(), vec![1, 1, 0, 0]);
    }

    #[test]
    fn rank_and_original_are_inverse() {
        let edges = EdgeList::new(vec![(5, 3), (3, 1), (3, 0), (0, 5), (4, 4)]);
        let ordering = DegreeOrdering::from_edges(&edges);

        for node in 0..6 {
            let rank = ordering.rank(node).unwrap();
            assert_eq!(ordering.original(rank).unwrap(), node);
        }
        assert!(matches!(ordering.rank(6), Err(GraphError::NodeNotFound(6))));
        assert!(matches!(ordering.original(9), Err(GraphError::NodeNotFound(9))));
    }

    #[test]
    fn ties_break_by_original_id() {
        let edges = EdgeList::new(vec![(3, 2), (1, 0)]);

        let ordering = DegreeOrdering::from_edges(&edges);

        assert_eq!(ordering.original, vec![0, 1, 2, 3]);
        assert_eq!(ordering, DegreeOrdering::from_edges(&edges));
    }

    #[test]
    fn translates_motifs_back() {
        let edges = EdgeList::new(vec![(1, 0), (1, 2), (1, 3), (2, 3)]);
        let ordering = DegreeOrdering::from_edges(&edges);

        assert_eq!(ordering.originals(&[0, 1, 2]).collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
