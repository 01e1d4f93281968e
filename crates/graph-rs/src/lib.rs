use std::{error::Error, fmt::Display, io};

pub mod algorithms;
pub mod builder;
pub mod graph;
pub mod input;

#[cfg(test)]
mod testing;

/// Node identifier used by every graph in this crate.
pub type NodeId = u32;

#[derive(Debug)]
pub enum GraphError {
    NodeNotFound(usize),
    MalformedInput { line: usize, content: String },
    InvalidMotifSize { k: usize, max: usize },
    Overflow,
    Interrupted,
    Io(io::Error),
}

impl Error for GraphError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(node) => write!(f, "node_id: {} not found in graph", node),
            Self::MalformedInput { line, content } => {
                write!(f, "line {}: expected two node ids, found '{}'", line, content)
            }
            Self::InvalidMotifSize { k, max } => {
                write!(f, "motif size {} is not in the supported range 1..={}", k, max)
            }
            Self::Overflow => write!(f, "count exceeds the range of a 64-bit integer"),
            Self::Interrupted => write!(f, "computation was interrupted"),
            Self::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

impl From<io::Error> for GraphError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Read-only access to an undirected graph with sorted adjacency.
pub trait Graph {
    fn node_count(&self) -> usize;

    /// Number of undirected edges, i.e. half the length of the adjacency.
    fn edge_count(&self) -> usize;

    fn degree(&self, node: NodeId) -> usize;

    /// Neighbors of `node` in ascending order, one entry per incident edge.
    fn neighbors(&self, node: NodeId) -> &[NodeId];

    /// Prefix of [`Graph::neighbors`] holding the neighbors with a smaller id.
    fn lower_neighbors(&self, node: NodeId) -> &[NodeId] {
        let neighbors = self.neighbors(node);
        let cut = neighbors.partition_point(|&v| v < node);
        &neighbors[..cut]
    }

    fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.node_count()).map(|node| node as NodeId)
    }
}
