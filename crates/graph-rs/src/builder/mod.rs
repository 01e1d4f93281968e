use std::path::Path;

use log::info;

use crate::{
    GraphError,
    algorithms::degree_order::DegreeOrdering,
    graph::csr::UndirectedCsrGraph,
    input::edgelist::{EdgeList, ParseMode},
};

pub struct Uninitialized {}

pub struct FromEdgeList {
    edges: EdgeList,
    max_degree: Option<usize>,
}

#[derive(Debug)]
pub struct GraphBuilder<State> {
    state: State,
}

impl Default for GraphBuilder<Uninitialized> {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder<Uninitialized> {
    pub fn new() -> Self {
        Self {
            state: Uninitialized {},
        }
    }

    pub fn edges(self, edges: EdgeList) -> GraphBuilder<FromEdgeList> {
        GraphBuilder {
            state: FromEdgeList {
                edges,
                max_degree: None,
            },
        }
    }

    pub fn string(
        self,
        s: &str,
        mode: ParseMode,
    ) -> Result<GraphBuilder<FromEdgeList>, GraphError> {
        Ok(self.edges(EdgeList::parse(s.as_bytes(), mode)?))
    }

    pub fn path(
        self,
        path: impl AsRef<Path>,
        mode: ParseMode,
    ) -> Result<GraphBuilder<FromEdgeList>, GraphError> {
        Ok(self.edges(EdgeList::from_path(path, mode)?))
    }
}

impl GraphBuilder<FromEdgeList> {
    /// Drops every edge touching a node of degree `max_degree` or more before
    /// the graph is built.
    pub fn max_degree(mut self, max_degree: usize) -> Self {
        self.state.max_degree = Some(max_degree);
        self
    }

    pub fn build<G>(self) -> G
    where
        G: From<EdgeList>,
    {
        G::from(self.into_edges())
    }

    /// Relabels nodes by non-increasing degree, then builds the graph.
    pub fn build_degree_ordered(self) -> (UndirectedCsrGraph, DegreeOrdering) {
        let mut edges = self.into_edges();

        info!("Sorting nodes in non-increasing order of degree");
        let ordering = DegreeOrdering::from_edges(&edges);
        ordering.relabel(&mut edges);

        info!("Building the graph structure");
        (UndirectedCsrGraph::from(edges), ordering)
    }

    fn into_edges(self) -> EdgeList {
        match self.state.max_degree {
            Some(max_degree) => self.state.edges.without_hubs(max_degree),
            None => self.state.edges,
        }
    }
}
