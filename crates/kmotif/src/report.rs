use std::fmt::Display;

use graph_rs::algorithms::StarBounds;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub max_degree: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MotifReport {
    #[serde(flatten)]
    pub graph: GraphSummary,
    pub k: usize,
    pub motifs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarReport {
    #[serde(flatten)]
    pub graph: GraphSummary,
    pub k: usize,
    #[serde(flatten)]
    pub bounds: StarBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HubReport {
    pub max_degree: usize,
    pub kept: usize,
    pub removed: usize,
}

impl Display for GraphSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Number of nodes = {}", self.nodes)?;
        writeln!(f, "Number of edges = {}", self.edges)?;
        write!(f, "Maximum degree = {}", self.max_degree)
    }
}

impl Display for MotifReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Number of {}-motifs: {}", self.k, self.motifs)
    }
}

impl Display for StarReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Lower-bound on the number of {}-stars: {}",
            self.k, self.bounds.lower
        )?;
        write!(
            f,
            "Upper-bound on the number of {}-stars: {}",
            self.k, self.bounds.upper
        )
    }
}

impl Display for HubReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Kept {} edges, removed {} (maximum degree allowed = {})",
            self.kept, self.removed, self.max_degree
        )
    }
}
