use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
};

use graph_rs::{
    Graph, GraphError,
    algorithms::{DegreeOrdering, MotifCounter, StarBoundEstimator},
    builder::GraphBuilder,
    graph::UndirectedCsrGraph,
    input::{EdgeList, ParseMode},
};
use log::info;

pub mod report;
pub mod timing;

use report::{GraphSummary, HubReport, MotifReport, StarReport};

/// A degree-ordered graph together with the labels needed to report motifs
/// in input ids.
#[derive(Debug)]
pub struct LoadedGraph {
    pub graph: UndirectedCsrGraph,
    pub ordering: DegreeOrdering,
}

impl LoadedGraph {
    pub fn from_path(
        path: impl AsRef<Path>,
        mode: ParseMode,
        max_degree: Option<usize>,
    ) -> Result<Self, GraphError> {
        let builder = GraphBuilder::new().path(path, mode)?;
        let builder = match max_degree {
            Some(max_degree) => builder.max_degree(max_degree),
            None => builder,
        };
        Ok(Self::from_builder_output(builder.build_degree_ordered()))
    }

    pub fn from_edges(edges: EdgeList) -> Self {
        Self::from_builder_output(GraphBuilder::new().edges(edges).build_degree_ordered())
    }

    fn from_builder_output((graph, ordering): (UndirectedCsrGraph, DegreeOrdering)) -> Self {
        Self { graph, ordering }
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            max_degree: self.graph.max_degree(),
        }
    }

    pub fn count_motifs(&self, k: usize, parallel: bool) -> Result<MotifReport, GraphError> {
        let counter = MotifCounter::new(&self.graph, k)?;
        let motifs = if parallel {
            counter.par_count()?
        } else {
            counter.count()?
        };

        Ok(MotifReport {
            graph: self.summary(),
            k,
            motifs,
        })
    }

    /// Writes every motif as a line of input ids and counts them.
    ///
    /// The first write error stops the search at the next root and is
    /// returned.
    pub fn enumerate_motifs<W: Write>(
        &self,
        k: usize,
        mut writer: W,
    ) -> Result<MotifReport, GraphError> {
        let stop = AtomicBool::new(false);
        let counter = MotifCounter::new(&self.graph, k)?.with_interrupt(&stop);
        let mut write_error = None;

        let result = counter.for_each_motif(|motif| {
            if write_error.is_some() {
                return;
            }
            let line = self
                .ordering
                .originals(motif)
                .map(|node| node.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            if let Err(err) = writeln!(writer, "{}", line) {
                write_error = Some(err);
                stop.store(true, Ordering::Relaxed);
            }
        });

        if let Some(err) = write_error {
            return Err(err.into());
        }
        let motifs = result?;
        writer.flush()?;

        Ok(MotifReport {
            graph: self.summary(),
            k,
            motifs,
        })
    }

    pub fn star_bounds(&self, k: usize) -> Result<StarReport, GraphError> {
        let bounds = StarBoundEstimator::new(self.graph.node_count()).bounds(&self.graph, k)?;

        Ok(StarReport {
            graph: self.summary(),
            k,
            bounds,
        })
    }
}

/// Copies `input` to `output` without the edges touching a node of degree
/// `max_degree` or more.
pub fn remove_hubs(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    max_degree: usize,
    mode: ParseMode,
) -> Result<HubReport, GraphError> {
    let edges = EdgeList::from_path(input, mode)?;
    let filtered = edges.without_hubs(max_degree);

    info!("Writing edgelist in file {}", output.as_ref().display());
    filtered.write_to(BufWriter::new(File::create(output)?))?;

    Ok(HubReport {
        max_degree,
        kept: filtered.edge_count(),
        removed: edges.edge_count() - filtered.edge_count(),
    })
}
