//! Exact k-motif (k-clique) counting.
//!
//! Roots are visited in ascending id order. A root's first candidate pool is
//! its set of lower-id neighbors, and every deeper pool keeps the candidates of
//! the parent pool that are lower-id neighbors of the newly chosen member. Each
//! clique is therefore reached exactly once, as its chain of decreasing ids.
//!
//! On a degree-ordered graph (see [`DegreeOrdering`]) a node has at most
//! `sqrt(2e)` lower-id neighbors, which bounds every pool.
//!
//! [`DegreeOrdering`]: crate::algorithms::degree_order::DegreeOrdering

use std::{
    ops::Range,
    sync::atomic::{AtomicBool, Ordering},
};

use log::info;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{Graph, GraphError, NodeId};

/// Largest supported motif size.
pub const MAX_MOTIF_SIZE: usize = u8::MAX as usize;

pub fn check_motif_size(k: usize) -> Result<(), GraphError> {
    if (1..=MAX_MOTIF_SIZE).contains(&k) {
        Ok(())
    } else {
        Err(GraphError::InvalidMotifSize {
            k,
            max: MAX_MOTIF_SIZE,
        })
    }
}

/// Backtracking state shared by every frame of one search.
///
/// `bounds[l]` delimits the level-`l` pool inside `list`; it holds the
/// candidates for `motif[l + 1]`. Members of the level-`l` pool carry label
/// `l + 1`, every other node carries a lower label, and between two roots all
/// labels are 0. Motif sizes are capped at `u8::MAX`, so labels fit a `u8`.
struct MotifCountData {
    k: usize,
    list: Vec<NodeId>,
    label: Vec<u8>,
    bounds: Vec<(usize, usize)>,
    motif: Vec<NodeId>,
}

impl MotifCountData {
    fn new(node_count: usize, k: usize) -> Self {
        MotifCountData {
            k,
            list: Vec::with_capacity(node_count),
            label: vec![0; node_count],
            bounds: vec![(0, 0); k - 1],
            motif: Vec::with_capacity(k),
        }
    }

    fn visit_root<G, F>(
        &mut self,
        g: &G,
        root: NodeId,
        emit: &mut Option<F>,
    ) -> Result<u64, GraphError>
    where
        G: Graph,
        F: FnMut(&[NodeId]),
    {
        self.motif.clear();
        self.motif.push(root);

        if self.k == 1 {
            if let Some(f) = emit.as_mut() {
                f(&self.motif);
            }
            return Ok(1);
        }

        self.list.clear();
        for &v in g.lower_neighbors(root) {
            if self.label[v as usize] == 0 {
                self.label[v as usize] = 1;
                self.list.push(v);
            }
        }
        self.bounds[0] = (0, self.list.len());

        let result = if self.list.len() >= self.k - 1 {
            self.expand(g, 1, emit)
        } else {
            Ok(0)
        };

        self.relabel(0..self.list.len(), 0);
        self.list.clear();

        result
    }

    /// Chooses `motif[level]` from the level `level - 1` pool, whose members
    /// are exactly the nodes labeled `level`.
    fn expand<G, F>(
        &mut self,
        g: &G,
        level: usize,
        emit: &mut Option<F>,
    ) -> Result<u64, GraphError>
    where
        G: Graph,
        F: FnMut(&[NodeId]),
    {
        let (start, end) = self.bounds[level - 1];

        if level == self.k - 1 {
            if let Some(f) = emit.as_mut() {
                for i in start..end {
                    self.motif.push(self.list[i]);
                    f(&self.motif);
                    self.motif.pop();
                }
            }
            return Ok((end - start) as u64);
        }

        let pool_label = level as u8;
        let needed = self.k - 1 - level;
        let mut count: u64 = 0;

        for i in start..end {
            let x = self.list[i];

            // Last member missing: the child pool size is the count.
            if needed == 1 && emit.is_none() {
                let mut found = 0;
                let mut previous = None;
                for &y in g.lower_neighbors(x) {
                    if self.label[y as usize] == pool_label && previous != Some(y) {
                        found += 1;
                    }
                    previous = Some(y);
                }
                count = count.checked_add(found).ok_or(GraphError::Overflow)?;
                continue;
            }

            let child_start = self.list.len();
            for &y in g.lower_neighbors(x) {
                if self.label[y as usize] == pool_label {
                    self.label[y as usize] = pool_label + 1;
                    self.list.push(y);
                }
            }
            let child_end = self.list.len();

            let found = if child_end - child_start >= needed {
                self.motif.push(x);
                self.bounds[level] = (child_start, child_end);
                let found = self.expand(g, level + 1, emit);
                self.motif.pop();
                found
            } else {
                Ok(0)
            };

            self.relabel(child_start..child_end, pool_label);
            self.list.truncate(child_start);

            count = count.checked_add(found?).ok_or(GraphError::Overflow)?;
        }

        Ok(count)
    }

    fn relabel(&mut self, range: Range<usize>, label: u8) {
        for &v in &self.list[range] {
            self.label[v as usize] = label;
        }
    }
}

/// Exact counter for the k-motifs of a graph.
pub struct MotifCounter<'a, G> {
    graph: &'a G,
    k: usize,
    interrupt: Option<&'a AtomicBool>,
}

impl<'a, G: Graph> MotifCounter<'a, G> {
    pub fn new(graph: &'a G, k: usize) -> Result<Self, GraphError> {
        check_motif_size(k)?;
        Ok(Self {
            graph,
            k,
            interrupt: None,
        })
    }

    /// Polls `flag` before every root and stops with
    /// [`GraphError::Interrupted`] once it is set.
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn count(&self) -> Result<u64, GraphError> {
        self.run(None::<fn(&[NodeId])>)
    }

    /// Calls `f` with every motif, given as node ids in decreasing order, and
    /// returns how many there were.
    pub fn for_each_motif<F>(&self, f: F) -> Result<u64, GraphError>
    where
        F: FnMut(&[NodeId]),
    {
        self.run(Some(f))
    }

    fn run<F>(&self, mut emit: Option<F>) -> Result<u64, GraphError>
    where
        F: FnMut(&[NodeId]),
    {
        info!(
            "Iterates over all {}-motifs of {} nodes",
            self.k,
            self.graph.node_count()
        );

        let mut data = MotifCountData::new(self.graph.node_count(), self.k);
        let mut total: u64 = 0;

        for root in self.graph.nodes() {
            self.check_interrupt()?;
            let found = data.visit_root(self.graph, root, &mut emit)?;
            total = total.checked_add(found).ok_or(GraphError::Overflow)?;
        }

        info!("Number of {}-motifs: {}", self.k, total);
        Ok(total)
    }

    fn check_interrupt(&self) -> Result<(), GraphError> {
        match self.interrupt {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(GraphError::Interrupted),
            _ => Ok(()),
        }
    }
}

impl<G: Graph + Sync> MotifCounter<'_, G> {
    /// Like [`MotifCounter::count`], with roots spread over the rayon pool.
    /// Every worker owns its own backtracking state.
    pub fn par_count(&self) -> Result<u64, GraphError> {
        info!(
            "Iterates over all {}-motifs of {} nodes on {} threads",
            self.k,
            self.graph.node_count(),
            rayon::current_num_threads()
        );

        let node_count = self.graph.node_count();
        let total = (0..node_count)
            .into_par_iter()
            .map_init(
                || MotifCountData::new(node_count, self.k),
                |data, root| {
                    self.check_interrupt()?;
                    data.visit_root(self.graph, root as NodeId, &mut None::<fn(&[NodeId])>)
                },
            )
            .try_reduce(|| 0, |a, b| a.checked_add(b).ok_or(GraphError::Overflow))?;

        info!("Number of {}-motifs: {}", self.k, total);
        Ok(total)
    }
}

pub trait KMotifs {
    fn count_motifs(&self, k: usize) -> Result<u64, GraphError>;
}

impl<G> KMotifs for G
where
    G: Graph,
{
    fn count_motifs(&self, k: usize) -> Result<u64, GraphError> {
        MotifCounter::new(self, k)?.count()
    }
}
