use std::{
    cmp::max,
    fs::File,
    io::{self, Write},
    iter::Copied,
    path::Path,
    slice::Iter,
};

use log::{debug, info, warn};
use memmap2::MmapOptions;

use crate::{GraphError, NodeId};

/// What to do with a line that is not a pair of node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Fail with [`GraphError::MalformedInput`].
    #[default]
    Strict,
    /// Stop reading and keep every edge parsed so far.
    Truncate,
}

/// Undirected edges as read from the input, self-loops and duplicates included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeList {
    edges: Box<[(NodeId, NodeId)]>,
    max_node_id: Option<NodeId>,
}

impl EdgeList {
    pub fn new(edges: Vec<(NodeId, NodeId)>) -> Self {
        let max_node_id = edges.iter().map(|&(s, t)| max(s, t)).max();
        Self {
            edges: edges.into_boxed_slice(),
            max_node_id,
        }
    }

    /// Parses one edge per line. Blank lines and lines starting with `#` or
    /// `%` are skipped.
    pub fn parse(input: &[u8], mode: ParseMode) -> Result<Self, GraphError> {
        let mut edges = Vec::with_capacity(input.len() / 8);

        for (index, line) in input.split(|&b| b == b'\n').enumerate() {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            let mut tokens = line
                .split(|b| b.is_ascii_whitespace())
                .filter(|token| !token.is_empty());

            let Some(first) = tokens.next() else {
                continue;
            };
            if first.starts_with(b"#") || first.starts_with(b"%") {
                continue;
            }

            let edge = match (parse_node(first), tokens.next().and_then(parse_node)) {
                (Some(s), Some(t)) if tokens.next().is_none() => Some((s, t)),
                _ => None,
            };

            match (edge, mode) {
                (Some(edge), _) => edges.push(edge),
                (None, ParseMode::Strict) => {
                    return Err(GraphError::MalformedInput {
                        line: index + 1,
                        content: String::from_utf8_lossy(line).into_owned(),
                    });
                }
                (None, ParseMode::Truncate) => {
                    warn!(
                        "stopped reading at malformed line {} ({} edges kept)",
                        index + 1,
                        edges.len()
                    );
                    break;
                }
            }
        }

        Ok(Self::new(edges))
    }

    /// Memory-maps the file at `path` and parses it.
    pub fn from_path(path: impl AsRef<Path>, mode: ParseMode) -> Result<Self, GraphError> {
        let path = path.as_ref();
        info!("Reading edgelist from file {}", path.display());

        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Self::new(Vec::new()));
        }

        // SAFETY: the map is read-only and does not outlive this function.
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        let edges = Self::parse(mmap.as_ref(), mode)?;

        debug!(
            "parsed {} edges over {} nodes",
            edges.edge_count(),
            edges.node_count()
        );
        Ok(edges)
    }

    /// One past the largest node id, or 0 for an empty list.
    pub fn node_count(&self) -> usize {
        self.max_node_id.map_or(0, |id| id as usize + 1)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn max_node_id(&self) -> Option<NodeId> {
        self.max_node_id
    }

    pub fn edges(&self) -> Copied<Iter<'_, (NodeId, NodeId)>> {
        self.edges.iter().copied()
    }

    /// Degree of every node, counting both endpoints of each edge.
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.node_count()];

        self.edges.iter().for_each(|&(s, t)| {
            degrees[s as usize] += 1;
            degrees[t as usize] += 1;
        });

        degrees
    }

    /// Rewrites every endpoint through `f`, which must permute
    /// `0..node_count()`. The node range is kept, so nodes without edges
    /// survive the relabeling.
    pub fn permute_nodes<F>(&mut self, f: F)
    where
        F: Fn(NodeId) -> NodeId,
    {
        self.edges.iter_mut().for_each(|(s, t)| {
            *s = f(*s);
            *t = f(*t);
        });
        debug_assert!(
            self.edges
                .iter()
                .all(|&(s, t)| (max(s, t) as usize) < self.node_count())
        );
    }

    /// Drops every edge with an endpoint whose degree is at least `max_degree`.
    pub fn without_hubs(&self, max_degree: usize) -> EdgeList {
        let degrees = self.degrees();
        let edges: Vec<_> = self
            .edges()
            .filter(|&(s, t)| degrees[s as usize] < max_degree && degrees[t as usize] < max_degree)
            .collect();

        debug!(
            "hub filter (max_degree = {}) removed {} of {} edges",
            max_degree,
            self.edge_count() - edges.len(),
            self.edge_count()
        );

        EdgeList {
            edges: edges.into_boxed_slice(),
            // Keep the node range so isolated hubs still count as nodes.
            max_node_id: self.max_node_id,
        }
    }

    /// Writes the edges as `s t` lines.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for (s, t) in self.edges() {
            writeln!(writer, "{} {}", s, t)?;
        }
        writer.flush()
    }
}

impl TryFrom<&str> for EdgeList {
    type Error = GraphError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        EdgeList::parse(value.as_bytes(), ParseMode::Strict)
    }
}

fn parse_node(token: &[u8]) -> Option<NodeId> {
    std::str::from_utf8(token).ok()?.parse().ok()
}
