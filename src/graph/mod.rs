//! Weighted directed graph model.
//!
//! A [`Graph`] is an explicit adjacency structure: a node table in canonical
//! (insertion) order plus one outgoing-edge list per node. It is built once
//! through [`GraphBuilder`], which validates every invariant up front, and is
//! read-only afterwards.
//!
//! # Example
//!
//! ```
//! use u_covwalk::graph::GraphBuilder;
//!
//! let graph = GraphBuilder::new()
//!     .nodes(["A", "B"])
//!     .edge("A", "B", 2.0)
//!     .edge("B", "A", 2.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(graph.node_count(), 2);
//! assert!(graph.is_strongly_connected());
//! ```

pub mod fixtures;

use crate::error::CovwalkError;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Dense index of a node in its [`Graph`].
///
/// Ids are assigned in declaration order, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

impl NodeId {
    /// Returns the raw index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A weighted directed edge. Compared by value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Tail of the edge.
    pub source: NodeId,
    /// Head of the edge.
    pub destination: NodeId,
    /// Non-negative traversal cost.
    pub weight: f64,
}

impl Edge {
    /// Creates an edge.
    pub fn new(source: NodeId, destination: NodeId, weight: f64) -> Self {
        Self {
            source,
            destination,
            weight,
        }
    }
}

/// A validated, read-only weighted directed graph.
#[derive(Debug, Clone)]
pub struct Graph {
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    outgoing: Vec<Vec<Edge>>,
    /// `reach[u][v]` is true when `v` can be reached from `u` (reflexive).
    reach: Vec<Vec<bool>>,
}

impl Graph {
    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Iterates node ids in canonical order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.labels.len()).map(NodeId)
    }

    /// The first node in canonical order; empty walks start here.
    pub fn start_node(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns `true` if `id` names a node of this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.labels.len()
    }

    /// Label of a node.
    ///
    /// # Panics
    /// Panics if `id` is not a node of this graph.
    pub fn label(&self, id: NodeId) -> &str {
        &self.labels[id.0]
    }

    /// Looks up a node by label.
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Outgoing edges of a node, in declaration order.
    ///
    /// Returns an empty slice for unknown ids.
    pub fn outgoing(&self, id: NodeId) -> &[Edge] {
        self.outgoing.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates all edges grouped by source node.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing.iter().flatten()
    }

    /// Looks up the first edge `source -> destination` by label.
    pub fn edge(&self, source: &str, destination: &str) -> Option<Edge> {
        let src = self.node_id(source)?;
        let dst = self.node_id(destination)?;
        self.outgoing(src)
            .iter()
            .find(|e| e.destination == dst)
            .copied()
    }

    /// Nodes with no outgoing edges.
    ///
    /// A covering walk that enters one of these before finishing fails with
    /// [`CovwalkError::DeadEnd`].
    pub fn dead_ends(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|&n| self.outgoing[n.0].is_empty())
            .collect()
    }

    /// Returns `true` if `to` can be reached from `from` (every node reaches
    /// itself).
    pub fn reaches(&self, from: NodeId, to: NodeId) -> bool {
        self.reach
            .get(from.0)
            .and_then(|row| row.get(to.0))
            .copied()
            .unwrap_or(false)
    }

    /// Returns `true` if every node reaches every other node.
    ///
    /// Covering walks on such graphs always terminate.
    pub fn is_strongly_connected(&self) -> bool {
        self.reach.iter().all(|row| row.iter().all(|&r| r))
    }
}

/// Incremental, label-based builder for [`Graph`].
///
/// Nodes must be declared with [`node`](Self::node) or
/// [`nodes`](Self::nodes) before or after the edges that mention them;
/// [`build`](Self::build) rejects edges whose endpoints were never declared.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    labels: Vec<String>,
    edges: Vec<(String, String, f64)>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a node. Declaration order is the canonical node order.
    pub fn node(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Declares several nodes in order.
    pub fn nodes<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Adds a directed edge between two labels.
    pub fn edge(
        mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
        weight: f64,
    ) -> Self {
        self.edges.push((source.into(), destination.into(), weight));
        self
    }

    /// Validates and builds the graph.
    ///
    /// # Errors
    /// [`CovwalkError::InvalidGraph`] if there are fewer than two nodes, a
    /// label is declared twice, an edge endpoint is undeclared, or a weight
    /// is negative or not finite.
    pub fn build(self) -> Result<Graph, CovwalkError> {
        if self.labels.len() < 2 {
            return Err(CovwalkError::InvalidGraph(format!(
                "graph needs at least 2 nodes, got {}",
                self.labels.len()
            )));
        }

        let mut index = HashMap::with_capacity(self.labels.len());
        for (i, label) in self.labels.iter().enumerate() {
            if index.insert(label.clone(), NodeId(i)).is_some() {
                return Err(CovwalkError::InvalidGraph(format!(
                    "node `{label}` declared twice"
                )));
            }
        }

        let mut outgoing = vec![Vec::new(); self.labels.len()];
        for (src, dst, weight) in &self.edges {
            let lookup = |label: &String| {
                index.get(label).copied().ok_or_else(|| {
                    CovwalkError::InvalidGraph(format!(
                        "edge `{src}` -> `{dst}` refers to undeclared node `{label}`"
                    ))
                })
            };
            let source = lookup(src)?;
            let destination = lookup(dst)?;
            if !weight.is_finite() || *weight < 0.0 {
                return Err(CovwalkError::InvalidGraph(format!(
                    "edge `{src}` -> `{dst}` has invalid weight {weight}"
                )));
            }
            outgoing[source.0].push(Edge::new(source, destination, *weight));
        }

        let reach = reachability(&outgoing);

        Ok(Graph {
            labels: self.labels,
            index,
            outgoing,
            reach,
        })
    }
}

/// Breadth-first reachability from every node.
fn reachability(outgoing: &[Vec<Edge>]) -> Vec<Vec<bool>> {
    let n = outgoing.len();
    let mut reach = vec![vec![false; n]; n];
    let mut queue = VecDeque::with_capacity(n);

    for (start, row) in reach.iter_mut().enumerate() {
        row[start] = true;
        queue.push_back(start);
        while let Some(u) = queue.pop_front() {
            for edge in &outgoing[u] {
                let v = edge.destination.0;
                if !row[v] {
                    row[v] = true;
                    queue.push_back(v);
                }
            }
        }
    }

    reach
}
