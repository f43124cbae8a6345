//! Genome repair: extend a partial walk until it covers the graph.
//!
//! [`complete`] is the single source of random walks in the crate. It seeds
//! the initial population (empty prefix) and regrows tails during mutation
//! (truncated prefix).

use super::types::Genome;
use crate::error::CovwalkError;
use crate::graph::{Graph, NodeId};
use rand::Rng;

/// Extends `genome` with uniformly chosen outgoing edges until every node of
/// `graph` has been touched.
///
/// The walk continues from the destination of the last edge, or from
/// [`Graph::start_node`] when the prefix is empty. The prefix is consumed and
/// extended in place.
///
/// # Errors
/// - [`CovwalkError::UnknownNode`] if the prefix mentions a node id outside
///   the graph.
/// - [`CovwalkError::DeadEnd`] if the walk reaches a node with no outgoing
///   edges before full coverage.
/// - [`CovwalkError::Stranded`] if the walk reaches a node from which some
///   unvisited node is unreachable and no dead end is reachable either. While
///   a dead end is still reachable the walk keeps going, so a sink surfaces
///   as [`CovwalkError::DeadEnd`].
///
/// # Complexity
/// O(n) per appended edge, where n is the node count.
pub fn complete<R: Rng>(
    mut genome: Genome,
    graph: &Graph,
    rng: &mut R,
) -> Result<Genome, CovwalkError> {
    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut visited_count = 0usize;

    for edge in genome.edges() {
        visit(&mut visited, &mut visited_count, edge.source)?;
        visit(&mut visited, &mut visited_count, edge.destination)?;
    }

    let mut position = genome.position().unwrap_or_else(|| graph.start_node());

    while visited_count < n {
        let out = graph.outgoing(position);
        if out.is_empty() {
            return Err(CovwalkError::DeadEnd {
                node: graph.label(position).to_string(),
            });
        }
        if let Some(missing) = stranded_on(graph, &visited, position) {
            return Err(CovwalkError::Stranded {
                node: graph.label(position).to_string(),
                unreachable: graph.label(missing).to_string(),
            });
        }

        let edge = out[rng.random_range(0..out.len())];
        visit(&mut visited, &mut visited_count, edge.source)?;
        visit(&mut visited, &mut visited_count, edge.destination)?;
        genome.push(edge);
        position = edge.destination;
    }

    Ok(genome)
}

/// An unvisited node the walk can never reach from `position`, provided no
/// dead end is reachable from there either. Without a reachable dead end the
/// walk would otherwise cycle forever.
fn stranded_on(graph: &Graph, visited: &[bool], position: NodeId) -> Option<NodeId> {
    let missing = graph
        .nodes()
        .find(|&u| !visited[u.0] && !graph.reaches(position, u))?;
    let sink_ahead = graph
        .nodes()
        .any(|u| graph.outgoing(u).is_empty() && graph.reaches(position, u));
    (!sink_ahead).then_some(missing)
}

/// Marks `id` visited, counting it the first time.
fn visit(visited: &mut [bool], count: &mut usize, id: NodeId) -> Result<(), CovwalkError> {
    let slot = visited
        .get_mut(id.0)
        .ok_or(CovwalkError::UnknownNode { id: id.0 })?;
    if !*slot {
        *slot = true;
        *count += 1;
    }
    Ok(())
}
