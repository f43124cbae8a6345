//! Error taxonomy for graph construction, walk repair, and the evolution loop.

/// Errors produced by `u-covwalk`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CovwalkError {
    /// The walk reached a node with no outgoing edges before every node
    /// was visited.
    #[error("walk reached dead end at node `{node}` before covering the graph")]
    DeadEnd {
        /// Label of the node with out-degree 0.
        node: String,
    },

    /// The walk reached a node from which some unvisited node can never be
    /// reached, and no dead end is reachable either.
    #[error("walk stranded at node `{node}`: node `{unreachable}` is unreachable from it")]
    Stranded {
        /// Label of the current position.
        node: String,
        /// Label of an unvisited node that cannot be reached.
        unreachable: String,
    },

    /// A genome edge refers to a node id the graph does not contain.
    #[error("edge endpoint {id} is not a node of the graph")]
    UnknownNode {
        /// The out-of-range node index.
        id: usize,
    },

    /// No index satisfies the source-alignment constraint for a parent pair.
    #[error("no aligned crossover point between parents of length {len_a} and {len_b}")]
    CrossoverAlignment {
        /// Length of the first parent.
        len_a: usize,
        /// Length of the second parent.
        len_b: usize,
    },

    /// Selection was attempted on an empty population.
    #[error("cannot select from empty population")]
    EmptyPopulation,

    /// The graph violates a structural invariant.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// The run configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
