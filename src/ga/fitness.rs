//! Fitness scoring for covering walks.
//!
//! Fitness is `FITNESS_SCALE / total_weight` for a valid genome and `0` for
//! an invalid one, so cheaper covering walks score strictly higher.

use super::types::Genome;
use crate::graph::Graph;

/// Numerator of the inverse-weight fitness.
pub const FITNESS_SCALE: f64 = 100.0;

/// Weight floor used when a valid genome consists only of zero-weight edges.
pub const MIN_TOTAL_WEIGHT: f64 = 1e-9;

/// Returns `true` if the nodes touched by `genome` are exactly the nodes of
/// `graph`.
///
/// An edge with an endpoint outside the graph makes the genome invalid.
pub fn is_valid(genome: &Genome, graph: &Graph) -> bool {
    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut count = 0usize;
    for edge in genome.edges() {
        for id in [edge.source, edge.destination] {
            match visited.get_mut(id.0) {
                Some(slot) if !*slot => {
                    *slot = true;
                    count += 1;
                }
                Some(_) => {}
                None => return false,
            }
        }
    }
    count == n
}

/// Sum of edge weights, repeats included.
pub fn total_weight(genome: &Genome) -> f64 {
    genome.total_weight()
}

/// Scores a genome: `0.0` if invalid, otherwise
/// `FITNESS_SCALE / total_weight`.
///
/// Never negative and never infinite.
///
/// ```
/// use u_covwalk::ga::{fitness, Genome};
/// use u_covwalk::graph::fixtures;
///
/// let graph = fixtures::quad().unwrap();
/// let walk = Genome::from(vec![
///     graph.edge("A", "B").unwrap(),
///     graph.edge("B", "C").unwrap(),
///     graph.edge("C", "D").unwrap(),
/// ]);
/// assert!((fitness::fitness(&walk, &graph) - 100.0 / 7.0).abs() < 1e-12);
/// assert_eq!(fitness::fitness(&Genome::new(), &graph), 0.0);
/// ```
pub fn fitness(genome: &Genome, graph: &Graph) -> f64 {
    if !is_valid(genome, graph) {
        return 0.0;
    }
    FITNESS_SCALE / genome.total_weight().max(MIN_TOTAL_WEIGHT)
}
