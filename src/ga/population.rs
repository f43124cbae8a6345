//! Population initialization.

use super::repair::complete;
use super::types::{Genome, Population};
use crate::error::CovwalkError;
use crate::graph::Graph;
use rand::Rng;

/// Produces `size` independent random covering walks, each grown from an
/// empty prefix by [`complete`].
///
/// Duplicates are allowed.
///
/// # Errors
/// Propagates the first repair failure.
pub fn initialize_population<R: Rng>(
    size: usize,
    graph: &Graph,
    rng: &mut R,
) -> Result<Population, CovwalkError> {
    (0..size)
        .map(|_| complete(Genome::new(), graph, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::fitness::is_valid;
    use crate::graph::{fixtures, GraphBuilder};
    use crate::random::create_rng;

    #[test]
    fn test_population_size_and_validity() {
        let graph = fixtures::us_cities().unwrap();
        let mut rng = create_rng(42);
        let pop = initialize_population(20, &graph, &mut rng).unwrap();
        assert_eq!(pop.len(), 20);
        assert!(pop.iter().all(|g| is_valid(g, &graph) && g.is_chained()));
    }

    #[test]
    fn test_zero_size() {
        let graph = fixtures::quad().unwrap();
        let mut rng = create_rng(42);
        assert!(initialize_population(0, &graph, &mut rng)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_walks_differ() {
        let graph = fixtures::us_cities().unwrap();
        let mut rng = create_rng(5);
        let pop = initialize_population(20, &graph, &mut rng).unwrap();
        assert!(pop.iter().any(|g| g != &pop[0]));
    }

    #[test]
    fn test_dead_end_propagates() {
        let graph = GraphBuilder::new()
            .nodes(["A", "B", "C"])
            .edge("A", "B", 1.0)
            .edge("C", "A", 1.0)
            .build()
            .unwrap();
        let mut rng = create_rng(42);
        let err = initialize_population(4, &graph, &mut rng).unwrap_err();
        assert!(matches!(err, CovwalkError::DeadEnd { .. }));
    }
}
