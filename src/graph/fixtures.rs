//! Static graphs used as default graph suppliers, in tests, and in benchmarks.
//!
//! Every function here has the shape `fn() -> Result<Graph, CovwalkError>`,
//! so it can be handed directly to the runner as a
//! [`GraphSupplier`](crate::ga::GraphSupplier).

use super::{Graph, GraphBuilder};
use crate::error::CovwalkError;

/// Four nodes `A..D`. The cheapest covering walk from `A` is
/// `A -> B -> C -> D` with weight 7.
pub fn quad() -> Result<Graph, CovwalkError> {
    GraphBuilder::new()
        .nodes(["A", "B", "C", "D"])
        .edge("A", "B", 2.0)
        .edge("A", "C", 9.0)
        .edge("B", "A", 2.0)
        .edge("B", "C", 2.0)
        .edge("B", "D", 6.0)
        .edge("C", "A", 9.0)
        .edge("C", "B", 2.0)
        .edge("C", "D", 3.0)
        .edge("D", "C", 3.0)
        .edge("D", "B", 6.0)
        .build()
}

/// Nine cities with three leaf destinations (`IC`, `SW`, `AUS`) that can
/// only be left the way they were entered.
pub fn us_cities() -> Result<Graph, CovwalkError> {
    GraphBuilder::new()
        .nodes(["SAC", "SF", "LA", "TX", "NY", "FL", "IC", "SW", "AUS"])
        .edge("SAC", "SF", 2.0)
        .edge("SAC", "LA", 6.0)
        .edge("SAC", "TX", 5.0)
        .edge("SF", "NY", 8.0)
        .edge("SF", "SAC", 2.0)
        .edge("SF", "TX", 6.0)
        .edge("LA", "SAC", 6.0)
        .edge("LA", "NY", 5.0)
        .edge("LA", "TX", 3.0)
        .edge("TX", "LA", 3.0)
        .edge("TX", "FL", 4.0)
        .edge("TX", "SAC", 5.0)
        .edge("TX", "SF", 6.0)
        .edge("TX", "NY", 4.0)
        .edge("NY", "SF", 8.0)
        .edge("NY", "TX", 4.0)
        .edge("NY", "FL", 3.0)
        .edge("NY", "IC", 5.0)
        .edge("NY", "SW", 7.0)
        .edge("FL", "TX", 4.0)
        .edge("FL", "NY", 3.0)
        .edge("FL", "AUS", 14.0)
        .edge("IC", "NY", 5.0)
        .edge("SW", "NY", 7.0)
        .edge("AUS", "FL", 14.0)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_strongly_connected() {
        for graph in [quad().unwrap(), us_cities().unwrap()] {
            assert!(graph.is_strongly_connected());
            assert!(graph.dead_ends().is_empty());
        }
    }

    #[test]
    fn test_fixture_sizes() {
        let q = quad().unwrap();
        assert_eq!(q.node_count(), 4);
        assert_eq!(q.edges().count(), 10);

        let c = us_cities().unwrap();
        assert_eq!(c.node_count(), 9);
        assert_eq!(c.edges().count(), 25);
        assert_eq!(c.label(c.start_node()), "SAC");
    }
}
