//! Core types and trait definitions for the covering-walk GA.
//!
//! [`Genome`] is the candidate solution. [`WalkOperators`] is the seam
//! through which every evolutionary step can be replaced, and
//! [`GraphSupplier`] decouples the engine from where the graph comes from.

use super::{fitness, operators, population, selection};
use crate::error::CovwalkError;
use crate::graph::{Edge, Graph, NodeId};
use rand::Rng;
use std::fmt;

/// An ordered sequence of edges describing a walk.
///
/// Genomes produced by repair are chained (`dst(i) == src(i + 1)`) and may
/// revisit nodes and edges. A genome is *valid* for a graph when the nodes
/// it touches are exactly the graph's node set; see
/// [`fitness::is_valid`](super::fitness::is_valid).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genome {
    edges: Vec<Edge>,
}

/// A generation's genomes.
pub type Population = Vec<Genome>;

impl Genome {
    /// Creates an empty genome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an edge sequence.
    pub fn from_edges(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    /// The edges in walk order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Consumes the genome and returns its edges.
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the genome has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Appends an edge.
    pub fn push(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Keeps only the first `len` edges.
    pub fn truncate(&mut self, len: usize) {
        self.edges.truncate(len);
    }

    /// Sum of all edge weights, repeats included.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Destination of the last edge, i.e. where the walk currently stands.
    pub fn position(&self) -> Option<NodeId> {
        self.edges.last().map(|e| e.destination)
    }

    /// Returns `true` if every edge starts where the previous one ended.
    pub fn is_chained(&self) -> bool {
        self.edges
            .windows(2)
            .all(|w| w[0].destination == w[1].source)
    }

    /// Renders the walk with node labels, e.g. `A -> B -> C`.
    ///
    /// A break in the chain is shown as ` | `.
    pub fn display<'a>(&'a self, graph: &'a Graph) -> WalkDisplay<'a> {
        WalkDisplay {
            genome: self,
            graph,
        }
    }
}

impl From<Vec<Edge>> for Genome {
    fn from(edges: Vec<Edge>) -> Self {
        Self::from_edges(edges)
    }
}

/// Label-based [`Display`](fmt::Display) adapter returned by
/// [`Genome::display`].
pub struct WalkDisplay<'a> {
    genome: &'a Genome,
    graph: &'a Graph,
}

impl WalkDisplay<'_> {
    fn label(&self, id: NodeId) -> String {
        if self.graph.contains(id) {
            self.graph.label(id).to_string()
        } else {
            id.to_string()
        }
    }
}

impl fmt::Display for WalkDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut at: Option<NodeId> = None;
        for edge in self.genome.edges() {
            match at {
                None => write!(f, "{}", self.label(edge.source))?,
                Some(prev) if prev != edge.source => {
                    write!(f, " | {}", self.label(edge.source))?
                }
                Some(_) => {}
            }
            write!(f, " -> {}", self.label(edge.destination))?;
            at = Some(edge.destination);
        }
        Ok(())
    }
}

/// Supplies the graph a run operates on.
///
/// Implemented for [`Graph`] itself (cloned) and for any
/// `Fn() -> Result<Graph, CovwalkError>`, such as the functions in
/// [`graph::fixtures`](crate::graph::fixtures).
pub trait GraphSupplier {
    /// Produces a fully populated graph.
    fn supply(&self) -> Result<Graph, CovwalkError>;
}

impl GraphSupplier for Graph {
    fn supply(&self) -> Result<Graph, CovwalkError> {
        Ok(self.clone())
    }
}

impl<F> GraphSupplier for F
where
    F: Fn() -> Result<Graph, CovwalkError>,
{
    fn supply(&self) -> Result<Graph, CovwalkError> {
        self()
    }
}

/// The pluggable evolutionary steps.
///
/// Every method has a default that delegates to this crate's standard
/// operator, so implementors override only what they want to change.
///
/// # Implementing
///
/// ```ignore
/// struct GreedyInit;
///
/// impl WalkOperators for GreedyInit {
///     fn initialize_population<R: Rng>(
///         &self,
///         size: usize,
///         graph: &Graph,
///         rng: &mut R,
///     ) -> Result<Population, CovwalkError> {
///         // custom seeding; selection, crossover, mutation stay default
///     }
/// }
/// ```
///
/// # Thread Safety
///
/// `WalkOperators` must be `Send + Sync` because the runner may score a
/// generation in parallel using rayon.
pub trait WalkOperators: Send + Sync {
    /// Builds the initial population.
    fn initialize_population<R: Rng>(
        &self,
        size: usize,
        graph: &Graph,
        rng: &mut R,
    ) -> Result<Population, CovwalkError> {
        population::initialize_population(size, graph, rng)
    }

    /// Scores a genome. Higher is better; invalid genomes score 0.
    fn fitness(&self, genome: &Genome, graph: &Graph) -> f64 {
        fitness::fitness(genome, graph)
    }

    /// Draws two parents, with replacement.
    ///
    /// `weights[i]` is the score [`WalkOperators::fitness`] gave
    /// `population[i]` this generation; `graph` is passed so a selector may
    /// rescore instead.
    fn select_pair<'p, R: Rng>(
        &self,
        population: &'p [Genome],
        weights: &[f64],
        _graph: &Graph,
        rng: &mut R,
    ) -> Result<(&'p Genome, &'p Genome), CovwalkError> {
        selection::select_pair_weighted(population, weights, rng)
    }

    /// Recombines two parents into two offspring.
    fn crossover<R: Rng>(
        &self,
        a: &Genome,
        b: &Genome,
        rng: &mut R,
    ) -> Result<(Genome, Genome), CovwalkError> {
        operators::crossover(a, b, rng)
    }

    /// Mutates an offspring with the given probability.
    fn mutate<R: Rng>(
        &self,
        genome: Genome,
        graph: &Graph,
        probability: f64,
        rng: &mut R,
    ) -> Result<Genome, CovwalkError> {
        operators::mutate(genome, graph, probability, rng)
    }
}

/// The standard operator set: random-walk initialization, inverse-weight
/// fitness, roulette selection, aligned single-point crossover, and
/// truncate-and-regrow mutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOperators;

impl WalkOperators for DefaultOperators {}
