//! Generational loop execution.
//!
//! [`EvolutionRunner`] orchestrates the complete evolutionary process:
//! initialization → ranking → elitism → selection → crossover → mutation →
//! report → repeat, for a fixed number of generations.

use super::config::EvolutionConfig;
use super::observer::{GenerationObserver, GenerationReport};
use super::types::{Genome, GraphSupplier, Population, WalkOperators};
use crate::error::CovwalkError;
use crate::graph::Graph;
use crate::random::rng_from_seed;
use rand::Rng;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// Result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Highest-fitness genome of the final generation.
    pub best: Genome,

    /// Total edge weight of `best`.
    pub best_weight: f64,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations executed (always the configured limit).
    pub generations: usize,

    /// Best fitness at the end of each generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the covering-walk GA.
///
/// # Usage
///
/// ```
/// use u_covwalk::ga::{DefaultOperators, EvolutionConfig, EvolutionRunner, NoopObserver};
/// use u_covwalk::graph::fixtures;
///
/// let config = EvolutionConfig::default()
///     .with_generation_limit(50)
///     .with_seed(42);
/// let result =
///     EvolutionRunner::run(&fixtures::quad, &DefaultOperators, &config, &mut NoopObserver)
///         .unwrap();
/// assert!(result.best_weight >= 7.0);
/// ```
pub struct EvolutionRunner;

impl EvolutionRunner {
    /// Runs the GA on the graph produced by `supplier`.
    ///
    /// Randomness comes from `config.seed`, or OS entropy when unset.
    ///
    /// # Errors
    /// Configuration errors, supplier errors, and any operator error
    /// (for example [`CovwalkError::DeadEnd`]) end the run.
    pub fn run<S, O, B>(
        supplier: &S,
        operators: &O,
        config: &EvolutionConfig,
        observer: &mut B,
    ) -> Result<EvolutionResult, CovwalkError>
    where
        S: GraphSupplier + ?Sized,
        O: WalkOperators,
        B: GenerationObserver,
    {
        config.validate()?;
        let graph = supplier.supply()?;
        let mut rng = rng_from_seed(config.seed);
        evolve(&graph, operators, config, observer, &mut rng)
    }

    /// Runs the GA on an existing graph.
    pub fn run_on_graph<O, B>(
        graph: &Graph,
        operators: &O,
        config: &EvolutionConfig,
        observer: &mut B,
    ) -> Result<EvolutionResult, CovwalkError>
    where
        O: WalkOperators,
        B: GenerationObserver,
    {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(graph, operators, config, observer, &mut rng)
    }

    /// Runs the GA drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<O, B, R>(
        graph: &Graph,
        operators: &O,
        config: &EvolutionConfig,
        observer: &mut B,
        rng: &mut R,
    ) -> Result<EvolutionResult, CovwalkError>
    where
        O: WalkOperators,
        B: GenerationObserver,
        R: Rng,
    {
        config.validate()?;
        evolve(graph, operators, config, observer, rng)
    }
}

/// The generational loop over an already validated configuration.
fn evolve<O, B, R>(
    graph: &Graph,
    operators: &O,
    config: &EvolutionConfig,
    observer: &mut B,
    rng: &mut R,
) -> Result<EvolutionResult, CovwalkError>
where
    O: WalkOperators,
    B: GenerationObserver,
    R: Rng,
{
    info!(
        nodes = graph.node_count(),
        population = config.population_size,
        generations = config.generation_limit,
        "starting evolution"
    );

    // 1. Initialize and score population
    let mut population =
        operators.initialize_population(config.population_size, graph, rng)?;
    if population.is_empty() {
        return Err(CovwalkError::EmptyPopulation);
    }
    let mut scores = score_population(operators, &population, graph, config.parallel);

    let mut fitness_history = Vec::with_capacity(config.generation_limit);

    // 2. Generational loop
    for gen in 0..config.generation_limit {
        // Rank by fitness, best first; ties keep their prior order
        let (ranked, ranked_scores) = rank(population, scores);

        // Elite preservation
        let elite_count = config.elite_count.min(ranked.len());
        let mut next_gen: Population = ranked[..elite_count].to_vec();
        let mut next_scores: Vec<f64> = ranked_scores[..elite_count].to_vec();

        // Offspring
        for _ in 0..config.offspring_pairs() {
            let (a, b) = breed(operators, &ranked, &ranked_scores, graph, config, rng)?;
            let a = operators.mutate(a, graph, config.mutation_probability, rng)?;
            let b = operators.mutate(b, graph, config.mutation_probability, rng)?;
            next_gen.push(a);
            next_gen.push(b);
        }

        // Score new individuals (elites keep their scores)
        next_scores.extend(score_population(
            operators,
            &next_gen[elite_count..],
            graph,
            config.parallel,
        ));

        population = next_gen;
        scores = next_scores;

        // Report
        let best_idx = best_index(&scores);
        let best = &population[best_idx];
        let report = GenerationReport {
            generation: gen + 1,
            best,
            total_weight: best.total_weight(),
            fitness: scores[best_idx],
            graph,
        };
        debug!(
            generation = report.generation,
            weight = report.total_weight,
            fitness = report.fitness,
            "generation complete"
        );
        fitness_history.push(report.fitness);
        observer.observe(&report);
    }

    let best_idx = best_index(&scores);
    let best_fitness = scores[best_idx];
    let best = population.swap_remove(best_idx);
    let best_weight = best.total_weight();

    info!(
        weight = best_weight,
        fitness = best_fitness,
        walk = %best.display(graph),
        "evolution finished"
    );

    Ok(EvolutionResult {
        best,
        best_weight,
        best_fitness,
        generations: config.generation_limit,
        fitness_history,
    })
}

/// Selects parents and crosses them, re-selecting when the pair has no
/// aligned cut point.
///
/// Once the re-selection budget is spent, the last parents are returned
/// unchanged as offspring.
fn breed<O, R>(
    operators: &O,
    ranked: &[Genome],
    scores: &[f64],
    graph: &Graph,
    config: &EvolutionConfig,
    rng: &mut R,
) -> Result<(Genome, Genome), CovwalkError>
where
    O: WalkOperators,
    R: Rng,
{
    let mut reselections = 0usize;
    loop {
        let (a, b) = operators.select_pair(ranked, scores, graph, rng)?;
        match operators.crossover(a, b, rng) {
            Ok(children) => return Ok(children),
            Err(CovwalkError::CrossoverAlignment { .. })
                if reselections < config.max_parent_reselections =>
            {
                reselections += 1;
            }
            Err(CovwalkError::CrossoverAlignment { len_a, len_b }) => {
                warn!(
                    len_a,
                    len_b,
                    reselections,
                    "no aligned cut point after re-selection; parents pass through"
                );
                return Ok((a.clone(), b.clone()));
            }
            Err(e) => return Err(e),
        }
    }
}

/// Stable sort of the population by descending score.
fn rank(population: Population, scores: Vec<f64>) -> (Population, Vec<f64>) {
    let mut pairs: Vec<(Genome, f64)> = population.into_iter().zip(scores).collect();
    pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    pairs.into_iter().unzip()
}

/// Index of the highest score; the earliest wins ties.
fn best_index(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate().skip(1) {
        if s > scores[best] {
            best = i;
        }
    }
    best
}

/// Scores every genome of `population`.
#[cfg(feature = "parallel")]
fn score_population<O: WalkOperators>(
    operators: &O,
    population: &[Genome],
    graph: &Graph,
    parallel: bool,
) -> Vec<f64> {
    use rayon::prelude::*;

    if parallel {
        population
            .par_iter()
            .map(|g| operators.fitness(g, graph))
            .collect()
    } else {
        population
            .iter()
            .map(|g| operators.fitness(g, graph))
            .collect()
    }
}

/// Scores every genome of `population`.
#[cfg(not(feature = "parallel"))]
fn score_population<O: WalkOperators>(
    operators: &O,
    population: &[Genome],
    graph: &Graph,
    _parallel: bool,
) -> Vec<f64> {
    population
        .iter()
        .map(|g| operators.fitness(g, graph))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::fitness::is_valid;
    use crate::ga::observer::{HistoryObserver, NoopObserver};
    use crate::ga::types::DefaultOperators;
    use crate::graph::{fixtures, Edge, GraphBuilder, NodeId};
    use crate::random::create_rng;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    fn config(generations: usize, seed: u64) -> EvolutionConfig {
        EvolutionConfig::default()
            .with_generation_limit(generations)
            .with_seed(seed)
    }

    #[test]
    fn test_quad_finds_walk_no_worse_than_naive() {
        // Naive walk A -> B -> C -> D -> C weighs 10; A -> B -> C -> D weighs 7.
        let result = EvolutionRunner::run(
            &fixtures::quad,
            &DefaultOperators,
            &config(200, 42),
            &mut NoopObserver,
        )
        .unwrap();

        let graph = fixtures::quad().unwrap();
        assert!(is_valid(&result.best, &graph));
        assert!(
            result.best_weight <= 10.0,
            "expected weight <= 10, got {} ({})",
            result.best_weight,
            result.best.display(&graph)
        );
        assert!(result.best_weight >= 7.0);
        assert!((result.best_fitness - 100.0 / result.best_weight).abs() < 1e-9);
    }

    #[test]
    fn test_elitism_never_loses_best() {
        let result = EvolutionRunner::run(
            &fixtures::us_cities,
            &DefaultOperators,
            &config(150, 7),
            &mut NoopObserver,
        )
        .unwrap();

        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "best fitness dropped between generations: {} < {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let mut generations = Vec::new();
        let mut observer = |r: &GenerationReport<'_>| {
            assert!((r.total_weight - r.best.total_weight()).abs() < 1e-12);
            generations.push(r.generation);
        };
        let result = EvolutionRunner::run(
            &fixtures::quad,
            &DefaultOperators,
            &config(25, 1),
            &mut observer,
        )
        .unwrap();

        assert_eq!(generations, (1..=25).collect::<Vec<_>>());
        assert_eq!(result.generations, 25);
        assert_eq!(result.fitness_history.len(), 25);
    }

    #[test]
    fn test_history_matches_result() {
        let mut history = HistoryObserver::default();
        let result = EvolutionRunner::run(
            &fixtures::us_cities,
            &DefaultOperators,
            &config(40, 3),
            &mut history,
        )
        .unwrap();
        assert_eq!(history.weights.len(), 40);
        assert!((history.weights[39] - result.best_weight).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = || {
            EvolutionRunner::run(
                &fixtures::us_cities,
                &DefaultOperators,
                &config(60, 11),
                &mut NoopObserver,
            )
            .unwrap()
        };
        let (a, b) = (run(), run());
        assert_eq!(a.best, b.best);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_injected_rng() {
        let graph = fixtures::quad().unwrap();
        let cfg = EvolutionConfig::default().with_generation_limit(30);
        let a = EvolutionRunner::run_with_rng(
            &graph,
            &DefaultOperators,
            &cfg,
            &mut NoopObserver,
            &mut create_rng(5),
        )
        .unwrap();
        let b = EvolutionRunner::run_with_rng(
            &graph,
            &DefaultOperators,
            &cfg,
            &mut NoopObserver,
            &mut create_rng(5),
        )
        .unwrap();
        assert_eq!(a.best, b.best);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_scoring_matches_sequential() {
        let run = |parallel: bool| {
            EvolutionRunner::run(
                &fixtures::us_cities,
                &DefaultOperators,
                &config(50, 21).with_parallel(parallel),
                &mut NoopObserver,
            )
            .unwrap()
        };
        let (seq, par) = (run(false), run(true));
        assert_eq!(seq.best, par.best);
        assert_eq!(seq.fitness_history, par.fitness_history);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = EvolutionRunner::run(
            &fixtures::quad,
            &DefaultOperators,
            &EvolutionConfig::default().with_population_size(5),
            &mut NoopObserver,
        )
        .unwrap_err();
        assert!(matches!(err, CovwalkError::InvalidConfig(_)));
    }

    #[test]
    fn test_invalid_config_rejected_before_supply() {
        let supplied = AtomicUsize::new(0);
        let supplier = || {
            supplied.fetch_add(1, AtomicOrdering::Relaxed);
            fixtures::quad()
        };
        let bad = EvolutionConfig::default().with_elite_count(0);
        let err = EvolutionRunner::run(&supplier, &DefaultOperators, &bad, &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err, CovwalkError::InvalidConfig(_)));
        assert_eq!(supplied.load(AtomicOrdering::Relaxed), 0);

        let graph = fixtures::quad().unwrap();
        let err = EvolutionRunner::run_with_rng(
            &graph,
            &DefaultOperators,
            &bad,
            &mut NoopObserver,
            &mut create_rng(1),
        )
        .unwrap_err();
        assert!(matches!(err, CovwalkError::InvalidConfig(_)));
    }

    #[test]
    fn test_dead_end_surfaces() {
        let graph = GraphBuilder::new()
            .nodes(["A", "B", "C"])
            .edge("A", "B", 1.0)
            .edge("C", "A", 1.0)
            .build()
            .unwrap();
        let err = EvolutionRunner::run(&graph, &DefaultOperators, &config(5, 1), &mut NoopObserver)
            .unwrap_err();
        assert_eq!(err, CovwalkError::DeadEnd { node: "B".into() });
    }

    #[test]
    fn test_supplier_error_surfaces() {
        let supplier = || -> Result<Graph, CovwalkError> {
            Err(CovwalkError::InvalidGraph("unavailable".into()))
        };
        let err = EvolutionRunner::run(&supplier, &DefaultOperators, &config(5, 1), &mut NoopObserver)
            .unwrap_err();
        assert_eq!(err, CovwalkError::InvalidGraph("unavailable".into()));
    }

    // ---- Custom operators ----

    /// Counts mutations and never crosses parents.
    #[derive(Default)]
    struct Unalignable {
        mutations: AtomicUsize,
        crossovers: AtomicUsize,
    }

    impl WalkOperators for Unalignable {
        fn crossover<R: Rng>(
            &self,
            a: &Genome,
            b: &Genome,
            _rng: &mut R,
        ) -> Result<(Genome, Genome), CovwalkError> {
            self.crossovers.fetch_add(1, AtomicOrdering::Relaxed);
            Err(CovwalkError::CrossoverAlignment {
                len_a: a.len(),
                len_b: b.len(),
            })
        }

        fn mutate<R: Rng>(
            &self,
            genome: Genome,
            _graph: &Graph,
            _probability: f64,
            _rng: &mut R,
        ) -> Result<Genome, CovwalkError> {
            self.mutations.fetch_add(1, AtomicOrdering::Relaxed);
            Ok(genome)
        }
    }

    #[test]
    fn test_unalignable_parents_pass_through() {
        let ops = Unalignable::default();
        let cfg = config(10, 4).with_max_parent_reselections(2);
        let result = EvolutionRunner::run(&fixtures::quad, &ops, &cfg, &mut NoopObserver).unwrap();

        // 9 pairs per generation, 3 crossover attempts each
        assert_eq!(ops.crossovers.load(AtomicOrdering::Relaxed), 10 * 9 * 3);
        // every offspring goes through mutation: population size is preserved
        assert_eq!(ops.mutations.load(AtomicOrdering::Relaxed), 10 * 18);
        assert!(is_valid(&result.best, &fixtures::quad().unwrap()));
    }

    /// Default operators with a selector that checks what it is handed.
    #[derive(Default)]
    struct CheckedSelection {
        selections: AtomicUsize,
        population_sizes: std::sync::Mutex<Vec<usize>>,
    }

    impl WalkOperators for CheckedSelection {
        fn select_pair<'p, R: Rng>(
            &self,
            population: &'p [Genome],
            weights: &[f64],
            graph: &Graph,
            rng: &mut R,
        ) -> Result<(&'p Genome, &'p Genome), CovwalkError> {
            self.selections.fetch_add(1, AtomicOrdering::Relaxed);
            self.population_sizes.lock().unwrap().push(population.len());
            for (genome, &w) in population.iter().zip(weights) {
                assert!((self.fitness(genome, graph) - w).abs() < 1e-12);
            }
            crate::ga::selection::select_pair_weighted(population, weights, rng)
        }
    }

    #[test]
    fn test_population_size_is_constant() {
        let ops = CheckedSelection::default();
        let cfg = config(30, 8).with_population_size(12).with_elite_count(4);
        let mut observed = 0usize;
        let mut observer = |_: &GenerationReport<'_>| observed += 1;
        EvolutionRunner::run(&fixtures::us_cities, &ops, &cfg, &mut observer).unwrap();

        // 4 offspring pairs per generation, at least one selection each
        assert!(ops.selections.load(AtomicOrdering::Relaxed) >= 30 * 4);
        let sizes = ops.population_sizes.lock().unwrap();
        assert!(sizes.iter().all(|&n| n == 12), "{sizes:?}");
        assert_eq!(observed, 30);
    }

    /// Seeds the population with copies of one fixed walk.
    struct FixedStart(Genome);

    impl WalkOperators for FixedStart {
        fn initialize_population<R: Rng>(
            &self,
            size: usize,
            _graph: &Graph,
            _rng: &mut R,
        ) -> Result<Population, CovwalkError> {
            Ok(vec![self.0.clone(); size])
        }
    }

    #[test]
    fn test_custom_initializer_is_used() {
        let graph = fixtures::quad().unwrap();
        let optimal = Genome::from(vec![
            graph.edge("A", "B").unwrap(),
            graph.edge("B", "C").unwrap(),
            graph.edge("C", "D").unwrap(),
        ]);
        let result = EvolutionRunner::run(
            &graph,
            &FixedStart(optimal.clone()),
            &config(20, 2),
            &mut NoopObserver,
        )
        .unwrap();
        assert_eq!(result.best, optimal);
        assert!((result.best_weight - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_rank_is_stable_and_descending() {
        let g = |w: f64| Genome::from(vec![Edge::new(NodeId(0), NodeId(1), w)]);
        let pop = vec![g(1.0), g(2.0), g(3.0), g(4.0)];
        let (ranked, scores) = rank(pop, vec![1.0, 5.0, 1.0, 5.0]);
        assert_eq!(scores, vec![5.0, 5.0, 1.0, 1.0]);
        let weights: Vec<f64> = ranked.iter().map(Genome::total_weight).collect();
        assert_eq!(weights, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn test_best_index_prefers_earliest() {
        assert_eq!(best_index(&[1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(best_index(&[0.0]), 0);
    }
}
