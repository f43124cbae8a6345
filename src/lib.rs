//! Genetic-algorithm search for low-cost covering walks.
//!
//! Given a small weighted directed graph, finds a cheap walk that visits
//! every node at least once. The search is heuristic: a population of random
//! covering walks is ranked, bred, and mutated for a fixed number of
//! generations, and the best walk is reported each generation.
//!
//! - **Graph**: validated adjacency structure ([`graph::Graph`]), built once
//!   through [`graph::GraphBuilder`], plus static fixtures.
//! - **GA**: genome repair, population initialization, fitness, roulette
//!   selection, aligned crossover, truncate-and-regrow mutation, and the
//!   elitist generational loop ([`ga::EvolutionRunner`]).
//!
//! All randomness flows through an explicit `rand::Rng`, so seeded runs are
//! reproducible.
//!
//! # Example
//!
//! ```
//! use u_covwalk::ga::{DefaultOperators, EvolutionConfig, EvolutionRunner, NoopObserver};
//! use u_covwalk::graph::fixtures;
//!
//! let config = EvolutionConfig::default()
//!     .with_generation_limit(100)
//!     .with_seed(7);
//! let result =
//!     EvolutionRunner::run(&fixtures::us_cities, &DefaultOperators, &config, &mut NoopObserver)
//!         .unwrap();
//! println!("best weight: {}", result.best_weight);
//! ```

pub mod error;
pub mod ga;
pub mod graph;
pub mod random;

pub use error::CovwalkError;
