//! Genetic algorithm for low-cost covering walks.
//!
//! A genome is a sequence of edges forming a walk that touches every node of
//! a [`Graph`](crate::graph::Graph). The engine breeds a population of such
//! walks toward lower total weight.
//!
//! # Core Traits
//!
//! - [`WalkOperators`]: the pluggable steps (initialization, fitness,
//!   selection, crossover, mutation), all with working defaults
//! - [`GraphSupplier`]: where the graph comes from
//! - [`GenerationObserver`]: receives each generation's best walk
//!
//! # Key Types
//!
//! - [`Genome`]: candidate walk
//! - [`EvolutionConfig`]: run parameters
//! - [`EvolutionRunner`]: executes the generational loop
//! - [`EvolutionResult`]: final best walk and fitness history
//!
//! # Submodules
//!
//! - [`repair`]: random-walk completion of partial genomes
//! - [`population`]: initial population
//! - [`fitness`]: validity and inverse-weight scoring
//! - [`selection`]: fitness-proportionate parent selection
//! - [`operators`]: aligned single-point crossover and truncate-and-regrow
//!   mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod fitness;
mod observer;
pub mod operators;
pub mod population;
pub mod repair;
mod runner;
pub mod selection;
mod types;

pub use config::EvolutionConfig;
pub use observer::{
    GenerationObserver, GenerationReport, HistoryObserver, NoopObserver, TracingObserver,
};
pub use runner::{EvolutionResult, EvolutionRunner};
pub use types::{DefaultOperators, Genome, GraphSupplier, Population, WalkDisplay, WalkOperators};
