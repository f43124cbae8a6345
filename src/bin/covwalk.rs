//! covwalk: run the covering-walk GA on a built-in graph and print the best
//! walk found.

use clap::{Parser, ValueEnum};
use std::process::ExitCode;
use u_covwalk::ga::{DefaultOperators, EvolutionConfig, EvolutionRunner, TracingObserver};
use u_covwalk::graph::{fixtures, Graph};
use u_covwalk::CovwalkError;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GraphChoice {
    /// Four nodes A..D
    Quad,
    /// Nine US cities
    Cities,
}

#[derive(Parser)]
#[command(name = "covwalk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Built-in graph to search
    #[arg(short, long, value_enum, default_value_t = GraphChoice::Cities)]
    graph: GraphChoice,

    /// Genomes per generation (even, at least 4)
    #[arg(short, long, default_value_t = 20)]
    population: usize,

    /// Number of generations
    #[arg(short = 'n', long, default_value_t = 1500)]
    generations: usize,

    /// Offspring mutation probability
    #[arg(short, long, default_value_t = 0.35)]
    mutation: f64,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Score each generation in parallel
    #[arg(long)]
    parallel: bool,
}

fn supply(choice: GraphChoice) -> Result<Graph, CovwalkError> {
    match choice {
        GraphChoice::Quad => fixtures::quad(),
        GraphChoice::Cities => fixtures::us_cities(),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = EvolutionConfig::default()
        .with_population_size(cli.population)
        .with_generation_limit(cli.generations)
        .with_mutation_probability(cli.mutation)
        .with_parallel(cli.parallel);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let result = supply(cli.graph).and_then(|graph| {
        EvolutionRunner::run_on_graph(&graph, &DefaultOperators, &config, &mut TracingObserver)
            .map(|result| (graph, result))
    });

    match result {
        Ok((graph, result)) => {
            println!("{} {}", result.best_weight, result.best.display(&graph));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
