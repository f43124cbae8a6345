//! Per-generation reporting.
//!
//! The runner hands a [`GenerationReport`] to a [`GenerationObserver`] once
//! per generation. Closures taking `&GenerationReport` are observers too.

use super::types::Genome;
use crate::graph::Graph;

/// Snapshot of one generation's best genome.
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport<'a> {
    /// 1-based generation number.
    pub generation: usize,
    /// Highest-fitness genome of the generation.
    pub best: &'a Genome,
    /// Total edge weight of `best`.
    pub total_weight: f64,
    /// Fitness of `best`.
    pub fitness: f64,
    /// The graph being searched, for rendering labels.
    pub graph: &'a Graph,
}

/// Receives the best genome of every generation.
pub trait GenerationObserver {
    /// Called once per generation, after the population is replaced.
    fn observe(&mut self, report: &GenerationReport<'_>);
}

impl<F> GenerationObserver for F
where
    F: FnMut(&GenerationReport<'_>),
{
    fn observe(&mut self, report: &GenerationReport<'_>) {
        self(report)
    }
}

/// Ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {
    fn observe(&mut self, _report: &GenerationReport<'_>) {}
}

/// Logs each generation's best walk at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GenerationObserver for TracingObserver {
    fn observe(&mut self, report: &GenerationReport<'_>) {
        tracing::info!(
            generation = report.generation,
            weight = report.total_weight,
            walk = %report.best.display(report.graph),
            "best walk"
        );
    }
}

/// Records the best total weight of every generation.
#[derive(Debug, Clone, Default)]
pub struct HistoryObserver {
    /// `weights[i]` is the best weight of generation `i + 1`.
    pub weights: Vec<f64>,
}

impl GenerationObserver for HistoryObserver {
    fn observe(&mut self, report: &GenerationReport<'_>) {
        self.weights.push(report.total_weight);
    }
}
