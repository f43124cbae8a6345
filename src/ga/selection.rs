//! Fitness-proportionate (roulette wheel) parent selection.
//!
//! Fitness here is *maximized*: a genome's draw probability is its fitness
//! divided by the population total. When the total is zero (every genome
//! invalid), sampling falls back to uniform.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Genome;
use crate::error::CovwalkError;
use crate::graph::Graph;
use rand::Rng;

/// Draws two parents independently, with replacement, with probability
/// proportional to `fitness_fn(genome, graph)`.
///
/// # Errors
/// [`CovwalkError::EmptyPopulation`] if `population` is empty.
pub fn select_pair<'p, F, R>(
    population: &'p [Genome],
    fitness_fn: F,
    graph: &Graph,
    rng: &mut R,
) -> Result<(&'p Genome, &'p Genome), CovwalkError>
where
    F: Fn(&Genome, &Graph) -> f64,
    R: Rng,
{
    let weights: Vec<f64> = population.iter().map(|g| fitness_fn(g, graph)).collect();
    select_pair_weighted(population, &weights, rng)
}

/// Like [`select_pair`], with fitness values already computed.
///
/// `weights[i]` belongs to `population[i]`; missing entries count as 0.
pub fn select_pair_weighted<'p, R: Rng>(
    population: &'p [Genome],
    weights: &[f64],
    rng: &mut R,
) -> Result<(&'p Genome, &'p Genome), CovwalkError> {
    let first = roulette(population.len(), weights, rng)?;
    let second = roulette(population.len(), weights, rng)?;
    Ok((&population[first], &population[second]))
}

/// Roulette wheel draw over `n` slots.
///
/// Negative, NaN and infinite weights are treated as 0.
///
/// # Complexity
/// O(n) per draw (linear scan)
pub fn roulette<R: Rng>(n: usize, weights: &[f64], rng: &mut R) -> Result<usize, CovwalkError> {
    if n == 0 {
        return Err(CovwalkError::EmptyPopulation);
    }
    if n == 1 {
        return Ok(0);
    }

    let weight = |i: usize| -> f64 {
        match weights.get(i) {
            Some(&w) if w.is_finite() && w > 0.0 => w,
            _ => 0.0,
        }
    };

    let total: f64 = (0..n).map(weight).sum();
    if total <= 0.0 || !total.is_finite() {
        return Ok(rng.random_range(0..n));
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for i in 0..n {
        let w = weight(i);
        if w > 0.0 {
            cumulative += w;
            last_positive = i;
            if cumulative > threshold {
                return Ok(i);
            }
        }
    }

    Ok(last_positive) // floating-point fallback
}
