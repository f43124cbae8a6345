//! Crossover and mutation operators for edge-sequence genomes.
//!
//! # Crossover
//!
//! - [`crossover`]: single-point crossover restricted to *aligned* cut
//!   points, positions where both parents' edges leave the same node. Cutting
//!   there keeps both offspring chained walks.
//! - [`crossover_at`]: the deterministic splice at a given cut point.
//! - [`alignment_points`]: the set of admissible cut points.
//!
//! # Mutation
//!
//! - [`mutate`]: truncate at a random point and regrow the tail with
//!   [`complete`](super::repair::complete). This is the only operator that
//!   introduces edges absent from both parents.

use super::repair::complete;
use super::types::Genome;
use crate::error::CovwalkError;
use crate::graph::Graph;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Indices `k < min(a.len(), b.len())` where `a[k]` and `b[k]` share a source.
///
/// # Complexity
/// O(min(|a|, |b|))
pub fn alignment_points(a: &Genome, b: &Genome) -> Vec<usize> {
    a.edges()
        .iter()
        .zip(b.edges())
        .enumerate()
        .filter(|(_, (x, y))| x.source == y.source)
        .map(|(k, _)| k)
        .collect()
}

/// Swaps the tails of `a` and `b` at index `k`:
/// `(a[..k] + b[k..], b[..k] + a[k..])`.
///
/// Applying it again to the offspring with the same `k` restores the parents.
///
/// # Panics
/// Panics if `k` exceeds the length of either parent.
pub fn crossover_at(a: &Genome, b: &Genome, k: usize) -> (Genome, Genome) {
    let (a, b) = (a.edges(), b.edges());
    let child_a = a[..k].iter().chain(&b[k..]).copied().collect();
    let child_b = b[..k].iter().chain(&a[k..]).copied().collect();
    (Genome::from_edges(child_a), Genome::from_edges(child_b))
}

/// Single-point crossover at a uniformly chosen aligned cut point.
///
/// The cut point is drawn from [`alignment_points`], so the operation is
/// bounded and both offspring stay chained whenever the parents are.
///
/// # Errors
/// [`CovwalkError::CrossoverAlignment`] if no aligned cut point exists,
/// which includes an empty parent.
///
/// # Example
///
/// ```
/// use u_covwalk::ga::operators::crossover;
/// use u_covwalk::ga::Genome;
/// use u_covwalk::graph::fixtures;
/// use u_covwalk::random::create_rng;
///
/// let g = fixtures::quad().unwrap();
/// let walk = |labels: &[&str]| -> Genome {
///     labels.windows(2).map(|w| g.edge(w[0], w[1]).unwrap()).collect::<Vec<_>>().into()
/// };
/// let a = walk(&["A", "B", "C", "D"]);
/// let b = walk(&["A", "B", "D", "C"]);
///
/// let (x, y) = crossover(&a, &b, &mut create_rng(1)).unwrap();
/// assert!(x.is_chained() && y.is_chained());
/// ```
pub fn crossover<R: Rng>(
    a: &Genome,
    b: &Genome,
    rng: &mut R,
) -> Result<(Genome, Genome), CovwalkError> {
    let points = alignment_points(a, b);
    if points.is_empty() {
        return Err(CovwalkError::CrossoverAlignment {
            len_a: a.len(),
            len_b: b.len(),
        });
    }
    let k = points[rng.random_range(0..points.len())];
    Ok(crossover_at(a, b, k))
}

// ============================================================================
// Mutation
// ============================================================================

/// Truncate-and-regrow mutation.
///
/// Mutates only when a uniform draw from `[0, 1)` is at most `probability`;
/// a non-positive probability never draws and never mutates. When mutating,
/// a cut index is chosen uniformly in `[1, len - 1]`, the prefix before it is
/// kept, and the walk is regrown with [`complete`]. Genomes with fewer than
/// two edges have no cut index and are returned unchanged.
///
/// # Errors
/// Propagates repair failures ([`CovwalkError::DeadEnd`],
/// [`CovwalkError::Stranded`], [`CovwalkError::UnknownNode`]).
pub fn mutate<R: Rng>(
    genome: Genome,
    graph: &Graph,
    probability: f64,
    rng: &mut R,
) -> Result<Genome, CovwalkError> {
    if probability <= 0.0 || genome.len() < 2 {
        return Ok(genome);
    }
    if rng.random_range(0.0..1.0) > probability {
        return Ok(genome);
    }

    let cut = rng.random_range(1..genome.len());
    let mut prefix = genome;
    prefix.truncate(cut);
    complete(prefix, graph, rng)
}
