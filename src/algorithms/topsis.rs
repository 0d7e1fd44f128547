//! Multi-criteria ranking by relative closeness to the ideal solution
//! (TOPSIS), followed by budget-bounded admission in rank order.

use std::cmp::Ordering;

use tracing::debug;

use super::{admit_in_order, ensure_finite, Algorithm, AlgorithmSelection};
use crate::strategy::CriteriaWeights;
use crate::types::{AlgorithmError, SelectionCandidate};

/// Min-max normalized candidate attributes, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedCriteria {
    pub score: f64,
    pub priority: f64,
    pub category_affinity: f64,
    pub tag_affinity: f64,
}

/// Scale values into `[0, 1]`. When every value is equal each maps to 0.5.
pub fn min_max(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    values
        .iter()
        .map(|&v| if range > 0.0 { (v - min) / range } else { 0.5 })
        .collect()
}

pub fn normalize(candidates: &[SelectionCandidate<'_>]) -> Vec<NormalizedCriteria> {
    let score = normalized_column(candidates, |c| c.score);
    let priority = normalized_column(candidates, |c| c.priority);
    let category_affinity = normalized_column(candidates, |c| c.category_affinity);
    let tag_affinity = normalized_column(candidates, |c| c.tag_affinity);

    (0..candidates.len())
        .map(|i| NormalizedCriteria {
            score: score[i],
            priority: priority[i],
            category_affinity: category_affinity[i],
            tag_affinity: tag_affinity[i],
        })
        .collect()
}

fn normalized_column<F>(candidates: &[SelectionCandidate<'_>], field: F) -> Vec<f64>
where
    F: Fn(&SelectionCandidate<'_>) -> f64,
{
    min_max(&candidates.iter().map(field).collect::<Vec<_>>())
}

/// Relative closeness of every candidate to the ideal, in `[0, 1]`.
///
/// Columns are normalized priority, diversity bonus, dependency bonus and
/// normalized score, weighted by the priority, diversity, dependency and
/// quality weights respectively.
pub fn closeness(candidates: &[SelectionCandidate<'_>], weights: &CriteriaWeights) -> Vec<f64> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let normalized = normalize(candidates);
    let column_weights = [
        weights.priority_weight,
        weights.diversity_weight,
        weights.dependency_weight,
        weights.quality_weight,
    ];

    let matrix: Vec<[f64; 4]> = candidates
        .iter()
        .zip(&normalized)
        .map(|(c, norm)| {
            let row = [norm.priority, c.diversity_bonus, c.dependency_bonus, norm.score];
            let mut weighted = [0.0; 4];
            for j in 0..4 {
                weighted[j] = row[j] * column_weights[j];
            }
            weighted
        })
        .collect();

    let mut ideal = [f64::NEG_INFINITY; 4];
    let mut negative_ideal = [f64::INFINITY; 4];
    for row in &matrix {
        for j in 0..4 {
            ideal[j] = ideal[j].max(row[j]);
            negative_ideal[j] = negative_ideal[j].min(row[j]);
        }
    }

    matrix
        .iter()
        .map(|row| {
            let d_plus = distance(row, &ideal);
            let d_minus = distance(row, &negative_ideal);
            let total = d_plus + d_minus;
            if total > 0.0 {
                (d_minus / total).clamp(0.0, 1.0)
            } else {
                // ideal and negative-ideal coincide
                0.5
            }
        })
        .collect()
}

fn distance(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

pub fn select(
    candidates: &[SelectionCandidate<'_>],
    budget: usize,
    weights: &CriteriaWeights,
) -> Result<AlgorithmSelection, AlgorithmError> {
    ensure_finite(candidates)?;

    let scores = closeness(candidates, weights);
    let normalized = normalize(candidates);
    let affinity = |i: usize| normalized[i].category_affinity + normalized[i].tag_affinity;

    // Rank by closeness, then by combined affinity; stable for full ties
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| match scores[b].total_cmp(&scores[a]) {
        Ordering::Equal => affinity(b).total_cmp(&affinity(a)),
        other => other,
    });

    let indices = admit_in_order(candidates, order, budget);
    debug!(selected = indices.len(), budget, "multi-criteria selection complete");

    Ok(AlgorithmSelection::single(Algorithm::MultiCriteria, indices, candidates, true))
}
