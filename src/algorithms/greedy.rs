use tracing::debug;

use super::{ensure_finite, Algorithm, AlgorithmSelection};
use crate::document::{tag_overlap, Document};
use crate::types::{AlgorithmError, SelectionCandidate};

/// Penalty per unit of similarity, multiplied by the number admitted so far.
pub const PENALTY_RATE: f64 = 0.1;

/// Mean of category equality, primary-tag overlap and audience overlap.
pub fn similarity(a: &Document, b: &Document) -> f64 {
    let category = if a.category == b.category { 1.0 } else { 0.0 };
    let tags = tag_overlap(&a.tags.primary, &b.tags.primary);
    let audience = tag_overlap(&a.tags.audience, &b.tags.audience);
    (category + tags + audience) / 3.0
}

/// Returns a new snapshot of working scores in which every candidate not yet
/// admitted is penalized for resembling the one just admitted. Scores never
/// increase and never drop below zero.
pub fn apply_diversity_penalty(
    working: &[f64],
    candidates: &[SelectionCandidate<'_>],
    admitted: &[bool],
    just_admitted: usize,
    admitted_count: usize,
) -> Vec<f64> {
    let reference = candidates[just_admitted].document;
    let scale = PENALTY_RATE * admitted_count as f64;

    working
        .iter()
        .enumerate()
        .map(|(i, &score)| {
            if admitted[i] {
                return score;
            }
            let penalty = similarity(reference, candidates[i].document) * scale;
            (score - penalty).max(0.0).min(score)
        })
        .collect()
}

/// Admit candidates by descending score-per-character while they fit.
pub fn select(
    candidates: &[SelectionCandidate<'_>],
    budget: usize,
) -> Result<AlgorithmSelection, AlgorithmError> {
    ensure_finite(candidates)?;

    let mut order: Vec<usize> = (0..candidates.len()).collect();
    // sort_by is stable, ties keep input order
    order.sort_by(|&a, &b| candidates[b].efficiency().total_cmp(&candidates[a].efficiency()));

    let mut working: Vec<f64> = candidates.iter().map(|c| c.score).collect();
    let mut admitted = vec![false; candidates.len()];
    let mut indices = Vec::new();
    let mut adjusted_scores = Vec::new();
    let mut used = 0;

    for idx in order {
        let cost = candidates[idx].estimated_characters;
        if used + cost > budget {
            continue;
        }

        used += cost;
        admitted[idx] = true;
        indices.push(idx);
        adjusted_scores.push(working[idx]);

        working = apply_diversity_penalty(&working, candidates, &admitted, idx, indices.len());
    }

    debug!(selected = indices.len(), used, budget, "greedy selection complete");

    Ok(AlgorithmSelection {
        indices,
        adjusted_scores,
        iterations: 1,
        converged: true,
        algorithms_used: vec![Algorithm::Greedy],
        failures: Vec::new(),
    })
}
