use crate::document::Document;
use crate::metrics::diversity::{balance_bonus, diversity_bonus};
use crate::strategy::SelectionStrategy;
use crate::types::SelectionCandidate;

use super::{characters, total_score};

/// Result of one local-search pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapOutcome {
    pub selection: Vec<usize>,
    pub old_score: f64,
    pub new_score: f64,
    /// `(new - old) / max(old, 1)`; zero when no swap was made.
    pub improvement: f64,
    /// `(position in selection, candidate swapped in)`.
    pub swap: Option<(usize, usize)>,
}

/// Sum of candidate scores plus the weighted diversity and balance bonuses.
pub fn objective(
    selection: &[usize],
    candidates: &[SelectionCandidate<'_>],
    strategy: &SelectionStrategy,
) -> f64 {
    let documents: Vec<&Document> = selection.iter().map(|&i| candidates[i].document).collect();
    total_score(selection, candidates)
        + diversity_bonus(&documents) * strategy.criteria.diversity_weight
        + balance_bonus(&documents) * strategy.balance_requirement()
}

/// Evaluate every (selected position, unselected candidate) swap that keeps
/// the selection within budget and commit the single best strict improvement.
/// A swap may not trade a candidate for a lower-scoring one, so the summed
/// candidate score never decreases even when the bonuses would reward it.
///
/// Positions are visited in selection order and unselected candidates by
/// ascending document id; the first of several equally good swaps wins.
pub fn improve_once(
    selection: &[usize],
    candidates: &[SelectionCandidate<'_>],
    budget: usize,
    strategy: &SelectionStrategy,
) -> SwapOutcome {
    let old_score = objective(selection, candidates, strategy);
    let used = characters(selection, candidates);

    let mut unselected: Vec<usize> = (0..candidates.len())
        .filter(|i| !selection.contains(i))
        .collect();
    unselected.sort_by(|&a, &b| candidates[a].id().cmp(candidates[b].id()).then(a.cmp(&b)));

    let mut best: Option<(usize, usize, f64)> = None;
    let mut trial = selection.to_vec();

    for (pos, &out) in selection.iter().enumerate() {
        let freed = used - candidates[out].estimated_characters;
        for &incoming in &unselected {
            if freed + candidates[incoming].estimated_characters > budget
                || candidates[incoming].score < candidates[out].score
            {
                continue;
            }
            trial[pos] = incoming;
            let score = objective(&trial, candidates, strategy);
            let threshold = best.map_or(old_score, |(_, _, s)| s);
            if score > threshold {
                best = Some((pos, incoming, score));
            }
        }
        trial[pos] = out;
    }

    match best {
        Some((pos, incoming, new_score)) => {
            trial[pos] = incoming;
            SwapOutcome {
                selection: trial,
                old_score,
                new_score,
                improvement: (new_score - old_score) / old_score.max(1.0),
                swap: Some((pos, incoming)),
            }
        }
        None => SwapOutcome {
            selection: trial,
            old_score,
            new_score: old_score,
            improvement: 0.0,
            swap: None,
        },
    }
}
