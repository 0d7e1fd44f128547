//! 0/1 knapsack over fixed-point scaled costs and scores.
//!
//! Costs and the budget are divided by [`WEIGHT_SCALE`] (floored) to bound
//! the table, and scores are multiplied by [`VALUE_SCALE`] (rounded). The DP
//! is exact for the scaled problem. A candidate costing fewer than
//! `WEIGHT_SCALE` characters has zero scaled weight.

use tracing::{debug, warn};

use super::{characters, ensure_finite, Algorithm, AlgorithmSelection};
use crate::types::{AlgorithmError, SelectionCandidate};

pub const WEIGHT_SCALE: usize = 10;
pub const VALUE_SCALE: f64 = 1000.0;

pub fn scaled_weight(estimated_characters: usize) -> usize {
    estimated_characters / WEIGHT_SCALE
}

pub fn scaled_value(score: f64) -> u64 {
    (score * VALUE_SCALE).round().max(0.0) as u64
}

pub fn select(
    candidates: &[SelectionCandidate<'_>],
    budget: usize,
    max_cells: usize,
) -> Result<AlgorithmSelection, AlgorithmError> {
    ensure_finite(candidates)?;

    let n = candidates.len();
    let capacity = scaled_weight(budget);
    let cells = (n + 1).saturating_mul(capacity + 1);
    if cells > max_cells {
        return Err(AlgorithmError::TableTooLarge {
            cells,
            limit: max_cells,
        });
    }
    debug!(candidates = n, capacity, cells, "building knapsack table");

    let weights: Vec<usize> = candidates
        .iter()
        .map(|c| scaled_weight(c.estimated_characters))
        .collect();
    let values: Vec<u64> = candidates.iter().map(|c| scaled_value(c.score)).collect();
    // every table entry is bounded by the sum of all values
    values
        .iter()
        .zip(candidates)
        .try_fold(0u64, |sum, (&value, c)| {
            sum.checked_add(value)
                .ok_or_else(|| AlgorithmError::ValueOverflow { id: c.id().clone() })
        })?;

    // dp rows are rolled; the inclusion flags keep the full (n+1) x (W+1) shape
    let width = capacity + 1;
    let mut keep = vec![false; cells];
    let mut prev = vec![0u64; width];
    let mut curr = vec![0u64; width];

    for i in 1..=n {
        let weight = weights[i - 1];
        let value = values[i - 1];
        for w in 0..width {
            curr[w] = prev[w];
            if weight <= w {
                let with_item = prev[w - weight] + value;
                if with_item > curr[w] {
                    curr[w] = with_item;
                    keep[i * width + w] = true;
                }
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    // Backtrack from (n, W)
    let mut selected = Vec::new();
    let mut w = capacity;
    for i in (1..=n).rev() {
        if keep[i * width + w] {
            selected.push(i - 1);
            w -= weights[i - 1];
        }
    }
    selected.reverse();

    repair_budget(&mut selected, candidates, budget);

    Ok(AlgorithmSelection::single(Algorithm::Knapsack, selected, candidates, true))
}

/// Floor scaling can let the scaled optimum overshoot the real budget.
/// Evict the least score-per-character items until it fits again.
fn repair_budget(selected: &mut Vec<usize>, candidates: &[SelectionCandidate<'_>], budget: usize) {
    let mut used = characters(selected, candidates);
    if used <= budget {
        return;
    }

    let overshoot = used - budget;
    let mut evicted = 0;
    while used > budget {
        let Some((pos, _)) = selected
            .iter()
            .enumerate()
            .min_by(|x, y| {
                let (a, b) = (*x.1, *y.1);
                candidates[a]
                    .efficiency()
                    .total_cmp(&candidates[b].efficiency())
                    .then(b.cmp(&a))
            })
        else {
            break;
        };
        let idx = selected.remove(pos);
        used -= candidates[idx].estimated_characters;
        evicted += 1;
    }

    warn!(overshoot, evicted, budget, "knapsack selection exceeded budget after scaling");
}
