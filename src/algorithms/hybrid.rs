use tracing::{debug, warn};

use super::local_search::improve_once;
use super::{greedy, knapsack, topsis, Algorithm, AlgorithmSelection, OptimizerSettings};
use crate::strategy::SelectionStrategy;
use crate::types::{AlgorithmError, AlgorithmFailure, SelectionCandidate, SelectionError};

/// Run knapsack, greedy and multi-criteria selection, keep the one with the
/// highest total score (earliest wins ties), then refine it by local search.
///
/// A failing constituent is recorded and skipped. Only when all three fail
/// does the ensemble fail.
pub fn select(
    candidates: &[SelectionCandidate<'_>],
    budget: usize,
    strategy: &SelectionStrategy,
    settings: &OptimizerSettings,
) -> Result<AlgorithmSelection, SelectionError> {
    let constituents: [(Algorithm, Result<AlgorithmSelection, AlgorithmError>); 3] = [
        (
            Algorithm::Knapsack,
            knapsack::select(candidates, budget, settings.max_knapsack_cells),
        ),
        (Algorithm::Greedy, greedy::select(candidates, budget)),
        (
            Algorithm::MultiCriteria,
            topsis::select(candidates, budget, &strategy.criteria),
        ),
    ];

    let mut best: Option<(Vec<usize>, f64)> = None;
    let mut algorithms_used = Vec::new();
    let mut failures = Vec::new();

    for (algorithm, outcome) in constituents {
        match outcome {
            Ok(selection) => {
                let total = selection.total_score(candidates);
                debug!(%algorithm, total, selected = selection.indices.len(), "constituent finished");
                algorithms_used.push(algorithm);
                if best.as_ref().map_or(true, |(_, best_total)| total > *best_total) {
                    best = Some((selection.indices, total));
                }
            }
            Err(error) => {
                warn!(%algorithm, %error, "constituent algorithm failed, skipping");
                failures.push(AlgorithmFailure {
                    algorithm,
                    message: error.to_string(),
                });
            }
        }
    }

    let Some((mut indices, seed_total)) = best else {
        return Err(SelectionError::EmptySelection { failures });
    };

    let mut iterations = 1;
    let mut converged = false;

    if settings.enable_optimization {
        iterations = 0;
        while iterations < settings.max_iterations {
            let outcome = improve_once(&indices, candidates, budget, strategy);
            iterations += 1;

            let Some((position, incoming)) = outcome.swap else {
                converged = true;
                break;
            };
            debug!(
                iteration = iterations,
                position,
                incoming = %candidates[incoming].id(),
                improvement = outcome.improvement,
                "local search swap"
            );
            indices = outcome.selection;

            if outcome.improvement < settings.convergence_threshold {
                converged = true;
                break;
            }
        }
    }

    debug!(seed_total, iterations, converged, "hybrid selection complete");

    let adjusted_scores = indices.iter().map(|&i| candidates[i].score).collect();
    Ok(AlgorithmSelection {
        indices,
        adjusted_scores,
        iterations,
        converged,
        algorithms_used,
        failures,
    })
}
