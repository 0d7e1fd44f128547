//! Packages a finished selection with its coverage and quality metrics.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use crate::algorithms::AlgorithmSelection;
use crate::document::{Category, Document};
use crate::strategy::SelectionStrategy;
use crate::types::{
    CandidateScore, ConflictSummary, CoverageAnalysis, DependencySummary, OptimizationMetrics,
    RunMetadata, ScoringSummary, SelectedDocument, SelectionCandidate, SelectionFingerprint,
    SelectionResult,
};
use super::diversity::{balance_bonus, diversity_bonus};

/// Everything about a run that is not the selection itself.
#[derive(Debug)]
pub struct RunContext<'s> {
    pub strategy: &'s SelectionStrategy,
    pub budget: usize,
    pub documents_considered: usize,
    pub dependencies: DependencySummary,
    pub conflicts: ConflictSummary,
    pub include_reasons: bool,
    pub started: Instant,
}

pub fn analyze(
    candidates: &[SelectionCandidate<'_>],
    selection: AlgorithmSelection,
    run: RunContext<'_>,
) -> SelectionResult {
    let strategy = run.strategy;

    let selected_documents: Vec<SelectedDocument> = selection
        .indices
        .iter()
        .zip(&selection.adjusted_scores)
        .map(|(&i, &adjusted_score)| {
            let c = &candidates[i];
            SelectedDocument {
                id: c.id().clone(),
                category: c.document.category,
                complexity: c.document.tags.complexity,
                estimated_characters: c.estimated_characters,
                score: c.score,
                adjusted_score,
                reasons: c.reasons.clone(),
            }
        })
        .collect();

    let documents: Vec<&Document> = selection.indices.iter().map(|&i| candidates[i].document).collect();

    // 1. Scoring
    let total_score: f64 = selected_documents.iter().map(|d| d.score).sum();
    let average_score = if selected_documents.is_empty() {
        0.0
    } else {
        total_score / selected_documents.len() as f64
    };
    let distribution = candidates
        .iter()
        .map(|c| CandidateScore {
            id: c.id().clone(),
            score: c.score,
            selected: c.selected,
            reasons: if run.include_reasons { c.reasons.clone() } else { Vec::new() },
        })
        .collect();

    // 2. Optimization metrics
    let characters_used: usize = selected_documents.iter().map(|d| d.estimated_characters).sum();
    let space_utilization = if run.budget == 0 {
        0.0
    } else {
        characters_used as f64 / run.budget as f64
    };
    let diversity_score = diversity_bonus(&documents);
    let balance_score = balance_bonus(&documents);
    let weights = &strategy.criteria;
    let optimization = OptimizationMetrics {
        space_utilization,
        quality_score: average_score,
        diversity_score,
        balance_score,
        weighted_objective: average_score * weights.quality_weight
            + diversity_score * weights.diversity_weight
            + space_utilization * weights.space_utilization,
    };

    // 3. Coverage
    let coverage = coverage(&documents, &strategy.constraints.required_categories);
    if !coverage.missing_required_categories.is_empty() {
        warn!(
            strategy = %strategy.name,
            missing = ?coverage.missing_required_categories,
            "selection is missing required categories"
        );
    }

    let fingerprint = SelectionFingerprint::compute(&strategy.name, selected_documents.iter().map(|d| &d.id));

    let metadata = RunMetadata {
        fingerprint,
        budget: run.budget,
        characters_used,
        documents_considered: run.documents_considered,
        candidates: candidates.len(),
        documents_selected: selected_documents.len(),
        algorithms_used: selection.algorithms_used,
        iterations_performed: selection.iterations,
        convergence_achieved: selection.converged,
        partial_failures: selection.failures,
        elapsed_ms: run.started.elapsed().as_millis() as u64,
        completed_at: Utc::now(),
    };

    info!(
        strategy = %strategy.name,
        algorithm = %strategy.algorithm,
        selected = metadata.documents_selected,
        candidates = metadata.candidates,
        characters_used,
        budget = run.budget,
        "selection complete"
    );

    SelectionResult {
        selected_documents,
        strategy: strategy.name.clone(),
        algorithm: strategy.algorithm,
        scoring: ScoringSummary {
            total_score,
            average_score,
            distribution,
        },
        optimization,
        coverage,
        dependencies: run.dependencies,
        conflicts: run.conflicts,
        metadata,
    }
}

pub fn coverage(documents: &[&Document], required: &[Category]) -> CoverageAnalysis {
    let mut analysis = CoverageAnalysis::default();

    for doc in documents {
        *analysis.categories.entry(doc.category).or_insert(0) += 1;
        *analysis.complexity.entry(doc.tags.complexity).or_insert(0) += 1;
        count_all(&mut analysis.tags, &doc.tags.primary);
        count_all(&mut analysis.audiences, &doc.tags.audience);
    }

    analysis.missing_required_categories = required
        .iter()
        .copied()
        .filter(|c| !analysis.categories.contains_key(c))
        .collect();

    analysis
}

fn count_all<'a>(counts: &mut BTreeMap<String, usize>, items: impl IntoIterator<Item = &'a String>) {
    for item in items {
        *counts.entry(item.clone()).or_insert(0) += 1;
    }
}
