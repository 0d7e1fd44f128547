use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithms::Algorithm;
use crate::document::{Category, Complexity};
use crate::types::errors::AlgorithmFailure;
use crate::types::identifiers::{DocumentId, SelectionFingerprint};

/// A selected document returned in the output.
/// Fully self-contained and serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedDocument {
    pub id: DocumentId,
    pub category: Category,
    pub complexity: Complexity,
    pub estimated_characters: usize,

    pub score: f64,
    /// Score after any algorithm-local adjustment (the greedy diversity
    /// penalty). Equal to `score` for every other algorithm.
    pub adjusted_score: f64,

    pub reasons: Vec<String>,
}

/// One entry of the per-candidate score distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub id: DocumentId,
    pub score: f64,
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringSummary {
    pub total_score: f64,
    pub average_score: f64,
    pub distribution: Vec<CandidateScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    pub space_utilization: f64,
    pub quality_score: f64,
    pub diversity_score: f64,
    pub balance_score: f64,
    pub weighted_objective: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoverageAnalysis {
    pub categories: BTreeMap<Category, usize>,
    pub tags: BTreeMap<String, usize>,
    pub audiences: BTreeMap<String, usize>,
    pub complexity: BTreeMap<Complexity, usize>,
    pub missing_required_categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DependencySummary {
    pub included_dependencies: Vec<DocumentId>,
    pub cycles: Vec<Vec<DocumentId>>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConflictSummary {
    pub conflicts_detected: usize,
    pub removed_documents: Vec<DocumentId>,
}

/// Metadata describing how the selection was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub fingerprint: SelectionFingerprint,
    pub budget: usize,
    pub characters_used: usize,
    pub documents_considered: usize,
    pub candidates: usize,
    pub documents_selected: usize,

    pub algorithms_used: Vec<Algorithm>,
    pub iterations_performed: usize,
    pub convergence_achieved: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partial_failures: Vec<AlgorithmFailure>,

    // informational only
    pub elapsed_ms: u64,
    pub completed_at: DateTime<Utc>,
}

/// The final result of a selection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub selected_documents: Vec<SelectedDocument>,
    pub strategy: String,
    pub algorithm: Algorithm,
    pub scoring: ScoringSummary,
    pub optimization: OptimizationMetrics,
    pub coverage: CoverageAnalysis,
    pub dependencies: DependencySummary,
    pub conflicts: ConflictSummary,
    pub metadata: RunMetadata,
}

impl SelectionResult {
    /// True when the hybrid ensemble produced this result after skipping at
    /// least one failed constituent.
    pub fn is_degraded(&self) -> bool {
        !self.metadata.partial_failures.is_empty()
    }

    pub fn selected_ids(&self) -> Vec<&DocumentId> {
        self.selected_documents.iter().map(|d| &d.id).collect()
    }
}
