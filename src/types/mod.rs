pub mod candidate;
pub mod errors;
pub mod identifiers;
pub mod selection_result;

pub use candidate::{ScoreBreakdown, ScoringResult, SelectionCandidate};
pub use errors::{AlgorithmError, AlgorithmFailure, ConfigurationError, SelectionError};
pub use identifiers::{DocumentId, SelectionFingerprint};
pub use selection_result::{
    CandidateScore, ConflictSummary, CoverageAnalysis, DependencySummary, OptimizationMetrics,
    RunMetadata, ScoringSummary, SelectedDocument, SelectionResult,
};
