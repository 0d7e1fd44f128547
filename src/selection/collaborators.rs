//! Seams for the dependency and conflict collaborators that run before
//! candidate construction.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::types::DocumentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DependencyStatistics {
    pub total_documents: usize,
    pub dependencies_added: usize,
    pub cycles_detected: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DependencyResolution {
    pub ordered_documents: Vec<Document>,
    pub included_dependencies: Vec<DocumentId>,
    /// Reported, never fatal.
    pub cycles: Vec<Vec<DocumentId>>,
    pub warnings: Vec<String>,
    pub statistics: DependencyStatistics,
}

pub trait DependencyResolver {
    fn resolve_dependencies(&self, documents: &[Document]) -> DependencyResolution;
}

/// Returns the documents unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughResolver;

impl DependencyResolver for PassthroughResolver {
    fn resolve_dependencies(&self, documents: &[Document]) -> DependencyResolution {
        DependencyResolution {
            ordered_documents: documents.to_vec(),
            statistics: DependencyStatistics {
                total_documents: documents.len(),
                ..DependencyStatistics::default()
            },
            ..DependencyResolution::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub documents: Vec<DocumentId>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConflictAnalysis {
    pub conflicts: Vec<Conflict>,
}

pub trait ConflictDetector {
    fn detect_conflicts(&self, documents: &[Document]) -> ConflictAnalysis;

    fn apply_conflict_resolutions(
        &self,
        documents: Vec<Document>,
        analysis: &ConflictAnalysis,
    ) -> Vec<Document>;
}

/// Reports no conflicts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoConflicts;

impl ConflictDetector for NoConflicts {
    fn detect_conflicts(&self, _documents: &[Document]) -> ConflictAnalysis {
        ConflictAnalysis::default()
    }

    fn apply_conflict_resolutions(
        &self,
        documents: Vec<Document>,
        _analysis: &ConflictAnalysis,
    ) -> Vec<Document> {
        documents
    }
}
