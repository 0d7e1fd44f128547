use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::types::identifiers::DocumentId;

/// Per-criterion components of a document's score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: f64,
    pub category: f64,
    pub tag: f64,
    pub dependency: f64,
    pub priority: f64,
}

/// Output of a [`Scorer`](crate::selection::Scorer) for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub document_id: DocumentId,
    pub breakdown: ScoreBreakdown,
    pub reasons: Vec<String>,
    pub excluded: bool,
}

/// A document that has been scored and costed for one selection call.
/// Holds a reference to the original document; never outlives the call.
#[derive(Debug, Clone)]
pub struct SelectionCandidate<'a> {
    pub document: &'a Document,

    pub score: f64,
    pub estimated_characters: usize,

    pub priority: f64,
    pub category_affinity: f64,
    pub tag_affinity: f64,
    pub dependency_bonus: f64,
    pub diversity_bonus: f64,

    pub selected: bool,
    pub reasons: Vec<String>,
}

impl<'a> SelectionCandidate<'a> {
    pub fn id(&self) -> &'a DocumentId {
        &self.document.id
    }

    /// Score per character, guarded against zero cost.
    pub fn efficiency(&self) -> f64 {
        self.score / self.estimated_characters.max(1) as f64
    }
}
