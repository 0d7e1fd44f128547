//! Candidate construction: character cost estimation and scoring.

use std::collections::BTreeMap;

use tracing::debug;

use crate::document::{Category, Document};
use crate::types::{DocumentId, SelectionCandidate};
use super::ranking::Scorer;
use super::SelectionContext;

/// Characters assumed per word when a word count is known.
pub const CHARACTERS_PER_WORD: usize = 5;

/// Estimated character cost of including a document. Always at least 1.
pub fn estimate_characters(doc: &Document) -> usize {
    let estimate = match doc.word_count {
        Some(words) => words.saturating_mul(CHARACTERS_PER_WORD) as f64,
        None => doc.category.base_characters() * doc.tags.complexity.size_factor(),
    };
    (estimate.round() as usize).max(1)
}

/// Candidates in input order, plus the documents filtered out before selection.
#[derive(Debug, Clone)]
pub struct CandidatePool<'a> {
    pub candidates: Vec<SelectionCandidate<'a>>,
    pub filtered: Vec<&'a DocumentId>,
}

pub fn build_candidates<'a, S: Scorer>(
    documents: &'a [Document],
    scorer: &S,
    context: &SelectionContext,
    min_quality_score: Option<f64>,
) -> CandidatePool<'a> {
    let mut candidates = Vec::with_capacity(documents.len());
    let mut filtered = Vec::new();

    for doc in documents {
        let scoring = scorer.score_document(doc, context);
        let below_quality = min_quality_score.is_some_and(|min| scoring.breakdown.total < min);
        if scoring.excluded || below_quality {
            debug!(id = %doc.id, excluded = scoring.excluded, below_quality, "document filtered");
            filtered.push(&doc.id);
            continue;
        }

        let b = scoring.breakdown;
        candidates.push(SelectionCandidate {
            document: doc,
            score: b.total,
            estimated_characters: estimate_characters(doc),
            priority: b.priority,
            category_affinity: b.category,
            tag_affinity: b.tag,
            dependency_bonus: b.dependency,
            diversity_bonus: 0.0,
            selected: false,
            reasons: scoring.reasons,
        });
    }

    assign_diversity_bonus(&mut candidates);

    CandidatePool {
        candidates,
        filtered,
    }
}

/// Sole representatives of a category get 1; categories shared by `k`
/// candidates give each `1 / k`.
fn assign_diversity_bonus(candidates: &mut [SelectionCandidate<'_>]) {
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    for c in candidates.iter() {
        *counts.entry(c.document.category).or_insert(0) += 1;
    }
    for c in candidates.iter_mut() {
        c.diversity_bonus = 1.0 / counts[&c.document.category] as f64;
    }
}
