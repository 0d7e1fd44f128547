use std::collections::BTreeSet;

use crate::document::Document;
use crate::types::{ScoreBreakdown, ScoringResult};
use super::SelectionContext;

/// Maps a document and the caller's context to component scores.
///
/// Implementations must be pure within one `select` call.
pub trait Scorer {
    fn score_document(&self, doc: &Document, context: &SelectionContext) -> ScoringResult;
}

impl<S: Scorer + ?Sized> Scorer for &S {
    fn score_document(&self, doc: &Document, context: &SelectionContext) -> ScoringResult {
        (**self).score_document(doc, context)
    }
}

/// v0: equal-weight blend of category, tag, dependency and priority signals.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeightedScorer;

const COMPONENT_WEIGHT: f64 = 0.25;

impl Scorer for WeightedScorer {
    fn score_document(&self, doc: &Document, context: &SelectionContext) -> ScoringResult {
        let mut reasons = Vec::new();

        let category = if context.target_categories.is_empty() {
            0.5
        } else if context.target_categories.contains(&doc.category) {
            reasons.push(format!("category '{}' is targeted", doc.category));
            1.0
        } else {
            0.0
        };

        let primary_share = share_in(&doc.tags.primary, &context.target_tags);
        let audience_share = share_in(&doc.tags.audience, &context.target_audience);
        let tag = (primary_share + 0.5 * audience_share).min(1.0);
        if tag > 0.0 {
            reasons.push(format!("tag affinity {tag:.2}"));
        }

        let dependency = if context.dependency_ids.contains(&doc.id) {
            reasons.push("required by another document".to_string());
            1.0
        } else {
            0.0
        };

        let priority = f64::from(doc.priority.score) / 100.0;
        reasons.push(format!("priority {}", doc.priority.score));

        let excluded = context.excluded_ids.contains(&doc.id);
        if excluded {
            reasons.push("excluded by context".to_string());
        }

        let total = COMPONENT_WEIGHT * (category + tag + dependency + priority);
        debug_assert!((0.0..=1.0).contains(&total), "score {total} out of range [0.0, 1.0]");

        ScoringResult {
            document_id: doc.id.clone(),
            breakdown: ScoreBreakdown {
                total,
                category,
                tag,
                dependency,
                priority,
            },
            reasons,
            excluded,
        }
    }
}

/// Fraction of `items` present in `targets`; 0 when either is empty.
fn share_in(items: &BTreeSet<String>, targets: &BTreeSet<String>) -> f64 {
    if items.is_empty() || targets.is_empty() {
        return 0.0;
    }
    items.intersection(targets).count() as f64 / items.len() as f64
}
