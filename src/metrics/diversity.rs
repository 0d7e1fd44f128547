//! Collection-level bonuses. Both functions return values in `[0, 1]` and
//! 0 for an empty selection.

use std::collections::{BTreeMap, BTreeSet};

use crate::document::{Category, Complexity, Document};

/// Distinct categories needed for full category diversity.
const CATEGORY_TARGET: usize = 6;

/// Average of category, tag and complexity diversity.
pub fn diversity_bonus(selection: &[&Document]) -> f64 {
    if selection.is_empty() {
        return 0.0;
    }
    let n = selection.len();

    let categories: BTreeSet<Category> = selection.iter().map(|d| d.category).collect();
    let tags: BTreeSet<&str> = selection
        .iter()
        .flat_map(|d| d.tags.primary.iter().map(String::as_str))
        .collect();
    let complexities: BTreeSet<Complexity> = selection.iter().map(|d| d.tags.complexity).collect();

    let category_diversity = categories.len() as f64 / n.min(CATEGORY_TARGET) as f64;
    let tag_diversity = (tags.len() as f64 / (n * 2) as f64).min(1.0);
    let complexity_diversity = complexities.len() as f64 / Complexity::LEVELS as f64;

    (category_diversity + tag_diversity + complexity_diversity) / 3.0
}

/// How evenly the selection is spread over the categories it touches:
/// `max(0, 1 - variance / mean)` of the per-category counts.
pub fn balance_bonus(selection: &[&Document]) -> f64 {
    let counts = category_counts(selection);
    if counts.len() <= 1 {
        return 0.0;
    }

    let k = counts.len() as f64;
    let mean = counts.values().sum::<usize>() as f64 / k;
    let variance = counts
        .values()
        .map(|&c| (c as f64 - mean).powi(2))
        .sum::<f64>()
        / k;

    (1.0 - variance / mean).max(0.0)
}

pub fn category_counts(selection: &[&Document]) -> BTreeMap<Category, usize> {
    let mut counts = BTreeMap::new();
    for doc in selection {
        *counts.entry(doc.category).or_insert(0) += 1;
    }
    counts
}
