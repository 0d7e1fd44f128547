use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::category::Complexity;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentTags {
    #[serde(default)]
    pub primary: BTreeSet<String>,
    #[serde(default)]
    pub audience: BTreeSet<String>,
    #[serde(default)]
    pub complexity: Complexity,
}

impl DocumentTags {
    pub fn new(complexity: Complexity) -> Self {
        Self {
            primary: BTreeSet::new(),
            audience: BTreeSet::new(),
            complexity,
        }
    }

    pub fn with_primary<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_audience<I, S>(mut self, audience: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.audience.extend(audience.into_iter().map(Into::into));
        self
    }
}

/// Jaccard overlap of two tag sets. Two empty sets are considered disjoint.
pub fn tag_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn overlap_of_empty_sets_is_zero() {
        assert_eq!(tag_overlap(&set(&[]), &set(&[])), 0.0);
    }

    #[test]
    fn overlap_is_jaccard() {
        let a = set(&["routing", "state", "forms"]);
        let b = set(&["state", "forms", "testing"]);
        assert!((tag_overlap(&a, &b) - 0.5).abs() < 1e-12);
    }
}
