use serde::{Deserialize, Serialize};

use crate::algorithms::Algorithm;
use crate::document::Category;
use super::strategy::{CriteriaWeights, SelectionStrategy, StrategyConstraints};

/// Built-in strategies. Every variant maps to a complete, valid
/// [`SelectionStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyPreset {
    Balanced,
    QualityFocused,
    Diverse,
    Efficiency,
    Greedy,
    Hybrid,
    Adaptive,
}

impl StrategyPreset {
    pub const ALL: [StrategyPreset; 7] = [
        StrategyPreset::Balanced,
        StrategyPreset::QualityFocused,
        StrategyPreset::Diverse,
        StrategyPreset::Efficiency,
        StrategyPreset::Greedy,
        StrategyPreset::Hybrid,
        StrategyPreset::Adaptive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyPreset::Balanced => "balanced",
            StrategyPreset::QualityFocused => "quality-focused",
            StrategyPreset::Diverse => "diverse",
            StrategyPreset::Efficiency => "efficiency",
            StrategyPreset::Greedy => "greedy",
            StrategyPreset::Hybrid => "hybrid",
            StrategyPreset::Adaptive => "adaptive",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name() == name)
    }

    pub fn strategy(self) -> SelectionStrategy {
        let (algorithm, criteria, constraints) = match self {
            StrategyPreset::Balanced => (
                Algorithm::Hybrid,
                weights(0.3, 0.25, 0.2, 0.25, 0.8),
                StrategyConstraints {
                    balance_requirement: Some(0.5),
                    ..StrategyConstraints::default()
                },
            ),
            StrategyPreset::QualityFocused => (
                Algorithm::MultiCriteria,
                weights(0.2, 0.1, 0.2, 0.5, 0.6),
                StrategyConstraints {
                    min_quality_score: Some(0.3),
                    ..StrategyConstraints::default()
                },
            ),
            StrategyPreset::Diverse => (
                Algorithm::Hybrid,
                weights(0.15, 0.5, 0.15, 0.2, 0.7),
                StrategyConstraints {
                    balance_requirement: Some(0.8),
                    required_categories: vec![Category::Guide, Category::Api, Category::Concept],
                    ..StrategyConstraints::default()
                },
            ),
            StrategyPreset::Efficiency => (
                Algorithm::Knapsack,
                weights(0.3, 0.1, 0.1, 0.5, 1.0),
                StrategyConstraints::default(),
            ),
            StrategyPreset::Greedy => (
                Algorithm::Greedy,
                weights(0.4, 0.2, 0.2, 0.2, 0.8),
                StrategyConstraints::default(),
            ),
            StrategyPreset::Hybrid => (
                Algorithm::Hybrid,
                weights(0.25, 0.25, 0.25, 0.25, 0.9),
                StrategyConstraints {
                    balance_requirement: Some(0.5),
                    ..StrategyConstraints::default()
                },
            ),
            StrategyPreset::Adaptive => (
                Algorithm::Hybrid,
                weights(0.3, 0.3, 0.2, 0.2, 0.85),
                StrategyConstraints {
                    balance_requirement: Some(0.6),
                    ..StrategyConstraints::default()
                },
            ),
        };

        SelectionStrategy::new(self.name(), algorithm, criteria).with_constraints(constraints)
    }
}

fn weights(
    priority_weight: f64,
    diversity_weight: f64,
    dependency_weight: f64,
    quality_weight: f64,
    space_utilization: f64,
) -> CriteriaWeights {
    CriteriaWeights {
        priority_weight,
        diversity_weight,
        dependency_weight,
        quality_weight,
        space_utilization,
    }
}
