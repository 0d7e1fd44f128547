use serde::{Deserialize, Serialize};

use crate::algorithms::Algorithm;
use crate::document::Category;
use crate::types::ConfigurationError;

/// Relative importance of each selection criterion. Weights are
/// non-negative and need not sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriteriaWeights {
    pub priority_weight: f64,
    pub diversity_weight: f64,
    pub dependency_weight: f64,
    pub quality_weight: f64,
    pub space_utilization: f64,
}

impl Default for CriteriaWeights {
    fn default() -> Self {
        Self {
            priority_weight: 0.25,
            diversity_weight: 0.25,
            dependency_weight: 0.25,
            quality_weight: 0.25,
            space_utilization: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrategyConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_documents: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_quality_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_requirement: Option<f64>,
}

/// A named configuration of algorithm, criteria weights and constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionStrategy {
    pub name: String,
    pub algorithm: Algorithm,
    pub criteria: CriteriaWeights,
    #[serde(default)]
    pub constraints: StrategyConstraints,
}

impl SelectionStrategy {
    pub fn new(name: impl Into<String>, algorithm: Algorithm, criteria: CriteriaWeights) -> Self {
        Self {
            name: name.into(),
            algorithm,
            criteria,
            constraints: StrategyConstraints::default(),
        }
    }

    pub fn with_constraints(mut self, constraints: StrategyConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn balance_requirement(&self) -> f64 {
        self.constraints.balance_requirement.unwrap_or(0.0)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.name.trim().is_empty() {
            return Err(ConfigurationError::EmptyStrategyName);
        }

        let c = &self.criteria;
        let fields = [
            ("priority_weight", c.priority_weight),
            ("diversity_weight", c.diversity_weight),
            ("dependency_weight", c.dependency_weight),
            ("quality_weight", c.quality_weight),
            ("space_utilization", c.space_utilization),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::InvalidWeight {
                    strategy: self.name.clone(),
                    field,
                    value,
                });
            }
        }

        if let Some(min) = self.constraints.min_quality_score {
            if !min.is_finite() {
                return Err(ConfigurationError::InvalidWeight {
                    strategy: self.name.clone(),
                    field: "min_quality_score",
                    value: min,
                });
            }
        }

        if let Some(balance) = self.constraints.balance_requirement {
            if !(0.0..=1.0).contains(&balance) {
                return Err(ConfigurationError::InvalidBalanceRequirement {
                    strategy: self.name.clone(),
                    value: balance,
                });
            }
        }

        Ok(())
    }
}

/// Per-call overrides of individual criteria weights.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diversity_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_utilization: Option<f64>,
}

impl WeightOverrides {
    pub fn is_empty(&self) -> bool {
        *self == WeightOverrides::default()
    }

    pub fn apply(&self, weights: CriteriaWeights) -> CriteriaWeights {
        CriteriaWeights {
            priority_weight: self.priority_weight.unwrap_or(weights.priority_weight),
            diversity_weight: self.diversity_weight.unwrap_or(weights.diversity_weight),
            dependency_weight: self.dependency_weight.unwrap_or(weights.dependency_weight),
            quality_weight: self.quality_weight.unwrap_or(weights.quality_weight),
            space_utilization: self.space_utilization.unwrap_or(weights.space_utilization),
        }
    }
}
