use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithms::Algorithm;
use crate::types::identifiers::DocumentId;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Unknown strategy '{requested}'; valid strategies: {}", valid.join(", "))]
    UnknownStrategy {
        requested: String,
        valid: Vec<String>,
    },

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Strategy '{strategy}' has invalid {field}: {value}")]
    InvalidWeight {
        strategy: String,
        field: &'static str,
        value: f64,
    },

    #[error("Strategy '{strategy}' has balance requirement {value} outside [0, 1]")]
    InvalidBalanceRequirement { strategy: String, value: f64 },

    #[error("Strategy name must not be empty")]
    EmptyStrategyName,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlgorithmError {
    #[error("Candidate {id} has a non-finite score")]
    NonFiniteScore { id: DocumentId },

    #[error("Knapsack table of {cells} cells exceeds limit of {limit}")]
    TableTooLarge { cells: usize, limit: usize },

    #[error("Scaled knapsack values overflow at candidate {id}")]
    ValueOverflow { id: DocumentId },
}

/// A constituent algorithm that was skipped by the hybrid ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmFailure {
    pub algorithm: Algorithm,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Algorithm error: {0}")]
    Algorithm(#[from] AlgorithmError),

    #[error("Every constituent algorithm failed ({} failures)", failures.len())]
    EmptySelection { failures: Vec<AlgorithmFailure> },
}
