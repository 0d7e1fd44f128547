//! Selection algorithms. Each one is a pure function of an immutable
//! candidate slice, a character budget and (where relevant) a strategy,
//! returning indices into the candidate slice in selection order.

pub mod greedy;
pub mod hybrid;
pub mod knapsack;
pub mod local_search;
pub mod topsis;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::strategy::SelectionStrategy;
use crate::types::{AlgorithmError, AlgorithmFailure, ConfigurationError, SelectionCandidate, SelectionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Knapsack,
    Greedy,
    MultiCriteria,
    Hybrid,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Knapsack => "knapsack",
            Algorithm::Greedy => "greedy",
            Algorithm::MultiCriteria => "multi-criteria",
            Algorithm::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "knapsack" => Ok(Algorithm::Knapsack),
            "greedy" => Ok(Algorithm::Greedy),
            "multi-criteria" => Ok(Algorithm::MultiCriteria),
            "hybrid" => Ok(Algorithm::Hybrid),
            other => Err(ConfigurationError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Tuning knobs shared by every algorithm run within one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerSettings {
    pub max_iterations: usize,
    pub convergence_threshold: f64,
    pub enable_optimization: bool,
    pub max_knapsack_cells: usize,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            convergence_threshold: 0.001,
            enable_optimization: true,
            max_knapsack_cells: 50_000_000,
        }
    }
}

/// Indices into the candidate slice, in the order the algorithm admitted them.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmSelection {
    pub indices: Vec<usize>,
    /// Working score of each selected candidate, parallel to `indices`.
    pub adjusted_scores: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
    pub algorithms_used: Vec<Algorithm>,
    pub failures: Vec<AlgorithmFailure>,
}

impl AlgorithmSelection {
    /// Selection for degenerate input: nothing selected, nothing run.
    pub fn empty() -> Self {
        Self {
            indices: Vec::new(),
            adjusted_scores: Vec::new(),
            iterations: 0,
            converged: true,
            algorithms_used: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub(crate) fn single(
        algorithm: Algorithm,
        indices: Vec<usize>,
        candidates: &[SelectionCandidate<'_>],
        converged: bool,
    ) -> Self {
        let adjusted_scores = indices.iter().map(|&i| candidates[i].score).collect();
        Self {
            indices,
            adjusted_scores,
            iterations: 1,
            converged,
            algorithms_used: vec![algorithm],
            failures: Vec::new(),
        }
    }

    pub fn total_score(&self, candidates: &[SelectionCandidate<'_>]) -> f64 {
        total_score(&self.indices, candidates)
    }

    pub fn characters(&self, candidates: &[SelectionCandidate<'_>]) -> usize {
        characters(&self.indices, candidates)
    }
}

pub fn total_score(indices: &[usize], candidates: &[SelectionCandidate<'_>]) -> f64 {
    indices.iter().map(|&i| candidates[i].score).sum()
}

pub fn characters(indices: &[usize], candidates: &[SelectionCandidate<'_>]) -> usize {
    indices.iter().map(|&i| candidates[i].estimated_characters).sum()
}

/// Run the strategy's algorithm over the candidates.
pub fn run(
    candidates: &[SelectionCandidate<'_>],
    budget: usize,
    strategy: &SelectionStrategy,
    settings: &OptimizerSettings,
) -> Result<AlgorithmSelection, SelectionError> {
    let selection = match strategy.algorithm {
        Algorithm::Knapsack => knapsack::select(candidates, budget, settings.max_knapsack_cells)?,
        Algorithm::Greedy => greedy::select(candidates, budget)?,
        Algorithm::MultiCriteria => topsis::select(candidates, budget, &strategy.criteria)?,
        Algorithm::Hybrid => hybrid::select(candidates, budget, strategy, settings)?,
    };
    Ok(selection)
}

pub(crate) fn ensure_finite(candidates: &[SelectionCandidate<'_>]) -> Result<(), AlgorithmError> {
    match candidates.iter().find(|c| !c.score.is_finite()) {
        Some(c) => Err(AlgorithmError::NonFiniteScore { id: c.id().clone() }),
        None => Ok(()),
    }
}

/// Walk candidates in the given order, admitting each one that still fits.
pub(crate) fn admit_in_order(
    candidates: &[SelectionCandidate<'_>],
    order: impl IntoIterator<Item = usize>,
    budget: usize,
) -> Vec<usize> {
    let mut selected = Vec::new();
    let mut used = 0;

    for idx in order {
        let cost = candidates[idx].estimated_characters;
        if used + cost <= budget {
            selected.push(idx);
            used += cost;
        }
    }

    selected
}
