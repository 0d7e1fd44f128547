pub mod budgeting;
pub mod collaborators;
pub mod ranking;

use std::collections::{BTreeSet, HashSet};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::algorithms::{self, AlgorithmSelection, OptimizerSettings};
use crate::document::{Category, Document};
use crate::metrics::{analyze, RunContext};
use crate::strategy::{StrategyRegistry, WeightOverrides};
use crate::types::{
	ConflictSummary, DependencySummary, DocumentId, SelectionCandidate, SelectionError,
	SelectionResult,
};
pub use budgeting::{build_candidates, estimate_characters, CandidatePool};
pub use collaborators::{
	Conflict, ConflictAnalysis, ConflictDetector, DependencyResolution, DependencyResolver,
	DependencyStatistics, NoConflicts, PassthroughResolver,
};
pub use ranking::{Scorer, WeightedScorer};

/// What the caller is assembling context for. Forwarded to the [`Scorer`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionContext {
	#[serde(default)]
	pub target_categories: BTreeSet<Category>,
	#[serde(default)]
	pub target_tags: BTreeSet<String>,
	#[serde(default)]
	pub target_audience: BTreeSet<String>,
	/// Documents that other documents depend on.
	#[serde(default)]
	pub dependency_ids: BTreeSet<DocumentId>,
	#[serde(default)]
	pub excluded_ids: BTreeSet<DocumentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionConstraints {
	pub max_characters: usize,
	#[serde(default)]
	pub context: SelectionContext,
}

impl SelectionConstraints {
	pub fn new(max_characters: usize) -> Self {
		Self {
			max_characters,
			context: SelectionContext::default(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionOptions {
	pub strategy: String,
	pub max_iterations: usize,
	pub convergence_threshold: f64,
	pub enable_optimization: bool,
	pub enable_conflict_resolution: bool,
	pub enable_dependency_resolution: bool,
	pub weight_overrides: WeightOverrides,
	pub debug: bool,
	pub max_knapsack_cells: usize,
}

impl Default for SelectionOptions {
	fn default() -> Self {
		let settings = OptimizerSettings::default();
		Self {
			strategy: "balanced".to_string(),
			max_iterations: settings.max_iterations,
			convergence_threshold: settings.convergence_threshold,
			enable_optimization: settings.enable_optimization,
			enable_conflict_resolution: true,
			enable_dependency_resolution: true,
			weight_overrides: WeightOverrides::default(),
			debug: false,
			max_knapsack_cells: settings.max_knapsack_cells,
		}
	}
}

impl SelectionOptions {
	pub fn with_strategy(strategy: impl Into<String>) -> Self {
		Self {
			strategy: strategy.into(),
			..Self::default()
		}
	}

	fn optimizer_settings(&self) -> OptimizerSettings {
		OptimizerSettings {
			max_iterations: self.max_iterations,
			convergence_threshold: self.convergence_threshold,
			enable_optimization: self.enable_optimization,
			max_knapsack_cells: self.max_knapsack_cells,
		}
	}
}

/// Selection entry point. Holds the collaborators and the strategy registry;
/// keeps no state between calls.
pub struct ContextOptimizer<S, D, C> {
	scorer: S,
	resolver: D,
	detector: C,
	registry: StrategyRegistry,
}

impl Default for ContextOptimizer<WeightedScorer, PassthroughResolver, NoConflicts> {
	fn default() -> Self {
		Self {
			scorer: WeightedScorer,
			resolver: PassthroughResolver,
			detector: NoConflicts,
			registry: StrategyRegistry::default(),
		}
	}
}

impl<S, D, C> ContextOptimizer<S, D, C>
where
	S: Scorer,
	D: DependencyResolver,
	C: ConflictDetector,
{
	pub fn new(scorer: S, resolver: D, detector: C) -> Self {
		Self {
			scorer,
			resolver,
			detector,
			registry: StrategyRegistry::default(),
		}
	}

	pub fn with_registry(mut self, registry: StrategyRegistry) -> Self {
		self.registry = registry;
		self
	}

	pub fn registry(&self) -> &StrategyRegistry {
		&self.registry
	}

	pub fn registry_mut(&mut self) -> &mut StrategyRegistry {
		&mut self.registry
	}

	pub fn select(
		&self,
		documents: &[Document],
		constraints: &SelectionConstraints,
		options: &SelectionOptions,
	) -> Result<SelectionResult, SelectionError> {
		let started = Instant::now();
		let strategy = self.registry.resolve(&options.strategy, &options.weight_overrides)?;
		let budget = constraints.max_characters;

		// 1. Conflict resolution
		let mut conflicts = ConflictSummary::default();
		let mut working: Vec<Document> = documents.to_vec();
		if options.enable_conflict_resolution {
			let analysis = self.detector.detect_conflicts(&working);
			if !analysis.conflicts.is_empty() {
				let resolved = self.detector.apply_conflict_resolutions(working, &analysis);
				let kept: HashSet<&DocumentId> = resolved.iter().map(|d| &d.id).collect();
				conflicts.removed_documents = documents
					.iter()
					.filter(|d| !kept.contains(&d.id))
					.map(|d| d.id.clone())
					.collect();
				working = resolved;
			}
			conflicts.conflicts_detected = analysis.conflicts.len();
		}

		// 2. Dependency resolution
		let mut dependencies = DependencySummary::default();
		let mut context = constraints.context.clone();
		if options.enable_dependency_resolution {
			let resolution = self.resolver.resolve_dependencies(&working);
			for cycle in &resolution.cycles {
				warn!(cycle = ?cycle, "dependency cycle detected");
			}
			context
				.dependency_ids
				.extend(resolution.included_dependencies.iter().cloned());
			dependencies = DependencySummary {
				included_dependencies: resolution.included_dependencies,
				cycles: resolution.cycles,
				warnings: resolution.warnings,
			};
			working = resolution.ordered_documents;
		}

		let run = RunContext {
			strategy: &strategy,
			budget,
			documents_considered: working.len(),
			dependencies,
			conflicts,
			include_reasons: options.debug,
			started,
		};

		if budget == 0 || working.is_empty() {
			debug!(budget, documents = working.len(), "degenerate input, returning empty selection");
			return Ok(analyze(&[], AlgorithmSelection::empty(), run));
		}

		// 3. Candidate construction
		let CandidatePool {
			mut candidates,
			filtered,
		} = build_candidates(
			&working,
			&self.scorer,
			&context,
			strategy.constraints.min_quality_score,
		);
		debug!(candidates = candidates.len(), filtered = filtered.len(), "candidates built");
		if options.debug {
			for c in &candidates {
				debug!(
					id = %c.id(),
					score = c.score,
					characters = c.estimated_characters,
					category = c.category_affinity,
					tag = c.tag_affinity,
					dependency = c.dependency_bonus,
					priority = c.priority,
					"candidate"
				);
			}
		}

		if candidates.is_empty() {
			return Ok(analyze(&[], AlgorithmSelection::empty(), run));
		}

		// 4. Selection
		let mut selection = algorithms::run(
			&candidates,
			budget,
			&strategy,
			&options.optimizer_settings(),
		)?;

		if let Some(max) = strategy.constraints.max_documents {
			enforce_max_documents(&mut selection, &candidates, max);
		}

		debug_assert!(
			{
				let unique: HashSet<usize> = selection.indices.iter().copied().collect();
				unique.len() == selection.indices.len()
			},
			"selection contains duplicate candidates"
		);

		for &i in &selection.indices {
			candidates[i].selected = true;
		}

		// 5. Analysis
		Ok(analyze(&candidates, selection, run))
	}
}

/// Keep the `max` highest-scoring entries, preserving selection order.
fn enforce_max_documents(
	selection: &mut AlgorithmSelection,
	candidates: &[SelectionCandidate<'_>],
	max: usize,
) {
	if selection.indices.len() <= max {
		return;
	}

	let mut ranked: Vec<usize> = (0..selection.indices.len()).collect();
	// stable: earlier positions win ties
	ranked.sort_by(|&a, &b| {
		candidates[selection.indices[b]]
			.score
			.total_cmp(&candidates[selection.indices[a]].score)
	});
	let keep: HashSet<usize> = ranked.into_iter().take(max).collect();

	debug!(before = selection.indices.len(), max, "truncating selection to max documents");

	let (indices, adjusted_scores) = selection
		.indices
		.iter()
		.zip(&selection.adjusted_scores)
		.enumerate()
		.filter(|(pos, _)| keep.contains(pos))
		.map(|(_, (&i, &s))| (i, s))
		.unzip();
	selection.indices = indices;
	selection.adjusted_scores = adjusted_scores;
}
