use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::algorithms::Algorithm;
use crate::types::ConfigurationError;
use super::presets::StrategyPreset;
use super::strategy::{CriteriaWeights, SelectionStrategy, StrategyConstraints, WeightOverrides};

/// Name-keyed collection of strategies, seeded with the built-in presets.
///
/// Entries are validated on insertion, so every lookup yields a usable
/// strategy.
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    strategies: BTreeMap<String, SelectionStrategy>,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        let strategies = StrategyPreset::ALL
            .into_iter()
            .map(|preset| (preset.name().to_string(), preset.strategy()))
            .collect();
        Self { strategies }
    }
}

/// On-disk form of a strategy. The algorithm stays a string until
/// conversion so unknown names surface as
/// [`ConfigurationError::UnsupportedAlgorithm`].
#[derive(Debug, Deserialize)]
struct StrategyConfig {
    name: String,
    algorithm: String,
    #[serde(default)]
    criteria: CriteriaWeights,
    #[serde(default)]
    constraints: StrategyConstraints,
}

impl TryFrom<StrategyConfig> for SelectionStrategy {
    type Error = ConfigurationError;

    fn try_from(config: StrategyConfig) -> Result<Self, Self::Error> {
        let algorithm: Algorithm = config.algorithm.parse()?;
        Ok(SelectionStrategy::new(config.name, algorithm, config.criteria)
            .with_constraints(config.constraints))
    }
}

impl StrategyRegistry {
    pub fn empty() -> Self {
        Self {
            strategies: BTreeMap::new(),
        }
    }

    /// Built-in presets overlaid with the strategies in a JSON array.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let configs: Vec<StrategyConfig> = serde_json::from_str(json)?;

        let mut registry = Self::default();
        for config in configs {
            registry.register(SelectionStrategy::try_from(config)?)?;
        }
        Ok(registry)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let json = fs::read_to_string(path)?;
        let registry = Self::from_json_str(&json)?;
        debug!(path = %path.display(), strategies = registry.len(), "loaded strategy registry");
        Ok(registry)
    }

    /// Add or replace a strategy. Returns the previous entry under the same name.
    pub fn register(
        &mut self,
        strategy: SelectionStrategy,
    ) -> Result<Option<SelectionStrategy>, ConfigurationError> {
        strategy.validate()?;
        Ok(self.strategies.insert(strategy.name.clone(), strategy))
    }

    pub fn get(&self, name: &str) -> Result<&SelectionStrategy, ConfigurationError> {
        self.strategies
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownStrategy {
                requested: name.to_string(),
                valid: self.names(),
            })
    }

    /// Look up a strategy and apply per-call weight overrides to a copy.
    pub fn resolve(
        &self,
        name: &str,
        overrides: &WeightOverrides,
    ) -> Result<SelectionStrategy, ConfigurationError> {
        let mut strategy = self.get(name)?.clone();
        if !overrides.is_empty() {
            strategy.criteria = overrides.apply(strategy.criteria);
            strategy.validate()?;
        }
        Ok(strategy)
    }

    pub fn names(&self) -> Vec<String> {
        self.strategies.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
