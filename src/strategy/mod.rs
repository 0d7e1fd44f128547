pub mod presets;
pub mod registry;
pub mod strategy;

pub use presets::StrategyPreset;
pub use registry::StrategyRegistry;
pub use strategy::{CriteriaWeights, SelectionStrategy, StrategyConstraints, WeightOverrides};
