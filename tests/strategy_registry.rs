use std::fs;

use context_optimizer::algorithms::Algorithm;
use context_optimizer::document::{Category, Complexity, Document, DocumentTags};
use context_optimizer::selection::{ContextOptimizer, SelectionConstraints, SelectionOptions};
use context_optimizer::strategy::{
    CriteriaWeights, SelectionStrategy, StrategyPreset, StrategyRegistry, WeightOverrides,
};
use context_optimizer::types::{ConfigurationError, SelectionError};
use tempfile::tempdir;

#[test]
fn default_registry_holds_every_preset() {
    let registry = StrategyRegistry::default();
    assert_eq!(registry.len(), StrategyPreset::ALL.len());
    for preset in StrategyPreset::ALL {
        assert_eq!(registry.get(preset.name()).unwrap(), &preset.strategy());
    }
}

#[test]
fn unknown_strategy_names_requested_and_valid_names() {
    let registry = StrategyRegistry::default();
    let err = registry.get("fastest").unwrap_err();

    match &err {
        ConfigurationError::UnknownStrategy { requested, valid } => {
            assert_eq!(requested, "fastest");
            assert!(valid.contains(&"balanced".to_string()));
            assert!(valid.contains(&"quality-focused".to_string()));
        }
        other => panic!("unexpected error {other:?}"),
    }

    let message = err.to_string();
    assert!(message.contains("fastest"));
    assert!(message.contains("adaptive"));
}

#[test]
fn unknown_strategy_fails_selection_before_any_work() {
    let optimizer = ContextOptimizer::default();
    let err = optimizer
        .select(&[], &SelectionConstraints::new(0), &SelectionOptions::with_strategy("nope"))
        .unwrap_err();
    assert!(matches!(
        err,
        SelectionError::Configuration(ConfigurationError::UnknownStrategy { .. })
    ));
}

#[test]
fn register_adds_and_updates_strategies() {
    let mut registry = StrategyRegistry::default();
    let custom = SelectionStrategy::new("docs-site", Algorithm::Greedy, CriteriaWeights::default());

    assert!(registry.register(custom.clone()).unwrap().is_none());
    assert_eq!(registry.get("docs-site").unwrap(), &custom);

    let replacement = SelectionStrategy::new("docs-site", Algorithm::Knapsack, CriteriaWeights::default());
    let previous = registry.register(replacement).unwrap();
    assert_eq!(previous, Some(custom));
    assert_eq!(registry.get("docs-site").unwrap().algorithm, Algorithm::Knapsack);
}

#[test]
fn invalid_strategies_are_rejected_at_registration() {
    let mut registry = StrategyRegistry::empty();
    let nameless = SelectionStrategy::new("  ", Algorithm::Greedy, CriteriaWeights::default());
    assert!(matches!(
        registry.register(nameless),
        Err(ConfigurationError::EmptyStrategyName)
    ));

    let nan = SelectionStrategy::new(
        "nan",
        Algorithm::Greedy,
        CriteriaWeights {
            priority_weight: f64::NAN,
            ..CriteriaWeights::default()
        },
    );
    assert!(registry.register(nan).is_err());
    assert!(registry.is_empty());
}

#[test]
fn overrides_apply_per_call_without_touching_the_registry() {
    let registry = StrategyRegistry::default();
    let overrides = WeightOverrides {
        quality_weight: Some(0.9),
        ..WeightOverrides::default()
    };

    let resolved = registry.resolve("greedy", &overrides).unwrap();
    assert_eq!(resolved.criteria.quality_weight, 0.9);
    assert_eq!(resolved.criteria.priority_weight, 0.4);
    assert_eq!(registry.get("greedy").unwrap().criteria.quality_weight, 0.2);

    let negative = WeightOverrides {
        diversity_weight: Some(-1.0),
        ..WeightOverrides::default()
    };
    assert!(matches!(
        registry.resolve("greedy", &negative),
        Err(ConfigurationError::InvalidWeight { field: "diversity_weight", .. })
    ));
}

#[test]
fn registry_loads_strategies_from_a_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("strategies.json");
    fs::write(
        &path,
        r#"[
          {
            "name": "api-heavy",
            "algorithm": "multi-criteria",
            "criteria": {
              "priority_weight": 0.6,
              "diversity_weight": 0.1,
              "dependency_weight": 0.1,
              "quality_weight": 0.2,
              "space_utilization": 0.9
            },
            "constraints": { "max_documents": 3, "required_categories": ["api"] }
          },
          { "name": "greedy", "algorithm": "knapsack" }
        ]"#,
    )
    .unwrap();

    let registry = StrategyRegistry::load(&path).unwrap();

    let api_heavy = registry.get("api-heavy").unwrap();
    assert_eq!(api_heavy.algorithm, Algorithm::MultiCriteria);
    assert_eq!(api_heavy.constraints.max_documents, Some(3));
    assert_eq!(api_heavy.constraints.required_categories, vec![Category::Api]);

    // file entries override presets of the same name
    let greedy = registry.get("greedy").unwrap();
    assert_eq!(greedy.algorithm, Algorithm::Knapsack);
    assert_eq!(greedy.criteria, CriteriaWeights::default());

    assert_eq!(registry.len(), StrategyPreset::ALL.len() + 1);
}

#[test]
fn unsupported_algorithm_in_config_is_a_configuration_error() {
    let err = StrategyRegistry::from_json_str(r#"[{ "name": "x", "algorithm": "annealing" }]"#).unwrap_err();
    assert!(matches!(err, ConfigurationError::UnsupportedAlgorithm(name) if name == "annealing"));
}

#[test]
fn malformed_config_is_a_parse_error() {
    let err = StrategyRegistry::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigurationError::Parse(_)));

    let missing = StrategyRegistry::load(std::path::Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(missing, ConfigurationError::Io(_)));
}

#[test]
fn registered_strategy_drives_selection() {
    let mut optimizer = ContextOptimizer::default();
    optimizer
        .registry_mut()
        .register(
            SelectionStrategy::new("top-one", Algorithm::Greedy, CriteriaWeights::default()).with_constraints(
                context_optimizer::strategy::StrategyConstraints {
                    max_documents: Some(1),
                    ..Default::default()
                },
            ),
        )
        .unwrap();

    let docs = vec![
        Document::new("low", Category::Llms, DocumentTags::new(Complexity::Basic), 10).unwrap(),
        Document::new("high", Category::Llms, DocumentTags::new(Complexity::Basic), 90).unwrap(),
    ];
    let result = optimizer
        .select(&docs, &SelectionConstraints::new(10_000), &SelectionOptions::with_strategy("top-one"))
        .unwrap();

    assert_eq!(result.strategy, "top-one");
    assert_eq!(result.selected_documents.len(), 1);
    assert_eq!(result.selected_documents[0].id.as_str(), "high");
}
