use std::collections::HashSet;

use context_optimizer::algorithms::{greedy, knapsack, topsis, AlgorithmSelection};
use context_optimizer::document::{Category, Complexity, Document, DocumentTags};
use context_optimizer::strategy::StrategyPreset;
use context_optimizer::types::{AlgorithmError, SelectionCandidate};
use proptest::prelude::*;

fn make_docs(specs: &[(f64, usize, usize)]) -> Vec<Document> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(_, _, category))| {
            Document::new(
                format!("doc-{i:02}"),
                Category::ALL[category % Category::ALL.len()],
                DocumentTags::new(Complexity::Intermediate).with_primary([format!("tag-{}", i % 3)]),
                50,
            )
            .unwrap()
        })
        .collect()
}

fn make_candidates<'a>(docs: &'a [Document], specs: &[(f64, usize, usize)]) -> Vec<SelectionCandidate<'a>> {
    docs.iter()
        .zip(specs)
        .map(|(doc, &(score, chars, _))| SelectionCandidate {
            document: doc,
            score,
            estimated_characters: chars,
            priority: score,
            category_affinity: 0.5,
            tag_affinity: 0.0,
            dependency_bonus: 0.0,
            diversity_bonus: 0.0,
            selected: false,
            reasons: Vec::new(),
        })
        .collect()
}

fn assert_well_formed(selection: &AlgorithmSelection, candidates: &[SelectionCandidate<'_>], budget: usize) {
    assert!(selection.characters(candidates) <= budget, "selection exceeds budget");
    let unique: HashSet<usize> = selection.indices.iter().copied().collect();
    assert_eq!(unique.len(), selection.indices.len(), "duplicate selection");
    assert_eq!(selection.indices.len(), selection.adjusted_scores.len());
}

fn spec_strategy() -> impl Strategy<Value = Vec<(f64, usize, usize)>> {
    prop::collection::vec((0.0f64..1.0, 1usize..2500, 0usize..6), 0..12)
}

proptest! {
    #[test]
    fn every_base_algorithm_respects_the_budget(specs in spec_strategy(), budget in 0usize..6000) {
        let docs = make_docs(&specs);
        let candidates = make_candidates(&docs, &specs);
        let weights = StrategyPreset::Balanced.strategy().criteria;

        let by_knapsack = knapsack::select(&candidates, budget, 10_000_000).unwrap();
        let by_greedy = greedy::select(&candidates, budget).unwrap();
        let by_topsis = topsis::select(&candidates, budget, &weights).unwrap();

        assert_well_formed(&by_knapsack, &candidates, budget);
        assert_well_formed(&by_greedy, &candidates, budget);
        assert_well_formed(&by_topsis, &candidates, budget);
    }

    #[test]
    fn greedy_is_deterministic(specs in spec_strategy(), budget in 0usize..6000) {
        let docs = make_docs(&specs);
        let candidates = make_candidates(&docs, &specs);

        let first = greedy::select(&candidates, budget).unwrap();
        let second = greedy::select(&candidates, budget).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn greedy_never_raises_a_working_score(specs in spec_strategy(), budget in 0usize..6000) {
        let docs = make_docs(&specs);
        let candidates = make_candidates(&docs, &specs);

        let selection = greedy::select(&candidates, budget).unwrap();
        for (&i, &adjusted) in selection.indices.iter().zip(&selection.adjusted_scores) {
            prop_assert!(adjusted <= candidates[i].score);
            prop_assert!(adjusted >= 0.0);
        }
    }

    #[test]
    fn topsis_closeness_is_bounded(specs in spec_strategy()) {
        let docs = make_docs(&specs);
        let candidates = make_candidates(&docs, &specs);
        let weights = StrategyPreset::QualityFocused.strategy().criteria;

        for score in topsis::closeness(&candidates, &weights) {
            prop_assert!((0.0..=1.0).contains(&score), "closeness {} out of range", score);
        }
    }

    #[test]
    fn knapsack_is_optimal_for_the_scaled_problem(
        specs in prop::collection::vec(
            (0.0f64..1.0, (1usize..80).prop_map(|c| c * 10), 0usize..6),
            0..12,
        ),
        budget in 0usize..3000,
    ) {
        let docs = make_docs(&specs);
        let candidates = make_candidates(&docs, &specs);
        let capacity = knapsack::scaled_weight(budget);
        let weights: Vec<usize> = candidates.iter().map(|c| knapsack::scaled_weight(c.estimated_characters)).collect();
        let values: Vec<u64> = candidates.iter().map(|c| knapsack::scaled_value(c.score)).collect();

        let mut best = 0u64;
        for mask in 0u32..(1 << candidates.len()) {
            let (mut w, mut v) = (0usize, 0u64);
            for i in 0..candidates.len() {
                if mask & (1 << i) != 0 {
                    w += weights[i];
                    v += values[i];
                }
            }
            if w <= capacity {
                best = best.max(v);
            }
        }

        let selection = knapsack::select(&candidates, budget, 10_000_000).unwrap();
        let scaled_weight: usize = selection.indices.iter().map(|&i| weights[i]).sum();
        let scaled_value: u64 = selection.indices.iter().map(|&i| values[i]).sum();

        prop_assert!(scaled_weight <= capacity);
        prop_assert_eq!(scaled_value, best);
    }
}

#[test]
fn knapsack_matches_brute_force_on_round_costs() {
    let specs: Vec<(f64, usize, usize)> = vec![
        (0.9, 500, 0),
        (0.4, 200, 1),
        (0.35, 200, 2),
        (0.6, 400, 3),
        (0.2, 100, 4),
        (0.75, 300, 5),
    ];
    let docs = make_docs(&specs);
    let candidates = make_candidates(&docs, &specs);

    let selection = knapsack::select(&candidates, 1000, 10_000_000).unwrap();
    let total: f64 = selection.total_score(&candidates);

    // 0.9 + 0.75 + 0.4 (1000 chars) beats every other feasible subset
    assert!((total - 2.05).abs() < 1e-9);
    assert_eq!(selection.indices, vec![0, 1, 5]);
    assert!(selection.converged);
    assert_eq!(selection.iterations, 1);
}

#[test]
fn knapsack_treats_sub_scale_costs_as_free_but_stays_in_budget() {
    let specs: Vec<(f64, usize, usize)> = vec![(0.5, 9, 0), (0.4, 9, 1), (0.3, 9, 2)];
    let docs = make_docs(&specs);
    let candidates = make_candidates(&docs, &specs);

    // Every candidate has scaled weight 0, but only two fit in 20 characters.
    let selection = knapsack::select(&candidates, 20, 10_000_000).unwrap();
    assert_eq!(selection.indices, vec![0, 1]);
    assert_eq!(selection.characters(&candidates), 18);
}

#[test]
fn knapsack_refuses_oversized_tables() {
    let specs: Vec<(f64, usize, usize)> = vec![(0.5, 100, 0)];
    let docs = make_docs(&specs);
    let candidates = make_candidates(&docs, &specs);

    let err = knapsack::select(&candidates, 1_000_000, 1000).unwrap_err();
    assert!(err.to_string().contains("exceeds limit"));
}

#[test]
fn knapsack_rejects_scores_whose_scaled_sum_overflows() {
    let specs: Vec<(f64, usize, usize)> = vec![(1e20, 100, 0), (1e20, 100, 1)];
    let docs = make_docs(&specs);
    let candidates = make_candidates(&docs, &specs);

    let err = knapsack::select(&candidates, 1000, 10_000_000).unwrap_err();
    assert!(matches!(err, AlgorithmError::ValueOverflow { ref id } if id.as_str() == "doc-01"));
}

#[test]
fn topsis_scores_ideal_one_and_negative_ideal_zero() {
    let docs = make_docs(&[(0.0, 1, 0), (0.0, 1, 1), (0.0, 1, 2)]);
    let mut candidates = make_candidates(&docs, &[(0.9, 100, 0), (0.1, 100, 1), (0.5, 100, 2)]);
    candidates[0].priority = 1.0;
    candidates[0].diversity_bonus = 1.0;
    candidates[0].dependency_bonus = 1.0;
    candidates[1].priority = 0.0;
    candidates[1].diversity_bonus = 0.0;
    candidates[1].dependency_bonus = 0.0;
    candidates[2].priority = 0.5;
    candidates[2].diversity_bonus = 0.5;
    candidates[2].dependency_bonus = 0.5;

    let weights = StrategyPreset::Hybrid.strategy().criteria;
    let scores = topsis::closeness(&candidates, &weights);

    assert!((scores[0] - 1.0).abs() < 1e-12);
    assert!(scores[1].abs() < 1e-12);
    assert!(scores[2] > 0.0 && scores[2] < 1.0);

    let selection = topsis::select(&candidates, 200, &weights).unwrap();
    assert_eq!(selection.indices, vec![0, 2]);
}

#[test]
fn non_finite_scores_are_rejected() {
    let specs: Vec<(f64, usize, usize)> = vec![(f64::NAN, 100, 0), (0.5, 100, 1)];
    let docs = make_docs(&specs);
    let candidates = make_candidates(&docs, &specs);

    assert!(greedy::select(&candidates, 1000).is_err());
    assert!(knapsack::select(&candidates, 1000, 10_000_000).is_err());
    assert!(topsis::select(&candidates, 1000, &StrategyPreset::Balanced.strategy().criteria).is_err());
}
