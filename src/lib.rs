//! Budget-constrained document selection for LLM context assembly.
//!
//! `context-optimizer` picks, from a pool of scored documents, the subset
//! that fits a character budget while maximizing priority, topical affinity,
//! dependency satisfaction and collection-level diversity. Four algorithms
//! are available: 0/1 knapsack, greedy ratio-based selection, TOPSIS
//! multi-criteria ranking, and a hybrid ensemble refined by local search.
//! Every algorithm is deterministic; identical inputs produce identical
//! selections.

pub mod algorithms;
pub mod document;
pub mod metrics;
pub mod selection;
pub mod strategy;
pub mod types;
