pub mod analysis;
pub mod diversity;

pub use analysis::{analyze, coverage, RunContext};
pub use diversity::{balance_bonus, category_counts, diversity_bonus};
