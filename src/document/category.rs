use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of documentation a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Guide,
    Api,
    Concept,
    Example,
    Reference,
    Llms,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Guide,
        Category::Api,
        Category::Concept,
        Category::Example,
        Category::Reference,
        Category::Llms,
    ];

    /// Base character estimate used when a document carries no word count.
    pub fn base_characters(self) -> f64 {
        match self {
            Category::Guide => 1500.0,
            Category::Api => 800.0,
            Category::Concept => 1200.0,
            Category::Example => 1000.0,
            Category::Reference => 600.0,
            Category::Llms => 400.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Guide => "guide",
            Category::Api => "api",
            Category::Concept => "concept",
            Category::Example => "example",
            Category::Reference => "reference",
            Category::Llms => "llms",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Basic,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl Complexity {
    /// Number of distinct complexity levels.
    pub const LEVELS: usize = 4;

    pub fn size_factor(self) -> f64 {
        match self {
            Complexity::Basic => 0.8,
            Complexity::Intermediate => 1.0,
            Complexity::Advanced => 1.3,
            Complexity::Expert => 1.6,
        }
    }
}
