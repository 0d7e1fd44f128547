use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::identifiers::DocumentId;
use super::category::Category;
use super::tags::DocumentTags;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Priority score {0} is outside 0..=100")]
    InvalidPriority(u32),
    #[error("Document id must not be empty")]
    EmptyId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub score: u8,
}

/// A candidate unit of documentation. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub category: Category,
    pub tags: DocumentTags,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        category: Category,
        tags: DocumentTags,
        priority_score: u32,
    ) -> Result<Self, DocumentError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DocumentError::EmptyId);
        }
        if priority_score > 100 {
            return Err(DocumentError::InvalidPriority(priority_score));
        }

        Ok(Document {
            id: DocumentId::new(id),
            category,
            tags,
            priority: Priority {
                score: priority_score as u8,
            },
            word_count: None,
        })
    }

    pub fn with_word_count(mut self, word_count: usize) -> Self {
        self.word_count = Some(word_count);
        self
    }
}
