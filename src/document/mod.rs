pub mod category;
pub mod document;
pub mod tags;

pub use crate::types::identifiers::DocumentId;
pub use category::{Category, Complexity};
pub use document::{Document, DocumentError, Priority};
pub use tags::{tag_overlap, DocumentTags};
