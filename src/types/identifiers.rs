use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        DocumentId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        DocumentId(value.to_string())
    }
}

/// Content hash of a selection: the strategy name followed by the selected
/// ids in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionFingerprint(String);

impl SelectionFingerprint {
    pub fn compute<'a>(strategy: &str, ids: impl IntoIterator<Item = &'a DocumentId>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(strategy.as_bytes());
        for id in ids {
            hasher.update(b"\n");
            hasher.update(id.as_str().as_bytes());
        }

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        SelectionFingerprint(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
