use serde::Serialize;

use crate::hash::ContentHash;

/// Generated source for one model, plus the digest the writer compares.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub model_name: String,
    pub source_text: String,
    pub content_hash: ContentHash,
}

impl GeneratedUnit {
    #[must_use]
    pub fn new(model_name: impl Into<String>, source_text: String) -> Self {
        let content_hash = ContentHash::of(&source_text);
        Self {
            model_name: model_name.into(),
            source_text,
            content_hash,
        }
    }
}
