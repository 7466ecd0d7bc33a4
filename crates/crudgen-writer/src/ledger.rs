//! Persisted record of the last hash written for each model.
//!
//! ```toml
//! version = 1
//!
//! [models]
//! Client = "sha256:…"
//! User = "sha256:…"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crudgen_core::ContentHash;
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::persist;

/// Format version written to and accepted from ledger files.
pub const LEDGER_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct LedgerFile {
    version: u32,
    #[serde(default)]
    models: BTreeMap<String, ContentHash>,
}

/// `model name → hash of the block body the generator last wrote`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: BTreeMap<String, ContentHash>,
}

impl Ledger {
    /// Load a ledger file. A missing file is an empty ledger; anything
    /// unreadable is [`PersistenceError::CorruptLedger`].
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let Some(text) = persist::read_optional(path)? else {
            tracing::debug!(path = %path.display(), "no ledger yet");
            return Ok(Self::default());
        };
        Self::from_toml(&text).map_err(|reason| PersistenceError::CorruptLedger {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn from_toml(text: &str) -> Result<Self, String> {
        let file: LedgerFile = toml::from_str(text).map_err(|e| e.to_string())?;
        if file.version != LEDGER_VERSION {
            return Err(format!(
                "unsupported ledger version {} (expected {LEDGER_VERSION})",
                file.version
            ));
        }
        Ok(Self {
            entries: file.models,
        })
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(&LedgerFile {
            version: LEDGER_VERSION,
            models: self.entries.clone(),
        })
    }

    /// Persist atomically to `path`.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let text = self
            .to_toml()
            .map_err(|e| PersistenceError::CorruptLedger {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        persist::write_atomic(path, &text)
    }

    #[must_use]
    pub fn get(&self, model: &str) -> Option<&ContentHash> {
        self.entries.get(model)
    }

    /// Record `hash` for `model`. Returns true if the entry changed.
    pub fn record(&mut self, model: &str, hash: &ContentHash) -> bool {
        if self.entries.get(model) == Some(hash) {
            return false;
        }
        self.entries.insert(model.to_string(), hash.clone());
        true
    }

    pub fn remove(&mut self, model: &str) -> bool {
        self.entries.remove(model).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
