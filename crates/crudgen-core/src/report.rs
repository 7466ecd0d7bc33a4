//! Per-run summary returned by the writer.

use std::collections::BTreeSet;

use serde::Serialize;

/// Outcome of one generation run, by model name.
///
/// Conflicts are an expected, reported outcome: the writer never overwrites a
/// block whose on-disk content diverged from the ledger.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct GenerationReport {
    /// Newly appended or regenerated blocks.
    pub written: BTreeSet<String>,
    /// Blocks whose generated content was already on disk.
    pub skipped: BTreeSet<String>,
    /// Blocks edited by something other than the generator; left untouched.
    pub conflicts: BTreeSet<String>,
    /// Managed blocks for models no longer in the schema.
    pub orphaned: BTreeSet<String>,
    /// Orphaned blocks removed because pruning was requested.
    pub pruned: BTreeSet<String>,
}

impl GenerationReport {
    /// True when nothing would change and nothing needs a human.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.written.is_empty() && self.conflicts.is_empty() && self.pruned.is_empty()
    }

    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Whether the target artifact content changes as a result of this run.
    #[must_use]
    pub fn changes_artifact(&self) -> bool {
        !self.written.is_empty() || !self.pruned.is_empty()
    }
}
