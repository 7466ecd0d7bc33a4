//! One locked read → merge → persist cycle over the artifact and its ledger.

use std::path::PathBuf;
use std::time::Duration;

use crudgen_core::{GeneratedUnit, GenerationReport};

use crate::document::ArtifactDocument;
use crate::error::PersistenceError;
use crate::ledger::Ledger;
use crate::lock::{RunLock, lock_path_for};
use crate::merge::{MergeOptions, merge};
use crate::persist;

const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Remove unedited blocks whose model left the schema.
    pub prune: bool,
    /// Compute the report without touching the filesystem.
    pub dry_run: bool,
    /// How long to wait for a concurrent run to release the lock.
    pub lock_timeout: Duration,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            prune: false,
            dry_run: false,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }
}

/// Writer bound to one target artifact and its ledger.
#[derive(Debug, Clone)]
pub struct IdempotentWriter {
    artifact: PathBuf,
    ledger: PathBuf,
    options: WriteOptions,
}

impl IdempotentWriter {
    #[must_use]
    pub fn new(artifact: impl Into<PathBuf>, ledger: impl Into<PathBuf>, options: WriteOptions) -> Self {
        Self {
            artifact: artifact.into(),
            ledger: ledger.into(),
            options,
        }
    }

    /// Merge `units` into the artifact and persist the result.
    ///
    /// `preamble` seeds the artifact only when it does not exist yet; it is
    /// plain text, so anything the blocks depend on must come as a unit (the
    /// runtime block), which merge inserts when it is missing. The
    /// artifact is written before the ledger, and each file is replaced
    /// atomically and only when its content changes. A ledger left behind by
    /// an interrupted run heals on the next one, since blocks already on disk
    /// are recognised by content.
    pub fn write(
        &self,
        units: &[GeneratedUnit],
        preamble: &str,
    ) -> Result<GenerationReport, PersistenceError> {
        let _lock = if self.options.dry_run {
            None
        } else {
            Some(RunLock::acquire(
                &lock_path_for(&self.ledger),
                self.options.lock_timeout,
            )?)
        };

        let existing = persist::read_optional(&self.artifact)?;
        let mut document = match &existing {
            Some(text) => ArtifactDocument::parse(text).map_err(|source| {
                PersistenceError::CorruptArtifact {
                    path: self.artifact.clone(),
                    source,
                }
            })?,
            None => ArtifactDocument::from_text(preamble),
        };
        let mut ledger = Ledger::load(&self.ledger)?;
        let recorded = ledger.clone();

        let report = merge(
            &mut document,
            &mut ledger,
            units,
            &MergeOptions {
                prune: self.options.prune,
            },
        );

        if self.options.dry_run {
            tracing::info!(
                artifact = %self.artifact.display(),
                written = report.written.len(),
                conflicts = report.conflicts.len(),
                "dry run; nothing persisted"
            );
            return Ok(report);
        }

        let rendered = document.render();
        let artifact_changed = match &existing {
            Some(text) => *text != rendered,
            None => report.changes_artifact(),
        };
        if artifact_changed {
            persist::write_atomic(&self.artifact, &rendered)?;
        }
        if ledger != recorded {
            ledger.save(&self.ledger)?;
        }

        tracing::info!(
            artifact = %self.artifact.display(),
            written = report.written.len(),
            skipped = report.skipped.len(),
            conflicts = report.conflicts.len(),
            orphaned = report.orphaned.len(),
            pruned = report.pruned.len(),
            "generation run complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crudgen_core::ContentHash;
    use pretty_assertions::assert_eq;

    fn unit(model: &str, body: &str) -> GeneratedUnit {
        GeneratedUnit::new(model, body.to_string())
    }

    fn paths(dir: &Path) -> (PathBuf, PathBuf) {
        (dir.join("out/services.ts"), dir.join("out/services.ts.ledger.toml"))
    }

    #[test]
    fn first_run_creates_artifact_with_preamble_and_ledger() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let (artifact, ledger) = paths(temp.path());
        let writer = IdempotentWriter::new(&artifact, &ledger, WriteOptions::default());

        let report = writer
            .write(&[unit("User", "u\n")], "// head\n")
            .expect("write");

        assert_eq!(report.written.len(), 1);
        assert_eq!(
            std::fs::read_to_string(&artifact).expect("artifact"),
            "// head\n\n// <crudgen:begin User>\nu\n// <crudgen:end User>\n"
        );
        assert!(!lock_path_for(&ledger).exists());
        let ledger = Ledger::load(&ledger).expect("ledger");
        assert_eq!(ledger.get("User"), Some(&ContentHash::of("u\n")));
    }

    #[test]
    fn nothing_to_write_creates_no_files() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let (artifact, ledger) = paths(temp.path());
        let writer = IdempotentWriter::new(&artifact, &ledger, WriteOptions::default());

        let report = writer.write(&[], "// head\n").expect("write");

        assert!(report.is_clean());
        assert!(!artifact.exists());
        assert!(!ledger.exists());
    }

    #[test]
    fn dry_run_touches_nothing() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let (artifact, ledger) = paths(temp.path());
        let writer = IdempotentWriter::new(
            &artifact,
            &ledger,
            WriteOptions {
                dry_run: true,
                ..WriteOptions::default()
            },
        );

        let report = writer.write(&[unit("User", "u\n")], "").expect("write");

        assert_eq!(report.written.len(), 1);
        assert!(!artifact.exists());
        assert!(!ledger.exists());
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn unchanged_run_leaves_files_alone() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let (artifact, ledger) = paths(temp.path());
        let writer = IdempotentWriter::new(&artifact, &ledger, WriteOptions::default());
        writer.write(&[unit("User", "u\n")], "").expect("first write");
        let modified = std::fs::metadata(&artifact)
            .and_then(|m| m.modified())
            .expect("mtime");

        let report = writer.write(&[unit("User", "u\n")], "").expect("second write");

        assert!(report.is_clean());
        assert_eq!(
            std::fs::metadata(&artifact)
                .and_then(|m| m.modified())
                .expect("mtime"),
            modified
        );
    }

    #[test]
    fn corrupt_artifact_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let (artifact, ledger) = paths(temp.path());
        std::fs::create_dir_all(artifact.parent().expect("parent")).expect("mkdir");
        std::fs::write(&artifact, "// <crudgen:begin User>\n").expect("seed");
        let writer = IdempotentWriter::new(&artifact, &ledger, WriteOptions::default());

        let err = writer.write(&[unit("User", "u\n")], "").expect_err("should fail");

        assert!(matches!(err, PersistenceError::CorruptArtifact { .. }));
        assert!(err.hint().contains("line 1"));
    }

    #[test]
    fn held_lock_is_reported() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let (artifact, ledger) = paths(temp.path());
        let _held = RunLock::acquire(&lock_path_for(&ledger), Duration::ZERO).expect("lock");
        let writer = IdempotentWriter::new(
            &artifact,
            &ledger,
            WriteOptions {
                lock_timeout: Duration::ZERO,
                ..WriteOptions::default()
            },
        );

        let err = writer.write(&[unit("User", "u\n")], "").expect_err("should fail");

        assert!(matches!(err, PersistenceError::Locked { .. }));
        assert!(!artifact.exists());
    }
}
