//! Persistence error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentError;

#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing a file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ledger exists but cannot be trusted.
    #[error("Corrupt ledger '{path}': {reason}")]
    CorruptLedger { path: PathBuf, reason: String },

    /// The target artifact has unbalanced or duplicated block markers.
    #[error("Corrupt artifact '{path}': {source}")]
    CorruptArtifact {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    /// Another run holds the lock for this ledger.
    #[error(
        "Lock '{path}' is held by another run{}",
        .pid.map(|pid| format!(" (pid {pid})")).unwrap_or_default()
    )]
    Locked { path: PathBuf, pid: Option<u32> },
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// One-line remediation hint for the user.
    #[must_use]
    pub fn hint(&self) -> String {
        match self {
            Self::Io { path, .. } => format!(
                "check that '{}' and its directory are readable and writable",
                path.display()
            ),
            Self::CorruptLedger { path, .. } => format!(
                "restore '{}' from version control, or delete it to re-adopt unedited blocks",
                path.display()
            ),
            Self::CorruptArtifact { path, source } => format!(
                "repair the block markers near line {} of '{}'",
                source.line,
                path.display()
            ),
            Self::Locked { path, .. } => format!(
                "wait for the other run to finish, or remove '{}' if no run is active",
                path.display()
            ),
        }
    }
}
