//! Atomic file replacement.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::PersistenceError;

/// Write `contents` to `path` through a temp file in the same directory,
/// renamed over the target once fully flushed. Readers see either the old
/// file or the new one, never a partial write.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), PersistenceError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| PersistenceError::io(parent, e))?;
    temp.write_all(contents.as_bytes())
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| PersistenceError::io(temp.path(), e))?;
    temp.persist(path)
        .map_err(|e| PersistenceError::io(path, e.error))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Read a file that may not exist yet.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, PersistenceError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PersistenceError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_parent_dirs_and_replaces_content() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("lib/generated/services.ts");

        write_atomic(&path, "first\n").expect("first write");
        write_atomic(&path, "second\n").expect("second write");

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "second\n");
        let leftovers: Vec<_> = std::fs::read_dir(path.parent().expect("parent"))
            .expect("read dir")
            .collect();
        assert_eq!(leftovers.len(), 1, "temp file should be renamed away");
    }

    #[test]
    fn missing_file_reads_as_none() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        assert!(read_optional(&temp.path().join("absent")).expect("read").is_none());
    }
}
