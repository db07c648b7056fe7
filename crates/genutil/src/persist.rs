//! Writing the output files.
//!
//! Each file is first written in full to a temporary file next to its
//! destination and only then renamed over it, so a reader never observes a
//! half-written file.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// A file written to a temporary location, waiting to be moved to its
/// destination. Dropping it removes the temporary file.
#[derive(Debug)]
pub(crate) struct StagedFile {
    dest: PathBuf,
    file: NamedTempFile,
}

/// Write `contents` to a temporary file in the directory of `dest`, creating
/// the directory if needed.
pub(crate) fn stage(dest: &Path, contents: &[u8]) -> Result<StagedFile> {
    let persist_err =
        |err: std::io::Error| Error::Persist(dest.to_owned(), err);
    let dir = match dest.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(persist_err)?;
    let mut file = NamedTempFile::new_in(dir).map_err(persist_err)?;
    file.write_all(contents).map_err(persist_err)?;
    file.as_file().sync_all().map_err(persist_err)?;
    Ok(StagedFile {
        dest: dest.to_owned(),
        file,
    })
}

impl StagedFile {
    /// Move the file to its destination, replacing any existing file.
    pub(crate) fn commit(self) -> Result<PathBuf> {
        let Self { dest, file } = self;
        file.persist(&dest)
            .map_err(|err| Error::Persist(dest.clone(), err.error))?;
        tracing::debug!("Wrote {}", dest.to_string_lossy());
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use assert_matches::assert_matches;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_stage_and_commit() {
        let test_dir = tempdir().unwrap();
        let dest = test_dir.path().join("config").join("genesis.json");

        let staged = stage(&dest, b"{}").unwrap();
        assert!(!dest.exists(), "nothing is visible before the commit");
        assert_eq!(staged.commit().unwrap(), dest);
        assert_eq!(fs::read(&dest).unwrap(), b"{}");

        // Replaces an existing file
        stage(&dest, b"[]").unwrap().commit().unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"[]");
    }

    #[test]
    fn test_dropped_stage_leaves_nothing() {
        let test_dir = tempdir().unwrap();
        let dest = test_dir.path().join("genesis.json");

        drop(stage(&dest, b"{}").unwrap());
        assert!(!dest.exists());
        assert_eq!(fs::read_dir(test_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_stage_into_a_file() {
        let test_dir = tempdir().unwrap();
        let not_a_dir = test_dir.path().join("config");
        fs::write(&not_a_dir, "").unwrap();
        let dest = not_a_dir.join("genesis.json");

        assert_matches!(
            stage(&dest, b"{}"),
            Err(Error::Persist(path, _)) if path == dest
        );
    }
}
