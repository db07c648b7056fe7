//! Reading genesis transaction files from a directory.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use super::GenesisTx;
use crate::error::{Error, Result};

/// Extension of the genesis transaction files. Other files are skipped.
pub const GEN_TX_FILE_EXT: &str = "json";

/// A genesis transaction file as read from disk
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenTxFile {
    /// Path to the file
    pub path: PathBuf,
    /// The file's contents
    pub bytes: Vec<u8>,
}

impl GenTxFile {
    /// Decode the genesis transaction from the file's contents.
    pub fn decode(&self) -> Result<GenesisTx> {
        serde_json::from_slice(&self.bytes)
            .map_err(|err| Error::DecodeGenTx(self.path.clone(), err))
    }
}

/// Iterates over the genesis transaction files of a directory, reading and
/// decoding them one at a time.
///
/// Only regular files (or symlinks to them) with the [`GEN_TX_FILE_EXT`]
/// extension are read. Subdirectories are always skipped, whatever their
/// name. The files are visited in the order of their names so that every
/// node reports errors and lists the transactions in the same order.
///
/// The iterator stops after the first error.
#[derive(Debug)]
pub struct GenTxReader {
    files: std::vec::IntoIter<PathBuf>,
}

impl GenTxReader {
    /// List the genesis transaction files of the directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir)
            .map_err(|err| Error::ReadDir(dir.to_owned(), err))?;

        let mut files = vec![];
        for entry in entries {
            let path = entry
                .map_err(|err| Error::ReadDir(dir.to_owned(), err))?
                .path();
            if path.extension() != Some(OsStr::new(GEN_TX_FILE_EXT)) {
                tracing::debug!(
                    "Skipping {}, not a genesis transaction file",
                    path.to_string_lossy()
                );
                continue;
            }
            // Follows symlinks
            let metadata = fs::metadata(&path)
                .map_err(|err| Error::ReadFile(path.clone(), err))?;
            if !metadata.is_file() {
                tracing::warn!(
                    "Skipping {}, not a regular file",
                    path.to_string_lossy()
                );
                continue;
            }
            files.push(path);
        }
        files.sort();

        Ok(Self {
            files: files.into_iter(),
        })
    }

    fn read_next(&mut self) -> Option<Result<(GenTxFile, GenesisTx)>> {
        let path = self.files.next()?;
        let read = fs::read(&path)
            .map_err(|err| Error::ReadFile(path.clone(), err))
            .and_then(|bytes| {
                let file = GenTxFile { path, bytes };
                let tx = file.decode()?;
                Ok((file, tx))
            });
        Some(read)
    }
}

impl Iterator for GenTxReader {
    type Item = Result<(GenTxFile, GenesisTx)>;

    fn next(&mut self) -> Option<Self::Item> {
        let read = self.read_next()?;
        if read.is_err() {
            self.files = Vec::new().into_iter();
        }
        Some(read)
    }
}
