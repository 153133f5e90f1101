//! File collaborators
//!
//! The engine consumes narrow traits for everything that touches the
//! outside world: reading/writing config text and listing which files
//! might belong to a mod. The filesystem implementations here are the
//! default collaborators; tests substitute their own.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Read/write collaborator for config file text.
pub trait ConfigStore {
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, text: &str) -> Result<()>;
}

/// A file that may hold config for a mod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    /// Bare filename, for display.
    pub name: String,
}

/// Candidate-listing collaborator. The engine treats the result as an
/// opaque ordered list and defaults to the first entry.
pub trait CandidateIndex {
    fn list_candidates(&self, mod_name: &str, filename_base: &str) -> Vec<CandidateFile>;
}

/// Filesystem-backed [`ConfigStore`].
#[derive(Debug, Default)]
pub struct FsConfigStore;

impl FsConfigStore {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigStore for FsConfigStore {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| Error::read(path, e))
    }

    /// Write-to-temp-then-rename with an advisory lock, so a failed save
    /// never leaves a half-written config behind.
    fn write(&self, path: &Path, text: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::write(path, e))?;
        }

        let temp_name = format!(
            ".{}.{}.tmp",
            path.file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default(),
            std::process::id()
        );
        let temp_path = path.with_file_name(&temp_name);

        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| Error::write(&temp_path, e))?;

        temp_file
            .lock_exclusive()
            .map_err(|e| Error::write(&temp_path, e))?;
        temp_file
            .write_all(text.as_bytes())
            .map_err(|e| Error::write(&temp_path, e))?;
        temp_file
            .sync_all()
            .map_err(|e| Error::write(&temp_path, e))?;
        temp_file
            .unlock()
            .map_err(|e| Error::write(&temp_path, e))?;

        fs::rename(&temp_path, path).map_err(|e| Error::write(path, e))
    }
}

/// Recursive directory scan with fuzzy, case-insensitive substring match
/// of the mod identity against each file's path and name.
#[derive(Debug, Clone)]
pub struct DirCandidateIndex {
    root: PathBuf,
}

impl DirCandidateIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl CandidateIndex for DirCandidateIndex {
    fn list_candidates(&self, mod_name: &str, filename_base: &str) -> Vec<CandidateFile> {
        let needles: Vec<String> = [mod_name, filename_base]
            .iter()
            .map(|s| s.to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let mut out = Vec::new();
        for entry in WalkDir::new(&self.root).into_iter() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path_lower = entry.path().to_string_lossy().to_lowercase();
            if needles.iter().any(|n| path_lower.contains(n)) {
                out.push(CandidateFile {
                    path: entry.path().to_path_buf(),
                    name: entry.file_name().to_string_lossy().into_owned(),
                });
            }
        }
        out.sort_by(|a, b| a.path.cmp(&b.path));
        out
    }
}
