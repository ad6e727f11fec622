use std::path::{Path, PathBuf};

use memsentry_core::SourceKind;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Path '{}' not found.", .0.display())]
    NotFound(PathBuf),

    #[error("File must be a C source (.c) or header (.h) file: {}", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("Path '{}' is neither a regular file nor a directory.", .0.display())]
    UnsupportedTarget(PathBuf),
}

/// Shape of the path a run was started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    File,
    Directory,
}

/// Finds the C sources and headers under a root path.
pub struct FileDiscovery {
    root_path: PathBuf,
}

impl FileDiscovery {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Check that the root exists and whether it is a file or a directory.
    ///
    /// A single file is rejected here when its name does not end in `.c` or `.h`.
    pub fn target_kind(&self) -> Result<TargetKind, DiscoveryError> {
        let path = &self.root_path;
        if !path.exists() {
            return Err(DiscoveryError::NotFound(path.clone()));
        }

        if path.is_file() {
            if !SourceKind::is_eligible(path) {
                return Err(DiscoveryError::UnsupportedFile(path.clone()));
            }
            return Ok(TargetKind::File);
        }

        if path.is_dir() {
            return Ok(TargetKind::Directory);
        }

        Err(DiscoveryError::UnsupportedTarget(path.clone()))
    }

    /// Get all eligible files under the root, sorted by path.
    pub fn get_files(&self) -> Result<Vec<PathBuf>, DiscoveryError> {
        match self.target_kind()? {
            TargetKind::File => Ok(vec![self.root_path.clone()]),
            TargetKind::Directory => Ok(self.collect_dir(&self.root_path)),
        }
    }

    /// Recursively collect eligible files below `dir`.
    ///
    /// Entries that cannot be read are logged and skipped.
    fn collect_dir(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    continue;
                }
            };

            // Symlinks are listed but never descended; one pointing at a
            // directory is not a file.
            if entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir()) {
                continue;
            }

            if SourceKind::is_eligible(entry.path()) {
                files.push(entry.into_path());
            } else {
                debug!("Ignoring ineligible file {}", entry.path().display());
            }
        }

        files.sort();
        files
    }
}
