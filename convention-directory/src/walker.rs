//! Single-level directory listing.
//!
//! `DirectoryWalker::list` only ever returns the direct children of a folder.
//! Recursion belongs to the caller so that ignore checks can prune a
//! directory before anything underneath it is read.

use crate::error::{DirectoryError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Snapshot of one directory entry taken at listing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Folder the entry was listed from, as given to [`DirectoryWalker::list`].
    pub parent: PathBuf,
    /// `parent` joined with `name`.
    pub path: PathBuf,
    /// File name of the entry.
    pub name: String,
    pub is_file: bool,
    pub is_dir: bool,
}

/// Lists folders relative to a root directory.
///
/// Folder paths handed to [`list`](Self::list) are logical: relative paths are
/// resolved against `root` for filesystem access, but the returned entries keep
/// the logical form so callers can render them back the way they were
/// configured.
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    root: PathBuf,
    sort_entries: bool,
    follow_symlinks: bool,
}

impl DirectoryWalker {
    /// Create a walker resolving relative folders against `root`.
    ///
    /// Entries are sorted by file name and symlinks are followed by default.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sort_entries: true,
            follow_symlinks: true,
        }
    }

    /// Sort entries by file name instead of using filesystem order.
    pub fn sort_entries(mut self, yes: bool) -> Self {
        self.sort_entries = yes;
        self
    }

    /// Classify symlinks by their target rather than the link itself.
    pub fn follow_symlinks(mut self, yes: bool) -> Self {
        self.follow_symlinks = yes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a logical path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// List the direct entries of `folder`.
    ///
    /// A folder that does not exist yields no entries. Broken symlinks are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `NotADirectory` if `folder` exists but is not a directory, and
    /// `Walk` if the listing itself fails.
    pub fn list(&self, folder: &Path) -> Result<Vec<DirEntry>> {
        let target = self.resolve(folder);
        if !target.exists() {
            tracing::trace!(folder = %folder.display(), "folder does not exist, nothing to list");
            return Ok(Vec::new());
        }
        if !target.is_dir() {
            return Err(DirectoryError::NotADirectory { path: target });
        }

        let mut walker = WalkDir::new(&target)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_symlinks);
        if self.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let mut entries = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_broken_link(&err) => {
                    tracing::warn!(
                        "Skipping broken link '{}'",
                        err.path().unwrap_or(target.as_path()).display()
                    );
                    continue;
                }
                Err(err) if err.loop_ancestor().is_some() => {
                    tracing::warn!(
                        "Skipping '{}': symlink loops back to the listed folder",
                        err.path().unwrap_or(target.as_path()).display()
                    );
                    continue;
                }
                Err(err) => {
                    return Err(DirectoryError::Walk {
                        path: target,
                        source: err,
                    })
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type();
            entries.push(DirEntry {
                parent: folder.to_path_buf(),
                path: folder.join(&name),
                name,
                is_file: file_type.is_file(),
                is_dir: file_type.is_dir(),
            });
        }

        tracing::trace!(folder = %folder.display(), count = entries.len(), "listed folder");
        Ok(entries)
    }
}

fn is_broken_link(err: &walkdir::Error) -> bool {
    err.io_error()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}
