//! Locating and reading the ignore-pattern source.
//!
//! The nearest `.gitignore` at or above a starting directory supplies the
//! ignore set. Its patterns are anchored at the directory containing it.

use crate::error::{DirectoryError, Result};
use crate::pattern::IgnorePatternSet;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for by [`IgnoreFile::discover`].
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// A parsed ignore file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreFile {
    path: PathBuf,
    patterns: Vec<String>,
}

impl IgnoreFile {
    /// Find the nearest `.gitignore` at or above `start` and parse it.
    ///
    /// Returns `Ok(None)` if no ignore file exists on the way to the
    /// filesystem root.
    pub fn discover(start: &Path) -> Result<Option<Self>> {
        match find_up(start, IGNORE_FILE_NAME) {
            Some(path) => {
                tracing::debug!("Using ignore file {}", path.display());
                Self::from_path(&path).map(Some)
            }
            None => {
                tracing::debug!(
                    "No {} found at or above {}",
                    IGNORE_FILE_NAME,
                    start.display()
                );
                Ok(None)
            }
        }
    }

    /// Read and parse a specific ignore file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| DirectoryError::file_read(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            patterns: parse_ignore_lines(&content),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Directory the patterns are anchored at.
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Convert into a pattern set anchored at the file's directory.
    pub fn into_pattern_set(self) -> IgnorePatternSet {
        let root = self.root().to_path_buf();
        IgnorePatternSet::new(root, self.patterns)
    }
}

/// Split ignore-file content into pattern lines.
///
/// Blank lines and `#` comments are dropped. Trailing whitespace is trimmed
/// unless escaped with a backslash.
pub fn parse_ignore_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| {
            let line = line.trim_end_matches('\r');
            if line.ends_with("\\ ") {
                line
            } else {
                line.trim_end()
            }
        })
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Walk up from `start` looking for a file called `name`.
pub fn find_up(start: &Path, name: &str) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let candidate = path.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match path.parent() {
            Some(parent) => path = parent,
            None => return None,
        }
    }
}
