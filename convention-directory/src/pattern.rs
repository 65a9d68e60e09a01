//! Ignore and match pattern sets.
//!
//! Both sets use gitignore syntax and are compiled with the `ignore` crate.
//! The ignore set decides what is excluded from traversal; the match set
//! decides which of the remaining files count as resource definitions.
//! Ignore rules always win.

use crate::error::{DirectoryError, Result};
use crate::paths::normalize_path;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};

/// Ordered gitignore-style exclusion patterns, anchored at `root`.
///
/// Later patterns may re-include paths through `!` negation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePatternSet {
    root: PathBuf,
    patterns: Vec<String>,
}

impl IgnorePatternSet {
    /// Create a pattern set anchored at `root`.
    pub fn new<I, S>(root: impl Into<PathBuf>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// A set that ignores nothing.
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            patterns: Vec::new(),
        }
    }

    /// Directory that anchored patterns are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The raw patterns in declaration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Ordered gitignore-style inclusion patterns selecting resource files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPatternSet {
    root: PathBuf,
    patterns: Vec<String>,
}

impl MatchPatternSet {
    /// Create a pattern set anchored at `root`.
    pub fn new<I, S>(root: impl Into<PathBuf>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Compile a list of gitignore lines rooted at `root`.
fn compile(root: &Path, patterns: &[String]) -> Result<Gitignore> {
    if patterns.is_empty() {
        return Ok(Gitignore::empty());
    }

    let mut builder = GitignoreBuilder::new(root);
    for pattern in patterns {
        builder
            .add_line(None, pattern)
            .map_err(|e| DirectoryError::invalid_pattern(pattern.as_str(), e))?;
    }

    builder
        .build()
        .map_err(|e| DirectoryError::invalid_pattern(patterns.join(", "), e))
}

/// Pure predicates over paths, built from an ignore set and a match set.
///
/// Paths may be given relative to the pattern roots or as absolute paths
/// beneath them. `.` and `..` components are resolved lexically first.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    ignore_root: PathBuf,
    ignore: Gitignore,
    match_root: PathBuf,
    matches: Gitignore,
}

impl PatternMatcher {
    /// Compile both pattern sets.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` if any pattern is not valid gitignore syntax.
    pub fn new(ignore: &IgnorePatternSet, matches: &MatchPatternSet) -> Result<Self> {
        let ignore_root = normalize_path(ignore.root());
        let compiled_ignore = compile(&ignore_root, ignore.patterns())?;
        let match_root = normalize_path(matches.root());
        let compiled_matches = compile(&match_root, matches.patterns())?;

        tracing::trace!(
            ignore_patterns = ignore.patterns().len(),
            match_patterns = matches.patterns().len(),
            root = %ignore_root.display(),
            "compiled pattern matcher"
        );

        Ok(Self {
            ignore_root,
            ignore: compiled_ignore,
            match_root,
            matches: compiled_matches,
        })
    }

    /// Whether `path` is excluded by the ignore set.
    ///
    /// A path is also excluded when any of its parent directories (below the
    /// ignore root) is excluded, matching git's rule that files inside an
    /// ignored directory cannot be re-included.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        matched_with_parents(&self.ignore, &self.ignore_root, &normalize_path(path), is_dir)
    }

    /// Whether `path` names a resource definition file.
    ///
    /// A file qualifies when it, or any directory above it (below the match
    /// root), matches the match set, so `functions/` selects every file
    /// inside a `functions` directory. Always false for ignored paths,
    /// whatever the match set says.
    pub fn is_resource_file(&self, path: &Path) -> bool {
        if self.is_ignored(path, false) {
            return false;
        }
        matched_with_parents(&self.matches, &self.match_root, &normalize_path(path), false)
    }
}

/// Whether `path` or one of its parent directories below `root` matches.
fn matched_with_parents(patterns: &Gitignore, root: &Path, path: &Path, is_dir: bool) -> bool {
    for parent in path.ancestors().skip(1) {
        if parent.as_os_str().is_empty()
            || parent == Path::new(".")
            || parent == root
            || (path.is_absolute() && !parent.starts_with(root))
        {
            break;
        }
        if patterns.matched(parent, true).is_ignore() {
            return true;
        }
    }

    patterns.matched(path, is_dir).is_ignore()
}
