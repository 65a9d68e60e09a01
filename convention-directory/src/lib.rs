//! Gitignore-aware directory listing for resource conventions.
//!
//! This crate supplies the filesystem half of resource aggregation:
//!
//! - [`PatternMatcher`] - ignore/match predicates over paths, ignore rules first
//! - [`DirectoryWalker`] - single-level folder listing, recursion left to the caller
//! - [`IgnoreFile`] - discovery and parsing of the nearest `.gitignore`
//!
//! # Example
//!
//! ```no_run
//! use convention_directory::{
//!     DirectoryWalker, IgnoreFile, IgnorePatternSet, MatchPatternSet, PatternMatcher,
//! };
//! use std::path::Path;
//!
//! let root = std::env::current_dir()?;
//! let ignore = IgnoreFile::discover(&root)?
//!     .map(IgnoreFile::into_pattern_set)
//!     .unwrap_or_else(|| IgnorePatternSet::empty(&root));
//! let matcher = PatternMatcher::new(&ignore, &MatchPatternSet::new(&root, ["*.function.yml"]))?;
//!
//! let walker = DirectoryWalker::new(&root);
//! for entry in walker.list(Path::new("./src"))? {
//!     if entry.is_file && matcher.is_resource_file(&walker.resolve(&entry.path)) {
//!         println!("{}", entry.path.display());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod ignore_file;
mod paths;
mod pattern;
mod walker;

pub use error::{DirectoryError, Result};
pub use ignore_file::{find_up, parse_ignore_lines, IgnoreFile, IGNORE_FILE_NAME};
pub use paths::{normalize_path, to_rooted_relative};
pub use pattern::{IgnorePatternSet, MatchPatternSet, PatternMatcher};
pub use walker::{DirEntry, DirectoryWalker};
