//! Convention-driven aggregation of resource definitions.
//!
//! A *convention* names a set of folders, a gitignore-style pattern picking
//! out resource definition files, and an output mode. Every matching file
//! under those folders (minus anything the ignore set excludes) is loaded and
//! deep-merged into one mapping per convention, or, in `asFileArray` mode,
//! listed as a rooted relative path.
//!
//! # Overview
//!
//! - [`ResourceAggregator`] - runs the whole pipeline
//! - [`ContentLoader`] / [`FileContentLoader`] - turn a file into a value
//! - [`merge_into`] - the deep merge used to fold definitions together
//! - [`NoticeSink`] - receives duplicate-definition and inclusion notices
//!
//! # Example
//!
//! ```no_run
//! use convention_directory::IgnoreFile;
//! use convention_resources::{
//!     CapturingSink, ConventionSet, FileContentLoader, HostContext, ResourceAggregator,
//! };
//!
//! let root = std::env::current_dir()?;
//! let ignore = IgnoreFile::discover(&root)?
//!     .map(IgnoreFile::into_pattern_set)
//!     .unwrap_or_else(|| convention_directory::IgnorePatternSet::empty(&root));
//!
//! let conventions: ConventionSet = serde_yaml_ng::from_str(
//!     "functions:\n  pattern: '*.function.yml'\n  folders: ['./src']\n",
//! )?;
//!
//! let sink = CapturingSink::new();
//! let result = ResourceAggregator::new(&root, ignore, FileContentLoader::new(HostContext::new(&root)))
//!     .with_sink(&sink)
//!     .aggregate(&conventions)?;
//!
//! for message in sink.messages() {
//!     eprintln!("{message}");
//! }
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod aggregator;
mod convention;
mod error;
mod loader;
mod merge;
mod notice;
mod yaml;

pub use aggregator::{ResourceAggregator, WalkOptions, DEFAULT_MAX_DEPTH};
pub use convention::{
    AggregateResult, Convention, ConventionSet, ConventionSpec, OneOrMany, ResourceAggregate,
};
pub use error::{ResourceError, Result};
pub use loader::{ComputeFn, ContentFormat, ContentLoader, ContentSource, FileContentLoader, HostContext};
pub use merge::{first_duplicate_key, merge_into, Resources};
pub use notice::{CapturingSink, Notice, NoticeSink, TracingSink};
pub use yaml::{parse_yaml, yaml_to_json};
