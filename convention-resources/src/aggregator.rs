//! The resource aggregation pipeline.
//!
//! For each convention, every configured folder is walked depth-first. Ignored
//! directories are pruned before they are listed; files that survive the
//! ignore set and match the convention's pattern are either loaded and
//! deep-merged (the default) or collected as rooted relative paths
//! (`asFileArray`).
//!
//! One accumulator is threaded through the whole convention, so the
//! duplicate-definition check sees everything gathered so far, across
//! folders and subdirectories alike.

use crate::convention::{AggregateResult, Convention, ConventionSet, ResourceAggregate};
use crate::error::{ResourceError, Result};
use crate::loader::ContentLoader;
use crate::merge::{first_duplicate_key, merge_into, value_kind, Resources};
use crate::notice::{Notice, NoticeSink, TracingSink};
use convention_directory::{
    normalize_path, to_rooted_relative, DirEntry, DirectoryWalker, IgnorePatternSet,
    MatchPatternSet, PatternMatcher,
};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Default limit on how deep folders are recursed into.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Traversal behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// Process directory entries sorted by name rather than in filesystem order.
    pub sort_entries: bool,
    /// Classify symlinks by what they point to.
    pub follow_symlinks: bool,
    /// Deepest nesting below a configured folder that may be entered.
    pub max_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            sort_entries: true,
            follow_symlinks: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Walks convention folders and folds what it finds into aggregates.
///
/// # Example
///
/// ```no_run
/// use convention_resources::{
///     ConventionSet, FileContentLoader, HostContext, ResourceAggregator,
/// };
/// use convention_directory::IgnorePatternSet;
///
/// let root = std::env::current_dir()?;
/// let conventions: ConventionSet = serde_yaml_ng::from_str(
///     "functions:\n  pattern: '*.function.yml'\n  folders: ['./src']\n",
/// )?;
///
/// let aggregator = ResourceAggregator::new(
///     &root,
///     IgnorePatternSet::new(&root, ["node_modules/"]),
///     FileContentLoader::new(HostContext::new(&root)),
/// );
/// let result = aggregator.aggregate(&conventions)?;
/// println!("{}", serde_json::to_string_pretty(&result)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct ResourceAggregator<L, S = TracingSink> {
    root: PathBuf,
    ignore: IgnorePatternSet,
    loader: L,
    sink: S,
    options: WalkOptions,
}

impl<L: ContentLoader> ResourceAggregator<L, TracingSink> {
    /// Create an aggregator resolving relative folders against `root`.
    ///
    /// Notices go to `tracing` until [`with_sink`](Self::with_sink) says otherwise.
    pub fn new(root: impl Into<PathBuf>, ignore: IgnorePatternSet, loader: L) -> Self {
        Self {
            root: root.into(),
            ignore,
            loader,
            sink: TracingSink,
            options: WalkOptions::default(),
        }
    }
}

impl<L: ContentLoader, S: NoticeSink> ResourceAggregator<L, S> {
    /// Send notices to `sink` instead.
    pub fn with_sink<T: NoticeSink>(self, sink: T) -> ResourceAggregator<L, T> {
        ResourceAggregator {
            root: self.root,
            ignore: self.ignore,
            loader: self.loader,
            sink,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Aggregate every convention in declaration order.
    ///
    /// All conventions are validated before any folder is read. The first
    /// fatal error aborts the whole run.
    pub fn aggregate(&self, conventions: &ConventionSet) -> Result<AggregateResult> {
        let conventions = Convention::from_set(conventions)?;

        let mut result = IndexMap::with_capacity(conventions.len());
        for convention in &conventions {
            let aggregate = self.aggregate_convention(convention)?;
            result.insert(convention.name.clone(), aggregate);
        }

        Ok(result)
    }

    /// Aggregate a single convention.
    pub fn aggregate_convention(&self, convention: &Convention) -> Result<ResourceAggregate> {
        debug!(
            convention = %convention.name,
            folders = convention.folders.len(),
            as_file_array = convention.as_file_array,
            "aggregating convention"
        );

        let matcher = PatternMatcher::new(
            &self.ignore,
            &MatchPatternSet::new(&self.root, convention.pattern.iter().cloned()),
        )?;
        let walker = DirectoryWalker::new(&self.root)
            .sort_entries(self.options.sort_entries)
            .follow_symlinks(self.options.follow_symlinks);

        let mut traversal = Traversal {
            loader: &self.loader,
            sink: &self.sink,
            matcher,
            walker,
            max_depth: self.options.max_depth,
            stack: Vec::new(),
        };

        let mut aggregate = convention.empty_aggregate();
        for folder in &convention.folders {
            traversal.walk(folder, 0, &mut aggregate)?;
        }

        debug!(
            convention = %convention.name,
            entries = aggregate.len(),
            "convention aggregated"
        );
        Ok(aggregate)
    }
}

/// State for walking one convention's folders.
struct Traversal<'a, L, S> {
    loader: &'a L,
    sink: &'a S,
    matcher: PatternMatcher,
    walker: DirectoryWalker,
    max_depth: usize,
    /// Canonical paths of the directories currently being walked.
    stack: Vec<PathBuf>,
}

impl<L: ContentLoader, S: NoticeSink> Traversal<'_, L, S> {
    fn walk(&mut self, folder: &Path, depth: usize, aggregate: &mut ResourceAggregate) -> Result<()> {
        if depth > self.max_depth {
            return Err(ResourceError::DepthLimitExceeded {
                path: folder.to_path_buf(),
                limit: self.max_depth,
            });
        }

        let canonical = std::fs::canonicalize(self.walker.resolve(folder)).ok();
        if let Some(canonical) = &canonical {
            if self.stack.contains(canonical) {
                warn!(
                    "Skipping '{}': it leads back to '{}' which is already being walked",
                    folder.display(),
                    canonical.display()
                );
                return Ok(());
            }
            self.stack.push(canonical.clone());
        }

        let entries = self.walker.list(folder)?;
        for entry in &entries {
            let absolute = normalize_path(&self.walker.resolve(&entry.path));

            if entry.is_dir {
                if self.matcher.is_ignored(&absolute, true) {
                    trace!("Pruned ignored directory {}", entry.path.display());
                } else {
                    self.walk(&entry.path, depth + 1, aggregate)?;
                }
            } else if entry.is_file && self.matcher.is_resource_file(&absolute) {
                self.include(entry, &absolute, aggregate)?;
            }
        }

        if canonical.is_some() {
            self.stack.pop();
        }
        Ok(())
    }

    fn include(
        &self,
        entry: &DirEntry,
        absolute: &Path,
        aggregate: &mut ResourceAggregate,
    ) -> Result<()> {
        match aggregate {
            ResourceAggregate::Files(files) => {
                files.push(to_rooted_relative(&entry.path));
                Ok(())
            }
            ResourceAggregate::Resources(resources) => {
                let Some(content) = self.loader.load(absolute)? else {
                    trace!("No content in {}", entry.path.display());
                    return Ok(());
                };
                let addition = into_resources(content, absolute)?;
                self.merge(resources, addition, entry);
                Ok(())
            }
        }
    }

    fn merge(&self, resources: &mut Resources, addition: Resources, entry: &DirEntry) {
        if let Some(key) = first_duplicate_key(resources, &addition) {
            self.sink.notice(&Notice::DuplicateDefinition {
                key: key.to_string(),
                path: entry.path.clone(),
            });
        }
        self.sink.notice(&Notice::IncludingDefinition {
            path: entry.path.clone(),
        });
        merge_into(resources, addition);
    }
}

/// Check loaded content is a non-empty mapping.
fn into_resources(content: Value, path: &Path) -> Result<Resources> {
    match content {
        Value::Object(map) if map.is_empty() => Err(ResourceError::MissingContent {
            path: path.to_path_buf(),
        }),
        Value::Object(map) => Ok(map),
        other => Err(ResourceError::NotAMapping {
            path: path.to_path_buf(),
            found: value_kind(&other),
        }),
    }
}
