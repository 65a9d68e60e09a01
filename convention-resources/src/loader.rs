//! Content loading for resource definition files.
//!
//! The aggregator only needs something implementing [`ContentLoader`]. The
//! stock [`FileContentLoader`] parses YAML and JSON files and can also hand
//! out values computed by registered functions.

use crate::error::{ResourceError, Result};
use crate::yaml::parse_yaml;
use convention_directory::{normalize_path, DirectoryError};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Produces the structured content of a resource file.
pub trait ContentLoader {
    /// Load the content behind `path`, which is absolute.
    ///
    /// `Ok(None)` means the file contributes nothing and is skipped.
    fn load(&self, path: &Path) -> Result<Option<Value>>;
}

impl<F> ContentLoader for F
where
    F: Fn(&Path) -> Result<Option<Value>>,
{
    fn load(&self, path: &Path) -> Result<Option<Value>> {
        self(path)
    }
}

/// What computed content sources are invoked with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostContext {
    /// Directory of the service being assembled.
    pub service_dir: PathBuf,
    /// The service description itself.
    pub service: Value,
}

impl HostContext {
    pub fn new(service_dir: impl Into<PathBuf>) -> Self {
        Self {
            service_dir: service_dir.into(),
            service: Value::Null,
        }
    }

    pub fn with_service(mut self, service: Value) -> Self {
        self.service = service;
        self
    }
}

/// Function computing resource content from the host context.
pub type ComputeFn = dyn Fn(&HostContext) -> Result<Option<Value>> + Send + Sync;

/// Where a resource definition's content comes from.
#[derive(Clone)]
pub enum ContentSource {
    /// Content read directly from a data file.
    Static(Value),
    /// Content produced by calling a function with the host context.
    Computed(Arc<ComputeFn>),
}

impl ContentSource {
    /// Resolve the source to a plain value. `null` counts as no content.
    pub fn resolve(&self, context: &HostContext) -> Result<Option<Value>> {
        let value = match self {
            ContentSource::Static(value) => Some(value.clone()),
            ContentSource::Computed(compute) => compute(context)?,
        };
        Ok(value.filter(|value| !value.is_null()))
    }
}

impl fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Static(value) => f.debug_tuple("Static").field(value).finish(),
            ContentSource::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Data format recognised from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Yaml,
    Json,
}

impl ContentFormat {
    /// Detect format from a path's extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "yml" | "yaml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Loads YAML and JSON files, plus registered computed sources.
///
/// Computed sources take priority over the file on disk. Files with any
/// other extension yield no content.
#[derive(Clone, Default)]
pub struct FileContentLoader {
    context: HostContext,
    computed: HashMap<PathBuf, Arc<ComputeFn>>,
}

impl FileContentLoader {
    pub fn new(context: HostContext) -> Self {
        Self {
            context,
            computed: HashMap::new(),
        }
    }

    pub fn context(&self) -> &HostContext {
        &self.context
    }

    /// Register a function computing the content of `path`.
    ///
    /// Relative paths are taken relative to the service directory.
    pub fn with_computed<F>(mut self, path: impl AsRef<Path>, compute: F) -> Self
    where
        F: Fn(&HostContext) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        let key = self.key_for(path.as_ref());
        self.computed.insert(key, Arc::new(compute));
        self
    }

    fn key_for(&self, path: &Path) -> PathBuf {
        normalize_path(&self.context.service_dir.join(path))
    }

    /// Determine where the content of `path` comes from, reading the file if
    /// it is a data file.
    pub fn source_for(&self, path: &Path) -> Result<Option<ContentSource>> {
        if let Some(compute) = self.computed.get(&self.key_for(path)) {
            return Ok(Some(ContentSource::Computed(Arc::clone(compute))));
        }

        let Some(format) = ContentFormat::from_path(path) else {
            tracing::trace!("No loader for {}", path.display());
            return Ok(None);
        };

        let content = std::fs::read_to_string(path)
            .map_err(|e| ResourceError::from(DirectoryError::file_read(path, e)))?;
        let value = match format {
            ContentFormat::Yaml => parse_yaml(&content).map_err(|e| ResourceError::parse(path, e))?,
            ContentFormat::Json => {
                serde_json::from_str(&content).map_err(|e| ResourceError::parse(path, e))?
            }
        };

        Ok(Some(ContentSource::Static(value)))
    }
}

impl fmt::Debug for FileContentLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileContentLoader")
            .field("context", &self.context)
            .field("computed", &self.computed.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ContentLoader for FileContentLoader {
    fn load(&self, path: &Path) -> Result<Option<Value>> {
        match self.source_for(path)? {
            Some(source) => source.resolve(&self.context),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_detection() {
        assert_eq!(ContentFormat::from_path(Path::new("a.yml")), Some(ContentFormat::Yaml));
        assert_eq!(ContentFormat::from_path(Path::new("a.YAML")), Some(ContentFormat::Yaml));
        assert_eq!(ContentFormat::from_path(Path::new("a.Json")), Some(ContentFormat::Json));
        assert_eq!(ContentFormat::from_path(Path::new("a.toml")), None);
        assert_eq!(ContentFormat::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_loads_yaml_and_json() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.yml"), "fnA:\n  handler: a.main\n").unwrap();
        fs::write(temp.path().join("b.json"), r#"{"fnB": {"handler": "b.main"}}"#).unwrap();

        let loader = FileContentLoader::new(HostContext::new(temp.path()));
        assert_eq!(
            loader.load(&temp.path().join("a.yml")).unwrap(),
            Some(json!({"fnA": {"handler": "a.main"}}))
        );
        assert_eq!(
            loader.load(&temp.path().join("b.json")).unwrap(),
            Some(json!({"fnB": {"handler": "b.main"}}))
        );
    }

    #[test]
    fn test_empty_yaml_and_unknown_extension_yield_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("empty.yml"), "").unwrap();
        fs::write(temp.path().join("notes.txt"), "hello").unwrap();

        let loader = FileContentLoader::new(HostContext::new(temp.path()));
        assert_eq!(loader.load(&temp.path().join("empty.yml")).unwrap(), None);
        assert_eq!(loader.load(&temp.path().join("notes.txt")).unwrap(), None);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();

        let loader = FileContentLoader::new(HostContext::new(temp.path()));
        match loader.load(&path) {
            Err(ResourceError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_computed_source_receives_context() {
        let temp = TempDir::new().unwrap();
        let context = HostContext::new(temp.path()).with_service(json!({"service": "orders"}));
        let loader = FileContentLoader::new(context).with_computed("fns/gen.js", |ctx| {
            let service = ctx.service["service"].as_str().unwrap_or("unknown");
            let mut resources = serde_json::Map::new();
            resources.insert(format!("{service}Handler"), json!({"handler": "gen.main"}));
            Ok(Some(Value::Object(resources)))
        });

        let value = loader.load(&temp.path().join("fns/gen.js")).unwrap();
        assert_eq!(value, Some(json!({"ordersHandler": {"handler": "gen.main"}})));
    }

    #[test]
    fn test_computed_null_is_nothing() {
        let temp = TempDir::new().unwrap();
        let loader = FileContentLoader::new(HostContext::new(temp.path()))
            .with_computed(temp.path().join("skip.js"), |_| Ok(Some(Value::Null)));
        assert_eq!(loader.load(&temp.path().join("skip.js")).unwrap(), None);
    }

    #[test]
    fn test_closure_loader() {
        let loader = |path: &Path| -> Result<Option<Value>> {
            Ok(Some(json!({ "loaded": path.to_string_lossy() })))
        };
        assert_eq!(
            loader.load(Path::new("/x.yml")).unwrap(),
            Some(json!({"loaded": "/x.yml"}))
        );
    }

    #[test]
    fn test_static_source_resolves_to_clone() {
        let source = ContentSource::Static(json!({"a": 1}));
        let ctx = HostContext::default();
        assert_eq!(source.resolve(&ctx).unwrap(), Some(json!({"a": 1})));
        assert!(format!("{:?}", source).starts_with("Static("));
    }
}
