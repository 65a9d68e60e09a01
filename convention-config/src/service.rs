//! Service description file discovery and parsing

use crate::error::{ConfigError, ConfigResult};
use convention_resources::{parse_yaml, HostContext};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// File names probed by [`ServiceFile::discover`], in order.
pub const SERVICE_FILE_NAMES: [&str; 3] = ["serverless.yml", "serverless.yaml", "serverless.json"];

/// Service file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFormat {
    /// YAML format (.yaml or .yml extensions)
    Yaml,
    /// JSON format (.json extension)
    Json,
}

impl ServiceFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| ConfigError::UnsupportedFormat {
            format: if ext.is_empty() {
                path.display().to_string()
            } else {
                ext.to_string()
            },
        })
    }
}

/// A parsed service description.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceFile {
    path: PathBuf,
    format: ServiceFormat,
    document: Value,
}

impl ServiceFile {
    /// Find the first service file in `dir`.
    pub fn discover(dir: &Path) -> ConfigResult<Self> {
        for name in SERVICE_FILE_NAMES {
            let candidate = dir.join(name);
            trace!("Probing {}", candidate.display());
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }
        Err(ConfigError::FileNotFound {
            path: dir.join(SERVICE_FILE_NAMES[0]),
        })
    }

    /// Read and parse a specific service file.
    ///
    /// YAML CloudFormation short-form tags are expanded to their long form.
    /// An empty document is treated as an empty mapping.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let format = ServiceFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let document = match format {
            ServiceFormat::Yaml => {
                parse_yaml(&content).map_err(|e| ConfigError::document(path, e))?
            }
            ServiceFormat::Json => {
                serde_json::from_str(&content).map_err(|e| ConfigError::document(path, e))?
            }
        };
        let document = match document {
            Value::Null => Value::Object(Default::default()),
            Value::Object(map) => Value::Object(map),
            _ => {
                return Err(ConfigError::document(
                    path,
                    "top-level value must be a mapping",
                ))
            }
        };

        debug!("Loaded service file {} ({:?})", path.display(), format);
        Ok(Self {
            path: path.to_path_buf(),
            format,
            document,
        })
    }

    /// Build from an already parsed document.
    pub fn from_document(path: impl Into<PathBuf>, document: Value) -> Self {
        Self {
            path: path.into(),
            format: ServiceFormat::Yaml,
            document,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ServiceFormat {
        self.format
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Directory relative folders and the ignore file are resolved from.
    pub fn service_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Context handed to computed content sources.
    pub fn host_context(&self) -> HostContext {
        HostContext::new(self.service_dir()).with_service(self.document.clone())
    }
}
