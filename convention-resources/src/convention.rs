//! Convention configuration and aggregate result types.

use crate::error::{ResourceError, Result};
use crate::merge::Resources;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(values: Vec<String>) -> Self {
        OneOrMany::Many(values)
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

/// A convention entry exactly as configured.
///
/// ```yaml
/// functions:
///   pattern: ["*.function.yml"]
///   folders: ["./src"]
/// templates:
///   pattern: "*.json"
///   folders: ["./templates"]
///   asFileArray: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConventionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folders: Option<OneOrMany>,
    /// Also accepted as `asfilearray`, the spelling environment overrides arrive in.
    #[serde(default, alias = "asfilearray", skip_serializing_if = "Option::is_none")]
    pub as_file_array: Option<bool>,
}

/// Convention entries keyed by name, in declaration order.
pub type ConventionSet = IndexMap<String, ConventionSpec>;

/// A validated convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Convention {
    pub name: String,
    pub pattern: Vec<String>,
    pub folders: Vec<PathBuf>,
    pub as_file_array: bool,
}

impl Convention {
    /// Create a convention merging mapping content.
    pub fn new<P, F>(name: impl Into<String>, pattern: P, folders: F) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<PathBuf>,
    {
        Self {
            name: name.into(),
            pattern: pattern.into_iter().map(Into::into).collect(),
            folders: folders.into_iter().map(Into::into).collect(),
            as_file_array: false,
        }
    }

    /// Collect matching file paths instead of merging content.
    pub fn as_file_array(mut self, yes: bool) -> Self {
        self.as_file_array = yes;
        self
    }

    /// Validate a configured entry.
    ///
    /// # Errors
    ///
    /// Returns `MissingPatternOrFolders` when either field is absent or empty.
    pub fn from_spec(name: &str, spec: &ConventionSpec) -> Result<Self> {
        let missing = || ResourceError::MissingPatternOrFolders {
            convention: name.to_string(),
        };

        let pattern = spec
            .pattern
            .as_ref()
            .map(|p| p.as_slice().to_vec())
            .filter(|p| !p.is_empty())
            .ok_or_else(missing)?;
        let folders = spec
            .folders
            .as_ref()
            .map(|f| f.as_slice().iter().map(PathBuf::from).collect::<Vec<_>>())
            .filter(|f| !f.is_empty())
            .ok_or_else(missing)?;

        Ok(Self {
            name: name.to_string(),
            pattern,
            folders,
            as_file_array: spec.as_file_array.unwrap_or(false),
        })
    }

    /// Validate every entry of a set, failing on the first bad one.
    pub fn from_set(set: &ConventionSet) -> Result<Vec<Self>> {
        set.iter()
            .map(|(name, spec)| Self::from_spec(name, spec))
            .collect()
    }

    /// An empty aggregate of the right shape for this convention.
    pub fn empty_aggregate(&self) -> ResourceAggregate {
        if self.as_file_array {
            ResourceAggregate::Files(Vec::new())
        } else {
            ResourceAggregate::Resources(Resources::new())
        }
    }
}

/// Everything one convention gathered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceAggregate {
    /// Deep-merged content of every resource definition.
    Resources(Resources),
    /// Rooted relative paths (`./dir/file`) of every matching file.
    Files(Vec<String>),
}

impl ResourceAggregate {
    pub fn as_resources(&self) -> Option<&Resources> {
        match self {
            ResourceAggregate::Resources(resources) => Some(resources),
            ResourceAggregate::Files(_) => None,
        }
    }

    pub fn as_files(&self) -> Option<&[String]> {
        match self {
            ResourceAggregate::Files(files) => Some(files),
            ResourceAggregate::Resources(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResourceAggregate::Resources(resources) => resources.len(),
            ResourceAggregate::Files(files) => files.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Final result: convention name to its aggregate, in declaration order.
pub type AggregateResult = IndexMap<String, ResourceAggregate>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_deserializes_lists_and_strings() {
        let set: ConventionSet = serde_yaml_ng::from_str(
            "functions:\n  pattern: ['*.function.yml']\n  folders: ['./src']\ntemplates:\n  pattern: '*.json'\n  folders: ./templates\n  asFileArray: true\n",
        )
        .unwrap();

        let names: Vec<&String> = set.keys().collect();
        assert_eq!(names, vec!["functions", "templates"]);

        let conventions = Convention::from_set(&set).unwrap();
        assert_eq!(
            conventions[0],
            Convention::new("functions", ["*.function.yml"], ["./src"])
        );
        assert_eq!(
            conventions[1],
            Convention::new("templates", ["*.json"], ["./templates"]).as_file_array(true)
        );
    }

    #[test]
    fn test_missing_pattern_names_convention() {
        let spec = ConventionSpec {
            folders: Some(OneOrMany::from("./src")),
            ..Default::default()
        };
        let err = Convention::from_spec("resources", &spec).unwrap_err();
        assert!(matches!(
            &err,
            ResourceError::MissingPatternOrFolders { convention } if convention == "resources"
        ));
        assert_eq!(
            err.to_string(),
            "Include \"resources\" is missing pattern or folders."
        );
    }

    #[test]
    fn test_missing_or_empty_folders_rejected() {
        let spec = ConventionSpec {
            pattern: Some(OneOrMany::from("*.yml")),
            ..Default::default()
        };
        assert!(Convention::from_spec("a", &spec).is_err());

        let spec = ConventionSpec {
            pattern: Some(OneOrMany::from("*.yml")),
            folders: Some(OneOrMany::Many(Vec::new())),
            as_file_array: None,
        };
        assert!(Convention::from_spec("a", &spec).is_err());
    }

    #[test]
    fn test_empty_aggregate_shape() {
        let merge = Convention::new("a", ["*.yml"], ["."]);
        assert!(merge.empty_aggregate().as_resources().is_some());

        let files = merge.as_file_array(true);
        assert_eq!(files.empty_aggregate().as_files(), Some(&[][..]));
    }

    #[test]
    fn test_aggregate_serializes_untagged() {
        let files = ResourceAggregate::Files(vec!["./a.json".to_string()]);
        assert_eq!(serde_json::to_string(&files).unwrap(), r#"["./a.json"]"#);

        let mut resources = Resources::new();
        resources.insert("fnA".to_string(), serde_json::json!({"handler": "a"}));
        let resources = ResourceAggregate::Resources(resources);
        assert_eq!(
            serde_json::to_string(&resources).unwrap(),
            r#"{"fnA":{"handler":"a"}}"#
        );
    }
}
