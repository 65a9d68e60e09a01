//! Wiring from parsed flags to a rendered aggregate.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use convention_config::{ConventionProvider, ServiceFile, WalkSettings};
use convention_directory::{normalize_path, IgnoreFile, IgnorePatternSet};
use convention_resources::{AggregateResult, FileContentLoader, ResourceAggregator};
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, OutputFormat};

/// Run the aggregation described by `cli` and render the output document.
pub fn run(cli: &Cli) -> Result<String> {
    let result = aggregate(cli)?;

    let document = match &cli.only {
        Some(name) => {
            let aggregate = result
                .get(name)
                .ok_or_else(|| anyhow!("Unknown convention \"{}\"", name))?;
            serde_json::to_value(aggregate)?
        }
        None => serde_json::to_value(&result)?,
    };

    render(&document, cli.format)
}

/// Load the service file and aggregate every convention it declares.
pub fn aggregate(cli: &Cli) -> Result<AggregateResult> {
    let config_path = absolute(&cli.config)?;
    let service = ServiceFile::load(&config_path)?;
    let service_dir = service.service_dir().to_path_buf();

    let conventions = ConventionProvider::new()
        .with_key(&cli.key)
        .load(&service)?;
    let settings = WalkSettings::load_with(&cli.settings_overrides())?;
    let ignore = ignore_patterns(&service_dir, settings.ignore_file.as_deref())?;

    debug!(
        service = %config_path.display(),
        conventions = conventions.len(),
        ignore_patterns = ignore.patterns().len(),
        "starting aggregation"
    );

    let loader = FileContentLoader::new(service.host_context());
    let result = ResourceAggregator::new(&service_dir, ignore, loader)
        .with_options(settings.walk_options())
        .aggregate(&conventions)?;
    Ok(result)
}

/// The explicit ignore file, else the nearest `.gitignore` above the service.
fn ignore_patterns(service_dir: &Path, explicit: Option<&Path>) -> Result<IgnorePatternSet> {
    let file = match explicit {
        Some(path) => Some(IgnoreFile::from_path(&absolute(path)?)?),
        None => IgnoreFile::discover(service_dir)?,
    };
    Ok(file
        .map(IgnoreFile::into_pattern_set)
        .unwrap_or_else(|| IgnorePatternSet::empty(service_dir)))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    let path = std::path::absolute(path)
        .with_context(|| format!("Cannot resolve path {}", path.display()))?;
    Ok(normalize_path(&path))
}

/// Serialize `document` in the requested format.
pub fn render(document: &Value, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(document)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(document)?,
    };
    Ok(rendered)
}
