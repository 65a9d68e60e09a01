//! Convention configuration provider using Figment

use crate::error::ConfigResult;
use crate::service::ServiceFile;
use convention_resources::ConventionSet;
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde_json::Value;
use tracing::{debug, trace};

/// Dotted key the convention section is read from by default.
pub const DEFAULT_CONVENTION_KEY: &str = "custom.convention";

/// Prefix of environment variables overriding the service document.
pub const ENV_PREFIX: &str = "CONVENTION_";

/// Loads the convention section of a service description.
///
/// Sources are layered in precedence order (later sources override earlier ones):
/// 1. The service document
/// 2. `CONVENTION_` environment variables, `__` separating nesting levels
///    (`CONVENTION_CUSTOM__CONVENTION__FUNCTIONS__FOLDERS=./lambdas`)
///
/// Variables under `CONVENTION_SETTINGS_` belong to [`WalkSettings`](crate::WalkSettings)
/// and are not applied to the document.
#[derive(Debug, Clone)]
pub struct ConventionProvider {
    key: String,
    env_prefix: String,
}

impl ConventionProvider {
    pub fn new() -> Self {
        Self {
            key: DEFAULT_CONVENTION_KEY.to_string(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Read conventions from a different dotted key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the convention set declared in `service`.
    ///
    /// A document without the section yields an empty set. Conventions keep
    /// the order they are declared in; ones introduced only through the
    /// environment follow in name order.
    pub fn load(&self, service: &ServiceFile) -> ConfigResult<ConventionSet> {
        let figment = self.build_figment(service);

        if !figment.contains(&self.key) {
            debug!(
                "No '{}' section in {}, nothing to aggregate",
                self.key,
                service.path().display()
            );
            return Ok(ConventionSet::new());
        }

        let extracted: ConventionSet = figment.extract_inner(&self.key)?;
        let declared = declared_names(service.document(), &self.key);
        let conventions = restore_order(extracted, &declared);

        debug!(
            "Loaded {} conventions from {}",
            conventions.len(),
            service.path().display()
        );
        Ok(conventions)
    }

    fn build_figment(&self, service: &ServiceFile) -> Figment {
        trace!("Building figment for {}", service.path().display());

        let settings_prefix = "settings_";
        Figment::new()
            .merge(Serialized::defaults(service.document()))
            .merge(
                Env::prefixed(&self.env_prefix)
                    .filter(move |key| !key.as_str().to_ascii_lowercase().starts_with(settings_prefix))
                    .split("__"),
            )
    }
}

impl Default for ConventionProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Names under the dotted `key` of `document`, in document order.
fn declared_names(document: &Value, key: &str) -> Vec<String> {
    let section = key
        .split('.')
        .try_fold(document, |value, part| value.get(part));
    match section {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

/// Reorder `extracted` to follow `declared`, appending anything undeclared.
fn restore_order(mut extracted: ConventionSet, declared: &[String]) -> ConventionSet {
    let mut ordered = ConventionSet::with_capacity(extracted.len());
    for name in declared {
        if let Some(spec) = extracted.shift_remove(name) {
            ordered.insert(name.clone(), spec);
        }
    }
    extracted.sort_keys();
    ordered.extend(extracted);
    ordered
}
