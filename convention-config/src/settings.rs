//! Traversal settings

use crate::error::ConfigResult;
use convention_resources::{WalkOptions, DEFAULT_MAX_DEPTH};
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix of environment variables setting [`WalkSettings`] fields.
pub const SETTINGS_ENV_PREFIX: &str = "CONVENTION_SETTINGS_";

/// How convention folders are walked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkSettings {
    pub sort_entries: bool,
    pub follow_symlinks: bool,
    pub max_depth: usize,
    /// Use this ignore file instead of discovering `.gitignore`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_file: Option<PathBuf>,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            sort_entries: true,
            follow_symlinks: true,
            max_depth: DEFAULT_MAX_DEPTH,
            ignore_file: None,
        }
    }
}

/// Explicit settings that take precedence over the environment, typically
/// from command line flags. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_entries: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_symlinks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_file: Option<PathBuf>,
}

impl WalkSettings {
    /// Defaults, then `CONVENTION_SETTINGS_*` environment variables.
    pub fn figment() -> Figment {
        Self::figment_with_prefix(SETTINGS_ENV_PREFIX)
    }

    fn figment_with_prefix(prefix: &str) -> Figment {
        Figment::from(Serialized::defaults(WalkSettings::default())).merge(Env::prefixed(prefix))
    }

    /// Load settings from defaults and the environment.
    pub fn load() -> ConfigResult<Self> {
        Self::load_with(&SettingsOverrides::default())
    }

    /// Load settings, applying `overrides` last.
    pub fn load_with(overrides: &SettingsOverrides) -> ConfigResult<Self> {
        let settings = Self::figment()
            .merge(Serialized::defaults(overrides))
            .extract()?;
        tracing::debug!(?settings, "walk settings loaded");
        Ok(settings)
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            sort_entries: self.sort_entries,
            follow_symlinks: self.follow_symlinks,
            max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let settings = WalkSettings::default();
        assert!(settings.sort_entries);
        assert!(settings.follow_symlinks);
        assert_eq!(settings.max_depth, 64);
        assert_eq!(settings.walk_options(), WalkOptions::default());
    }

    #[test]
    #[serial]
    fn test_env_then_overrides() {
        std::env::set_var("WALKTEST_MAX_DEPTH", "5");
        std::env::set_var("WALKTEST_SORT_ENTRIES", "false");
        let from_env: ConfigResult<WalkSettings> = WalkSettings::figment_with_prefix("WALKTEST_")
            .extract()
            .map_err(Into::into);
        let overridden: ConfigResult<WalkSettings> = WalkSettings::figment_with_prefix("WALKTEST_")
            .merge(Serialized::defaults(SettingsOverrides {
                max_depth: Some(9),
                ..Default::default()
            }))
            .extract()
            .map_err(Into::into);
        std::env::remove_var("WALKTEST_MAX_DEPTH");
        std::env::remove_var("WALKTEST_SORT_ENTRIES");

        let from_env = from_env.unwrap();
        assert_eq!(from_env.max_depth, 5);
        assert!(!from_env.sort_entries);
        assert!(from_env.follow_symlinks);

        let overridden = overridden.unwrap();
        assert_eq!(overridden.max_depth, 9);
        assert!(!overridden.sort_entries);
    }

    #[test]
    #[serial]
    fn test_load_with_ignore_file_override() {
        let settings = WalkSettings::load_with(&SettingsOverrides {
            ignore_file: Some(PathBuf::from("custom.ignore")),
            follow_symlinks: Some(false),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(settings.ignore_file, Some(PathBuf::from("custom.ignore")));
        assert!(!settings.walk_options().follow_symlinks);
    }
}
