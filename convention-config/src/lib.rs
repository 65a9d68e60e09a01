//! Configuration loading for resource conventions using Figment
//!
//! Conventions live in a section of the service description file
//! (`serverless.yml`, `serverless.yaml` or `serverless.json`), by default at
//! `custom.convention`. Environment variables can override any part of that
//! document, and traversal behaviour is tuned through [`WalkSettings`].
//!
//! # Quick Start
//!
//! ```no_run
//! use convention_config::{ConventionProvider, ServiceFile, WalkSettings};
//!
//! let service = ServiceFile::discover(std::path::Path::new("."))?;
//! let conventions = ConventionProvider::new().load(&service)?;
//! let settings = WalkSettings::load()?;
//!
//! for (name, spec) in &conventions {
//!     println!("{name}: {:?} (max depth {})", spec.folders, settings.max_depth);
//! }
//! # Ok::<(), convention_config::ConfigError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `CONVENTION_<PATH>` overrides a value of the service document, `__`
//!   separating levels: `CONVENTION_CUSTOM__CONVENTION__FUNCTIONS__FOLDERS=./lambdas`
//! - `CONVENTION_SETTINGS_<FIELD>` sets a [`WalkSettings`] field:
//!   `CONVENTION_SETTINGS_MAX_DEPTH=16`

mod error;
mod provider;
mod service;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use provider::{ConventionProvider, DEFAULT_CONVENTION_KEY, ENV_PREFIX};
pub use service::{ServiceFile, ServiceFormat, SERVICE_FILE_NAMES};
pub use settings::{SettingsOverrides, WalkSettings, SETTINGS_ENV_PREFIX};
