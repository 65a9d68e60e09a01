//! CLI definition for the `convention` command.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use convention_config::{SettingsOverrides, DEFAULT_CONVENTION_KEY};

/// Output document format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Aggregate resource definitions by convention
///
/// Reads the convention section of a service file, walks each convention's
/// folders and prints the aggregated result to stdout.
#[derive(Parser, Debug)]
#[command(name = "convention")]
#[command(version)]
#[command(about = "Aggregate resource definitions by convention")]
pub struct Cli {
    /// Service file holding the convention section
    #[arg(short, long, value_name = "FILE", default_value = "serverless.yml")]
    pub config: PathBuf,

    /// Dotted key of the convention section
    #[arg(short, long, value_name = "DOTTED", default_value = DEFAULT_CONVENTION_KEY)]
    pub key: String,

    /// Ignore file to use instead of the nearest .gitignore
    #[arg(long, value_name = "FILE")]
    pub ignore_file: Option<PathBuf>,

    /// Print only this convention's aggregate
    #[arg(long, value_name = "NAME")]
    pub only: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Process directory entries in filesystem order
    #[arg(long)]
    pub no_sort: bool,

    /// Deepest folder nesting that may be entered
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Enable debug output to stderr
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// Flags that take precedence over environment settings.
    pub fn settings_overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            sort_entries: self.no_sort.then_some(false),
            max_depth: self.max_depth,
            ignore_file: self.ignore_file.clone(),
            ..Default::default()
        }
    }
}
