//! Command line front end for convention-driven resource aggregation.
//!
//! The `convention` binary reads the convention section of a service file,
//! aggregates every convention and prints the result as JSON or YAML.
//! Notices and logs go to stderr; stdout carries only the document.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

pub mod cli;
pub mod run;

pub use cli::{Cli, OutputFormat};
pub use run::{aggregate, render, run};
